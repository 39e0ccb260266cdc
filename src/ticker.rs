use chrono::{DateTime, Timelike, Utc};
use log::{debug, info};
use std::time::Duration;

use crate::clock::Clock;
use crate::error::FaceError;
use crate::face::{Face, Surface};

const NANOS_PER_MINUTE: u64 = 60 * 1_000_000_000;

/// Time left until the next minute boundary after `now`.
///
/// Exactly on a boundary this is a full minute: the boundary itself has
/// already been rendered.
pub fn until_next_minute(now: DateTime<Utc>) -> Duration {
    // nanosecond() exceeds 1e9 during a leap second.
    let nanos = now.nanosecond().min(999_999_999) as u64;
    let elapsed = now.second() as u64 * 1_000_000_000 + nanos;
    Duration::from_nanos(NANOS_PER_MINUTE - elapsed)
}

/// Render once, then once per elapsed minute.
///
/// `limit` bounds the number of per-minute ticks after the initial render;
/// `None` runs until the process is stopped. Returns the number of ticks
/// handled.
pub fn run<C, S>(face: &mut Face, clock: &C, surface: &mut S, limit: Option<usize>) -> Result<usize, FaceError>
where
    C: Clock + ?Sized,
    S: Surface + ?Sized,
{
    run_with(face, clock, surface, limit, std::thread::sleep)
}

/// [`run`] with a caller-supplied sleep.
pub fn run_with<C, S, F>(
    face: &mut Face,
    clock: &C,
    surface: &mut S,
    limit: Option<usize>,
    mut sleep: F,
) -> Result<usize, FaceError>
where
    C: Clock + ?Sized,
    S: Surface + ?Sized,
    F: FnMut(Duration),
{
    face.refresh(&clock.snapshot(), surface)?;

    let mut ticks = 0;
    while limit.is_none_or(|max| ticks < max) {
        let wait = until_next_minute(clock.now());
        debug!("sleeping {:?} until next tick", wait);
        sleep(wait);

        face.refresh(&clock.snapshot(), surface)?;
        ticks += 1;
    }

    info!("stopped after {} tick(s)", ticks);
    Ok(ticks)
}
