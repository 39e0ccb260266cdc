use std::io::Write;

use worldface::{FaceError, Slot, Surface};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn enabled(&self) -> bool {
            self.enabled
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// Width of the right-aligned name column.
const NAME_COLUMN: usize = 8;
/// Gap between the name and time columns.
const COLUMN_GAP: usize = 2;

/// Draws the face as a two-column block on a terminal.
///
/// With color enabled the previous frame is overwritten in place, otherwise
/// every frame is appended.
pub struct TerminalSurface<W: Write> {
    out: W,
    palette: ansi::Palette,
    names: Vec<String>,
    times: Vec<String>,
    date: Option<String>,
    drawn: usize,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, color: bool) -> Self {
        TerminalSurface {
            out,
            palette: ansi::Palette::new(color),
            names: Vec::new(),
            times: Vec::new(),
            date: None,
            drawn: 0,
        }
    }

    fn frame(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.names.len() + 1);
        for (idx, name) in self.names.iter().enumerate() {
            let time = self.times.get(idx).map(String::as_str).unwrap_or("--:--");
            lines.push(format!(
                "{}{}{}",
                self.palette.dim(format!("{:>width$}", name, width = NAME_COLUMN)),
                " ".repeat(COLUMN_GAP),
                self.palette.bold(time),
            ));
        }
        if let Some(date) = &self.date {
            lines.push(self.palette.paint(format!("{:>width$}", date, width = NAME_COLUMN + COLUMN_GAP + 5), ansi::CYAN));
        }
        lines
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

fn set_slot(labels: &mut Vec<String>, idx: usize, text: &str) {
    if labels.len() <= idx {
        labels.resize(idx + 1, String::new());
    }
    labels[idx] = text.to_string();
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn set_text(&mut self, slot: Slot, text: &str) {
        match slot {
            Slot::Name(idx) => set_slot(&mut self.names, idx, text),
            Slot::Time(idx) => set_slot(&mut self.times, idx, text),
            Slot::Date => self.date = Some(text.to_string()),
        }
    }

    fn present(&mut self) -> Result<(), FaceError> {
        let lines = self.frame();
        if self.palette.enabled() && self.drawn > 0 {
            // Move back over the previous frame and erase it.
            write!(self.out, "\x1b[{}A\x1b[J", self.drawn)?;
        } else if self.drawn > 0 {
            writeln!(self.out, "{}", self.palette.paint("--", ansi::GRAY))?;
        }
        for line in &lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        self.drawn = lines.len();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), FaceError> {
        self.names.clear();
        self.times.clear();
        self.date = None;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_frame_aligns_columns() {
        let mut surface = TerminalSurface::new(Vec::new(), false);
        surface.set_text(Slot::Name(0), "UTC");
        surface.set_text(Slot::Name(1), "BKK");
        surface.set_text(Slot::Time(0), "23:10");
        surface.set_text(Slot::Time(1), "06:10");
        surface.set_text(Slot::Date, "Mon 3 Jun");
        surface.present().unwrap();

        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(out, "     UTC  23:10\n     BKK  06:10\n      Mon 3 Jun\n");
    }

    #[test]
    fn missing_time_shows_placeholder() {
        let mut surface = TerminalSurface::new(Vec::new(), false);
        surface.set_text(Slot::Name(0), "TOK");
        surface.present().unwrap();

        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(out, "     TOK  --:--\n");
    }

    #[test]
    fn plain_frames_are_separated() {
        let mut surface = TerminalSurface::new(Vec::new(), false);
        surface.set_text(Slot::Name(0), "UTC");
        surface.set_text(Slot::Time(0), "00:00");
        surface.present().unwrap();
        surface.set_text(Slot::Time(0), "00:01");
        surface.present().unwrap();

        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(out, "     UTC  00:00\n--\n     UTC  00:01\n");
    }
}
