mod render;

use log::info;
use std::io::{self, IsTerminal};
use worldface::{
    Clock, Config, Face, FaceError, FixedClock, SystemClock, Zone, ZoneConfig, parse_config,
    parse_reference, run,
};

use crate::render::TerminalSurface;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("worldface=info")).init();

    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run_face(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

struct CliConfig {
    config_path: Option<String>,
    zones: Vec<Zone>,
    date_line: Option<bool>,
    reference: Option<FixedClock>,
    ticks: Option<usize>,
    color: Option<bool>,
}

fn run_face(cli: CliConfig) -> Result<(), FaceError> {
    let mut config = match &cli.config_path {
        Some(path) => parse_config(path)?,
        None => Config::default(),
    };
    if !cli.zones.is_empty() {
        config.zones = ZoneConfig::new(cli.zones);
    }
    if let Some(date_line) = cli.date_line {
        config.date_line = date_line;
    }
    if cli.color.is_some() {
        config.color = cli.color;
    }

    let color = config.color.unwrap_or_else(|| io::stdout().is_terminal());
    let mut surface = TerminalSurface::new(io::stdout(), color);
    info!("showing {} zone(s)", config.zones.len());

    let lines = config.lines();
    let mut face = Face::new(config.zones, lines, &mut surface);
    let clock: Box<dyn Clock> = match cli.reference {
        Some(fixed) => Box::new(fixed),
        None => Box::new(SystemClock),
    };
    // A fixed reference never advances, so there is nothing to tick towards.
    let limit = if cli.reference.is_some() { Some(0) } else { cli.ticks };

    run(&mut face, clock.as_ref(), &mut surface, limit)?;
    face.teardown(&mut surface)
}

fn parse_args() -> Result<CliConfig, String> {
    let mut cli =
        CliConfig { config_path: None, zones: Vec::new(), date_line: None, reference: None, ticks: None, color: None };
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| -> Result<String, String> {
            match &inline {
                Some(v) => Ok(v.clone()),
                None => args.next().ok_or_else(|| format!("error: {name} expects a value")),
            }
        };

        match flag.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("worldface {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => cli.color = Some(true),
            "--no-color" => cli.color = Some(false),
            "--date" => cli.date_line = Some(true),
            "--no-date" => cli.date_line = Some(false),
            "--once" => cli.ticks = Some(0),
            "-c" | "--config" => {
                if cli.config_path.is_some() {
                    return Err("error: config provided multiple times".to_string());
                }
                cli.config_path = Some(value("--config")?);
            }
            "-z" | "--zone" => {
                let spec = value("--zone")?;
                let zone = Zone::parse(&spec).map_err(|err| format!("error: {err}"))?;
                cli.zones.push(zone);
            }
            "--at" => {
                let at = value("--at")?;
                let reference = parse_reference(&at).map_err(|err| format!("error: {err}"))?;
                cli.reference = Some(FixedClock::from_naive_utc(reference));
            }
            "--ticks" => {
                let raw = value("--ticks")?;
                let ticks = raw.parse::<usize>().map_err(|_| format!("error: invalid --ticks '{raw}' (expected a count)"))?;
                cli.ticks = Some(ticks);
            }
            _ => {
                return Err(format!("error: unknown option '{arg}'\n\n{}", help_text()));
            }
        }
    }

    Ok(cli)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "worldface {version}

World clock face: one HH:MM row per zone, refreshed every minute.

Usage:
  worldface [OPTIONS]

Options:
  -c, --config <path>        TOML config file (zones, date_line, color).
  -z, --zone <spec>          Show a zone; repeatable, replaces configured zones.
                             LABEL=OFFSET (TOK=+9), UTC+N/GMT-N, or a known
                             abbreviation (JST, PST). Whole hours only.
  --date                     Show the UTC date line.
  --no-date                  Hide the UTC date line.
  --at <timestamp>           Render a fixed UTC instant once ({reference_format}).
  --once                     Render once and exit.
  --ticks <n>                Exit after n minute ticks.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Logging is controlled with RUST_LOG (default: worldface=info).

Exit codes:
  0  Success.
  1  Runtime error (config file, terminal).
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        reference_format = "YYYY-MM-DDTHH:MM:SS"
    )
}
