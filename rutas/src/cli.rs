//! Command-line arguments.

use std::fmt;

use rutas_core::Position;

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    pub config_path: Option<String>,
    pub map_path: Option<String>,
    pub script_path: Option<String>,
    pub start: Option<Position>,
    pub end: Option<Position>,
    pub verify: bool,
    pub help: bool,
}

/// A command line that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    Unknown(String),
    MissingValue(&'static str),
    BadPosition(String),
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(a) => write!(f, "unknown argument: {a}"),
            Self::MissingValue(flag) => write!(f, "{flag} needs a value"),
            Self::BadPosition(s) => write!(f, "expected ROW,COL, got \u{201c}{s}\u{201d}"),
        }
    }
}

impl std::error::Error for ArgError {}

/// Parse `ROW,COL`.
pub fn parse_position(s: &str) -> Result<Position, ArgError> {
    let bad = || ArgError::BadPosition(s.to_string());
    let (r, c) = s.split_once(',').ok_or_else(bad)?;
    let row = r.trim().parse().map_err(|_| bad())?;
    let col = c.trim().parse().map_err(|_| bad())?;
    Ok(Position::new(row, col))
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I, S>(args: I) -> Result<Args, ArgError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result = Args::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        let arg = arg.as_ref();
        let mut value = |flag: &'static str| {
            it.next()
                .map(|v| v.as_ref().to_string())
                .ok_or(ArgError::MissingValue(flag))
        };
        match arg {
            "-c" | "--config" => result.config_path = Some(value("--config")?),
            "-m" | "--map" => result.map_path = Some(value("--map")?),
            "-s" | "--script" => result.script_path = Some(value("--script")?),
            "--start" => result.start = Some(parse_position(&value("--start")?)?),
            "--end" => result.end = Some(parse_position(&value("--end")?)?),
            "--verify" => result.verify = true,
            "-h" | "--help" => result.help = true,
            _ => return Err(ArgError::Unknown(arg.to_string())),
        }
    }
    Ok(result)
}

/// Usage text.
pub fn help_text() -> &'static str {
    "\
rutas - shortest routes around obstacles on a grid

USAGE:
    rutas [OPTIONS]

OPTIONS:
    -c, --config <FILE>     Configuration file (default: rutas.toml if present)
    -m, --map <FILE>        ASCII map: . open, ~ water, # building, o pothole,
                            S start, E end (default: generated from config)
    -s, --script <FILE>     Edit script: place X Y KIND, erase X Y, done,
                            click X Y (pixel coordinates)
        --start <ROW,COL>   Start cell, overriding map and script
        --end <ROW,COL>     End cell, overriding map and script
        --verify            Check the route length against breadth-first search
    -h, --help              Print help information

Logging is controlled with RUST_LOG (default: info)."
}
