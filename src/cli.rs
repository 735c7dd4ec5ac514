//! Command-line interface for rebound.
//!
//! Uses lexopt for minimal binary size overhead (~34KB).

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::execution::Command;
use crate::language::Language;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Working directory for the target program.
    pub cwd: Option<PathBuf>,
    /// Separator used to join captured lines.
    pub separator: Option<String>,
    /// Skip the search step.
    pub no_search: bool,
    /// Strip ANSI escapes from captured output.
    pub strip_ansi: bool,
    /// Target file or program, followed by its arguments.
    pub target: Vec<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// What to run, resolved from the positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub command: Command,
    pub language: Option<Language>,
}

impl Args {
    /// Resolve the positional arguments into a command.
    ///
    /// A first token with a known source extension (`app.py`) is run
    /// with its interpreter; anything else is executed as a program
    /// with the remaining tokens as its arguments.
    pub fn resolve_target(&self) -> Result<Target, ArgsError> {
        let (first, rest) = self.target.split_first().ok_or(ArgsError::MissingTarget)?;

        let (mut command, language) = match Language::from_path(Path::new(first)) {
            Some(language) => (language.command_for(Path::new(first), rest), Some(language)),
            None => {
                let command = Command::from_argv(self.target.iter().cloned())
                    .map_err(|_| ArgsError::MissingTarget)?;
                let language = Language::from_program(&command.program);
                (command, language)
            }
        };

        if let Some(ref dir) = self.cwd {
            command = command.working_dir(dir);
        }

        Ok(Target { command, language })
    }
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
///
/// Option parsing stops at the first positional argument; everything
/// after it belongs to the target.
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Short('C') | Long("cwd") => {
                result.cwd = Some(parser.value()?.parse()?);
            }
            Short('s') | Long("separator") => {
                result.separator = Some(parser.value()?.parse()?);
            }
            Long("no-search") => {
                result.no_search = true;
            }
            Long("strip-ansi") => {
                result.strip_ansi = true;
            }
            Value(val) => {
                result.target.push(into_string(val)?);
                for raw in parser.raw_args()? {
                    result.target.push(into_string(raw)?);
                }
                break;
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

fn into_string(value: OsString) -> Result<String, ArgsError> {
    value
        .into_string()
        .map_err(|v| ArgsError::InvalidValue("argument", v.to_string_lossy().into_owned()))
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"rebound {version}
Run a program, mirror its output, and look up the error it fails with

USAGE:
    rebound [OPTIONS] <FILE> [ARGS...]
    rebound [OPTIONS] [--] <PROGRAM> [ARGS...]

OPTIONS:
    -c, --config <FILE>      Path to configuration file (JSON)
    -l, --log-level <LVL>    Log level (error, warn, info, debug, trace)
    -C, --cwd <DIR>          Working directory for the target
    -s, --separator <SEP>    Separator used to join captured lines [default: " "]
        --strip-ansi         Strip color codes from captured output
        --no-search          Only run the target, skip the search
    -h, --help               Print help
    -V, --version            Print version

SUPPORTED FILES:
    .py (python3)  .js (node)  .rb (ruby)  .go (go run)  .java (javac)

ENVIRONMENT VARIABLES:
    REBOUND_SEPARATOR        Join separator (overrides config)
    REBOUND_SEARCH_URL       Search endpoint (overrides config)
    REBOUND_NO_SEARCH        Disable search when set to 1 or true
    REBOUND_LOG_LEVEL        Log level (overrides config)
    RUST_LOG                 Alternative log level setting

EXAMPLES:
    # Run a Python script with arguments
    rebound app.py --input data.csv

    # Run an arbitrary program
    rebound -- cargo run

    # Capture without searching
    rebound --no-search main.go
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("rebound {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// No file or program was given.
    MissingTarget,
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for {}: '{}'", name, value)
            }
            Self::MissingTarget => write!(f, "no file or program to run (see --help)"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
