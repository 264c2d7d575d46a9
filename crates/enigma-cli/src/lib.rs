// enigma-cli: text formats and shared utilities for the command-line driver.
//
// - `config`   -- machine configuration file (alphabet, counts, rotor catalog)
// - `settings` -- `*` lines that choose rotors, positions and plugboard
// - `session`  -- message processing over a stream of input lines
// - `format`   -- five-symbol output grouping

pub mod config;
pub mod format;
pub mod session;
pub mod settings;

use std::process;

use enigma_machine::MachineError;

pub use config::{MachineConfig, read_config};
pub use format::{GROUP_WIDTH, group, render};
pub use session::process;
pub use settings::Settings;

/// Error type for everything the command-line driver reads.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A problem in the configuration file.
    #[error("configuration line {line}: {message}")]
    Config { line: usize, message: String },

    /// The configuration file ended early.
    #[error("configuration file truncated: expected {0}")]
    Truncated(&'static str),

    /// A malformed `*` settings line.
    #[error("input line {line}: {message}")]
    Settings { line: usize, message: String },

    /// A message line appeared before any settings line.
    #[error("input line {line}: message given before any settings line")]
    MissingSettings { line: usize },

    /// The machine rejected a setting or a message symbol.
    #[error("input line {line}: {source}")]
    Input { line: usize, source: MachineError },

    #[error(transparent)]
    Machine(#[from] MachineError),

    #[error("could not open {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),
}

/// Install a stderr `tracing` subscriber filtered by `RUST_LOG`.
///
/// Defaults to `warn`, so nothing is printed during a normal run.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("Error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
