// CLI module
// Command-line interface and argument parsing

mod args;

pub use args::{CliArgs, LogLevel, ModeArg, OutputFormat};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing input, or `--help`), clap
/// prints the message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
