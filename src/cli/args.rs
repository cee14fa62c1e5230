use crate::types::{AllocationMode, Cents, SplitOptions};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Split a restaurant bill into exact per-person totals
#[derive(Parser, Debug)]
#[command(name = "split-engine")]
#[command(about = "Split a restaurant bill into exact per-person totals", long_about = None)]
pub struct CliArgs {
    /// Input JSON file containing the receipt, group and assignments
    #[arg(value_name = "INPUT", help = "Path to the JSON split request")]
    pub input_file: PathBuf,

    /// Report format written to stdout
    #[arg(
        long = "format",
        value_name = "FORMAT",
        default_value = "csv",
        help = "Output format: 'csv' for one row per person or 'json' for the full breakdown"
    )]
    pub format: OutputFormat,

    #[arg(long = "tax-mode", value_name = "MODE", help = "Override how tax is allocated")]
    pub tax_mode: Option<ModeArg>,

    #[arg(long = "tip-mode", value_name = "MODE", help = "Override how the tip is allocated")]
    pub tip_mode: Option<ModeArg>,

    #[arg(
        long = "discount-mode",
        value_name = "MODE",
        help = "Override how the discount is allocated"
    )]
    pub discount_mode: Option<ModeArg>,

    #[arg(
        long = "fee-mode",
        value_name = "MODE",
        help = "Override how the service fee is allocated"
    )]
    pub fee_mode: Option<ModeArg>,

    /// Largest reconciliation difference absorbed, in cents
    #[arg(
        long = "max-residual",
        value_name = "CENTS",
        help = "Largest reconciliation difference absorbed (default: number of people)"
    )]
    pub max_residual: Option<Cents>,

    /// Take unassigned items off the bill instead of failing
    #[arg(
        long = "exclude-unassigned",
        help = "Drop items nobody shares and reduce the receipt total by their line totals"
    )]
    pub exclude_unassigned: bool,

    /// Log verbosity; `RUST_LOG` takes precedence when set
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level written to stderr (overridden by RUST_LOG)"
    )]
    pub log_level: LogLevel,
}

/// Available report formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

/// Pool allocation mode as given on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Proportional,
    Even,
}

impl From<ModeArg> for AllocationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Proportional => AllocationMode::Proportional,
            ModeArg::Even => AllocationMode::Even,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl CliArgs {
    /// Apply command-line overrides on top of the request's options
    ///
    /// Flags that were not given leave the request's value untouched.
    pub fn apply_overrides(&self, options: SplitOptions) -> SplitOptions {
        SplitOptions {
            tax_mode: self.tax_mode.map_or(options.tax_mode, Into::into),
            tip_mode: self.tip_mode.map_or(options.tip_mode, Into::into),
            discount_mode: self.discount_mode.map_or(options.discount_mode, Into::into),
            fee_mode: self.fee_mode.map_or(options.fee_mode, Into::into),
            max_residual: self.max_residual.or(options.max_residual),
        }
    }
}
