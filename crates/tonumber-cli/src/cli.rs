//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tonumber",
    version,
    about = "Normalize a spreadsheet region to integers",
    long_about = "Normalize the numeric region of an xlsx worksheet.\n\n\
                  Copies the source sheet to a target sheet once, then converts columns\n\
                  D-AA from row 2 down: missing markers become empty cells, numbers are\n\
                  truncated to integers, and everything else is left alone."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert the region of the target sheet in place and save the workbook.
    Convert(ConvertArgs),

    /// Check a converted target sheet cell by cell against its source.
    Validate(ValidateArgs),

    /// Summarize the first rows of every region column.
    Analyze(AnalyzeArgs),
}

/// Options shared by every subcommand.
#[derive(Args)]
pub struct WorkbookArgs {
    /// TOML file with conversion settings.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Workbook to operate on (default: ToNumber.xlsx).
    #[arg(long = "workbook", value_name = "PATH")]
    pub workbook: Option<PathBuf>,

    /// Sheet holding the raw data.
    #[arg(long = "source-sheet", value_name = "NAME")]
    pub source_sheet: Option<String>,

    /// Sheet receiving the converted data.
    #[arg(long = "target-sheet", value_name = "NAME")]
    pub target_sheet: Option<String>,

    /// Print the report as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub workbook: WorkbookArgs,

    /// Cells between progress updates.
    #[arg(long = "progress-interval", value_name = "CELLS")]
    pub progress_interval: Option<u64>,

    /// Hide the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub workbook: WorkbookArgs,

    /// Maximum number of issues listed individually.
    #[arg(long = "max-issues", value_name = "N", default_value_t = 50)]
    pub max_issues: usize,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub workbook: WorkbookArgs,

    /// Data rows inspected per column.
    #[arg(long = "rows", value_name = "N", default_value_t = 10)]
    pub rows: u32,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
