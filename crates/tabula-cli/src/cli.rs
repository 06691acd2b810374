//! CLI argument definitions for the tabula data tools.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use tabula_cli::options::{DelimiterChoice, OptionOverrides};
use tabula_model::{DataKind, Delimiter};

#[derive(Parser)]
#[command(
    name = "tabula",
    version,
    about = "Load, validate, and inspect delimited statistical data files",
    long_about = "Load, validate, and inspect delimited statistical data files.\n\n\
                  Supports continuous, discrete, and mixed tables as well as\n\
                  lower-triangular covariance matrices."
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
    /// Read a file into a dataset and print a preview.
    Load(LoadArgs),

    /// Check a file and print every diagnostic found.
    Validate(ValidateArgs),

    /// Guess the delimiter of a file.
    Sniff(SniffArgs),
}

/// Options shared by `load` and `validate`.
#[derive(Args)]
pub struct ReaderArgs {
    /// Delimited data file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// JSON options file; command-line flags override its values.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Dataset shape to read.
    #[arg(long = "kind", value_enum)]
    pub kind: Option<KindArg>,

    /// Field delimiter, or `auto` to infer it from the file.
    #[arg(long = "delimiter", short = 'd', value_enum)]
    pub delimiter: Option<DelimiterArg>,

    /// Treat the first content line as data and name columns by position.
    #[arg(long = "no-header")]
    pub no_header: bool,

    /// Quote character stripped from field boundaries.
    #[arg(long = "quote", value_name = "CHAR", conflicts_with = "no_quote")]
    pub quote: Option<char>,

    /// Disable quote handling.
    #[arg(long = "no-quote")]
    pub no_quote: bool,

    /// Lines starting with this marker are skipped.
    #[arg(long = "comment", value_name = "MARKER", conflicts_with = "no_comment")]
    pub comment: Option<String>,

    /// Disable comment skipping.
    #[arg(long = "no-comment")]
    pub no_comment: bool,

    /// Token meaning "missing" (repeatable; replaces the configured set).
    #[arg(long = "missing", value_name = "TOKEN")]
    pub missing: Vec<String>,

    /// Largest distinct-value count classified as discrete in mixed files.
    #[arg(long = "category-threshold", value_name = "N")]
    pub category_threshold: Option<usize>,

    /// Zero-based source column position to drop (repeatable).
    #[arg(long = "exclude-index", value_name = "INDEX", conflicts_with = "exclude_name")]
    pub exclude_index: Vec<usize>,

    /// Header name of a column to drop (repeatable).
    #[arg(long = "exclude-name", value_name = "NAME")]
    pub exclude_name: Vec<String>,
}

#[derive(Args)]
pub struct LoadArgs {
    #[command(flatten)]
    pub reader: ReaderArgs,

    /// Number of data rows to preview.
    #[arg(long = "rows", value_name = "N", default_value_t = 10)]
    pub rows: usize,

    /// Print the dataset as a polars DataFrame instead of a table.
    #[arg(long = "dataframe")]
    pub dataframe: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub reader: ReaderArgs,

    /// Stop after this many diagnostics (0 skips the data pass).
    #[arg(long = "max-messages", value_name = "N")]
    pub max_messages: Option<usize>,

    /// Report output format.
    #[arg(long = "report-format", value_enum, default_value = "table")]
    pub report_format: ReportFormatArg,
}

#[derive(Args)]
pub struct SniffArgs {
    /// Delimited data file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Maximum number of content lines to sample.
    #[arg(long = "max-lines", value_name = "N")]
    pub max_lines: Option<usize>,

    /// Comment marker for lines to skip while sampling.
    #[arg(long = "comment", value_name = "MARKER")]
    pub comment: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Continuous,
    Discrete,
    Mixed,
    Covariance,
}

impl From<KindArg> for DataKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Continuous => DataKind::Continuous,
            KindArg::Discrete => DataKind::Discrete,
            KindArg::Mixed => DataKind::Mixed,
            KindArg::Covariance => DataKind::Covariance,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DelimiterArg {
    Auto,
    Tab,
    Comma,
    Space,
    Colon,
    Semicolon,
    Pipe,
    Whitespace,
}

impl From<DelimiterArg> for DelimiterChoice {
    fn from(arg: DelimiterArg) -> Self {
        match arg {
            DelimiterArg::Auto => DelimiterChoice::Infer,
            DelimiterArg::Tab => DelimiterChoice::Fixed(Delimiter::Tab),
            DelimiterArg::Comma => DelimiterChoice::Fixed(Delimiter::Comma),
            DelimiterArg::Space => DelimiterChoice::Fixed(Delimiter::Space),
            DelimiterArg::Colon => DelimiterChoice::Fixed(Delimiter::Colon),
            DelimiterArg::Semicolon => DelimiterChoice::Fixed(Delimiter::Semicolon),
            DelimiterArg::Pipe => DelimiterChoice::Fixed(Delimiter::Pipe),
            DelimiterArg::Whitespace => DelimiterChoice::Fixed(Delimiter::Whitespace),
        }
    }
}

impl ReaderArgs {
    /// Flags that override the options file.
    pub fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            kind: self.kind.map(DataKind::from),
            delimiter: self.delimiter.map(DelimiterChoice::from),
            no_header: self.no_header,
            quote: if self.no_quote {
                Some(None)
            } else {
                self.quote.map(Some)
            },
            comment: if self.no_comment {
                Some(None)
            } else {
                self.comment.clone().map(Some)
            },
            missing: self.missing.clone(),
            category_threshold: self.category_threshold,
            exclude_indices: self.exclude_index.clone(),
            exclude_names: self.exclude_name.clone(),
            max_messages: None,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
    Csv,
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
