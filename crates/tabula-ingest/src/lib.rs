//! Delimited statistical data ingestion.
//!
//! This crate turns delimited text files into typed [`Dataset`] values.
//!
//! # Pipeline
//!
//! - **Tokenizer**: split one line on a delimiter, honoring quotes, comments and blank lines
//! - **Delimiter Inference**: sample lines and pick the most consistent separator
//! - **Column Discovery**: read the header (or synthesize names), apply exclusions,
//!   then classify each retained column as continuous or discrete
//! - **Assembly**: re-scan the data rows into one of four dataset shapes
//!
//! Every pass reopens the [`DataSource`] from the beginning, so sources must be
//! re-readable.
//!
//! # Example
//!
//! ```ignore
//! use tabula_ingest::{FileSource, read_mixed};
//! use tabula_model::ReaderOptions;
//!
//! let source = FileSource::new("data/sim.txt");
//! let outcome = read_mixed(&source, &ReaderOptions::default())?;
//! println!("{} rows", outcome.dataset.num_rows());
//! ```
//!
//! [`Dataset`]: tabula_model::Dataset

mod assemble;
mod discovery;
mod error;
mod frame;
mod inference;
mod issue;
mod scan;
mod source;
mod tokenizer;

// === Error Types ===
pub use error::{IngestError, Result};

// === Input ===
pub use source::{DataSource, FileSource, MemorySource};
pub use tokenizer::{LineScanner, RawRecord, Tokenizer};

// === Delimiter Inference ===
pub use inference::{
    DEFAULT_SAMPLE_LINES, DelimiterScore, InferenceOptions, infer_delimiter, sample_lines,
    score_delimiters,
};

// === Column Discovery ===
pub use discovery::{
    ColumnPlan, DuplicateName, build_column_plan, classify, classify_columns, discover_columns,
};

// === Shared Row Grammar ===
pub use issue::Issue;
pub use scan::{ContinuousCell, DataRow, DataRowScanner, parse_continuous, parse_number};

// === Dataset Assembly ===
pub use assemble::{
    ReadOutcome, read_continuous, read_covariance, read_covariance_matrix, read_dataset,
    read_discrete, read_mixed,
};

// === Export ===
pub use frame::to_dataframe;
