//! Core types shared by the tabula readers and validators.
//!
//! Nothing in this crate touches the filesystem. It holds the vocabulary the
//! other crates speak: delimiters, column plans, category dictionaries, the
//! [`Dataset`] sum type, and the leveled [`ValidationResult`] records.

pub mod category;
pub mod column;
pub mod dataset;
pub mod delimiter;
pub mod error;
pub mod options;
pub mod validation;

pub use category::{CategoryDictionary, MISSING_CATEGORY};
pub use column::{ColumnType, DataColumn, ordinal_name};
pub use dataset::{
    ContinuousData, CovarianceData, Dataset, DiscreteColumn, MISSING_CONTINUOUS, MixedData,
    VerticalDiscreteData,
};
pub use delimiter::{DataKind, Delimiter};
pub use error::{ModelError, Result};
pub use options::{
    ColumnExclusion, DEFAULT_CATEGORY_THRESHOLD, DEFAULT_COMMENT_MARKER, DEFAULT_MAX_MESSAGES,
    DEFAULT_MISSING_MARKER, ReaderOptions, ValidationOptions,
};
pub use validation::{AttributeKey, Level, MessageKind, ValidationReport, ValidationResult};
