//! Validation of delimited data files without building a dataset.
//!
//! The [`Validator`] runs the same column discovery and row grammar as the
//! readers in `tabula-ingest`, but every condition becomes a leveled
//! [`ValidationResult`](tabula_model::ValidationResult) instead of a skipped
//! row. Only input failures end a pass early, and they too are reported as
//! results.

mod collector;
mod covariance;
mod engine;
mod tabular;

pub use collector::MessageCollector;
pub use engine::Validator;
