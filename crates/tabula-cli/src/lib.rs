//! CLI library components for the tabula data tools.

pub mod logging;
pub mod options;
pub mod preview;
pub mod report;
