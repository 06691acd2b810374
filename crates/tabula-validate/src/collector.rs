//! Capped accumulation of validation results.

use std::ops::ControlFlow;

use tabula_ingest::Issue;
use tabula_model::{Level, ValidationReport};

/// Collects results for one file until the message cap is reached.
#[derive(Debug)]
pub struct MessageCollector {
    file: String,
    cap: usize,
    report: ValidationReport,
}

impl MessageCollector {
    pub fn new(file: impl Into<String>, cap: usize) -> Self {
        Self {
            file: file.into(),
            cap,
            report: ValidationReport::default(),
        }
    }

    /// True once infos + warnings + errors reached the cap.
    pub fn is_full(&self) -> bool {
        self.report.len() >= self.cap
    }

    /// Records `issue` unless the cap is reached.
    ///
    /// Returns `Break` when no further results will be accepted.
    pub fn push(&mut self, issue: &Issue) -> ControlFlow<()> {
        if self.is_full() {
            return ControlFlow::Break(());
        }
        let result = issue.to_result(&self.file);
        match result.level {
            Level::Info => self.report.infos.push(result),
            Level::Warning => self.report.warnings.push(result),
            Level::Error => self.report.errors.push(result),
        }
        if self.is_full() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    pub fn len(&self) -> usize {
        self.report.len()
    }

    pub fn is_empty(&self) -> bool {
        self.report.is_empty()
    }

    pub fn into_report(self) -> ValidationReport {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing(line: usize) -> Issue {
        Issue::MissingValue {
            line,
            column: 1,
            value: "*".into(),
        }
    }

    #[test]
    fn stops_at_cap() {
        let mut collector = MessageCollector::new("f", 2);
        assert!(collector.push(&missing(1)).is_continue());
        assert!(collector.push(&missing(2)).is_break());
        assert!(collector.push(&missing(3)).is_break());
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn zero_cap_accepts_nothing() {
        let mut collector = MessageCollector::new("f", 0);
        assert!(collector.is_full());
        assert!(collector.push(&Issue::EmptyFile).is_break());
        assert!(collector.is_empty());
    }

    #[test]
    fn results_are_grouped_by_level() {
        let mut collector = MessageCollector::new("f", 10);
        let _ = collector.push(&Issue::EmptyFile);
        let _ = collector.push(&missing(2));
        let _ = collector.push(&Issue::UnknownExcludedColumn { name: "q".into() });
        let report = collector.into_report();
        assert_eq!(report.infos.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.errors.len(), 1);
    }
}
