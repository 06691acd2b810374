use tracing::{info, info_span, warn};

use tabula_ingest::{DataSource, IngestError, Issue};
use tabula_model::{DataKind, ValidationOptions, ValidationReport, ValidationResult};

use crate::collector::MessageCollector;
use crate::covariance::validate_covariance;
use crate::tabular::validate_tabular;

/// Validates files of one data kind under fixed options.
///
/// Results from the last [`validate`](Self::validate) call stay available
/// through the accessors until the next call replaces them.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidationOptions,
    report: ValidationReport,
}

impl Validator {
    pub fn new(options: ValidationOptions) -> Self {
        Self {
            options,
            report: ValidationReport::default(),
        }
    }

    /// Runs one diagnostic pass over `source`.
    ///
    /// Never fails: input errors become a single ERROR result. Scanning stops
    /// once the number of results reaches `max_messages`.
    pub fn validate(&mut self, source: &dyn DataSource) -> &ValidationReport {
        self.report = ValidationReport::default();
        if self.options.max_messages == 0 {
            return &self.report;
        }

        let span = info_span!(
            "validate",
            file = source.name(),
            kind = %self.options.kind
        );
        let _guard = span.enter();

        let mut collector = MessageCollector::new(source.name(), self.options.max_messages);
        let outcome = match self.options.kind {
            DataKind::Covariance => {
                validate_covariance(source, &self.options.reader, &mut collector)
            }
            DataKind::Continuous | DataKind::Discrete | DataKind::Mixed => {
                validate_tabular(source, &self.options, &mut collector)
            }
        };
        if let Err(err) = outcome {
            warn!(error = %err, "validation pass aborted");
            let _ = collector.push(&fatal_issue(&err));
        }
        let capped = collector.is_full();

        self.report = collector.into_report();
        info!(
            infos = self.report.infos.len(),
            warnings = self.report.warnings.len(),
            errors = self.report.errors.len(),
            capped,
            "validation complete"
        );
        &self.report
    }

    pub fn infos(&self) -> &[ValidationResult] {
        &self.report.infos
    }

    pub fn warnings(&self) -> &[ValidationResult] {
        &self.report.warnings
    }

    pub fn errors(&self) -> &[ValidationResult] {
        &self.report.errors
    }

    /// Infos, then warnings, then errors.
    pub fn results(&self) -> impl Iterator<Item = &ValidationResult> {
        self.report.results()
    }

    pub fn has_errors(&self) -> bool {
        self.report.has_errors()
    }

    pub fn report(&self) -> ValidationReport {
        self.report.clone()
    }
}

fn fatal_issue(err: &IngestError) -> Issue {
    match err {
        IngestError::EmptyFile { .. } => Issue::EmptyFile,
        other => Issue::FileIo {
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_ingest::MemorySource;
    use tabula_model::{MessageKind, ReaderOptions};

    fn validator(kind: DataKind) -> Validator {
        Validator::new(ValidationOptions::new(kind, ReaderOptions::default()))
    }

    #[test]
    fn non_utf8_source_is_one_file_error() {
        let mut validator = validator(DataKind::Continuous);
        validator.validate(&MemorySource::new("w.csv", b"a,b\n1,\xff\n".to_vec()));
        assert_eq!(validator.errors().len(), 1);
        assert_eq!(validator.errors()[0].kind, MessageKind::FileIoError);
        assert!(validator.errors()[0].message.contains("unsupported encoding"));
    }

    #[test]
    fn empty_source_is_one_error() {
        let mut validator = validator(DataKind::Continuous);
        validator.validate(&MemorySource::new("e.csv", "\n// only a comment\n"));
        assert_eq!(validator.errors().len(), 1);
        assert_eq!(validator.errors()[0].kind, MessageKind::EmptyFile);
    }

    #[test]
    fn results_reset_between_calls() {
        let mut validator = validator(DataKind::Continuous);
        validator.validate(&MemorySource::new("a.csv", "x,y\n1\n2\n"));
        assert_eq!(validator.errors().len(), 2);
        validator.validate(&MemorySource::new("b.csv", "x,y\n1,2\n"));
        assert!(validator.results().next().is_none());
    }

    #[test]
    fn fatal_mapping() {
        let err = IngestError::FileNotFound {
            path: "gone.csv".into(),
        };
        assert!(matches!(fatal_issue(&err), Issue::FileIo { .. }));
        let err = IngestError::EmptyFile {
            path: "e.csv".into(),
        };
        assert_eq!(fatal_issue(&err), Issue::EmptyFile);
    }
}
