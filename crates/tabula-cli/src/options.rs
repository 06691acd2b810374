//! Options file loading and command-line overlay.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use tabula_ingest::{DataSource, InferenceOptions, infer_delimiter};
use tabula_model::{ColumnExclusion, DataKind, Delimiter, ValidationOptions};

/// Fixed delimiter or inference from the file contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterChoice {
    Infer,
    Fixed(Delimiter),
}

/// Values given on the command line. `None` and empty keep the loaded value.
///
/// `quote` and `comment` are doubly optional: `Some(None)` disables the
/// feature.
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub kind: Option<DataKind>,
    pub delimiter: Option<DelimiterChoice>,
    pub no_header: bool,
    pub quote: Option<Option<char>>,
    pub comment: Option<Option<String>>,
    pub missing: Vec<String>,
    pub category_threshold: Option<usize>,
    pub exclude_indices: Vec<usize>,
    pub exclude_names: Vec<String>,
    pub max_messages: Option<usize>,
}

/// Reads a JSON options file, or the defaults when no path is given.
///
/// Missing keys take their default values.
pub fn load_options(path: Option<&Path>) -> Result<ValidationOptions> {
    let Some(path) = path else {
        return Ok(ValidationOptions::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("read options file {}", path.display()))?;
    let options = serde_json::from_str(&text)
        .with_context(|| format!("parse options file {}", path.display()))?;
    debug!(path = %path.display(), "options file loaded");
    Ok(options)
}

impl OptionOverrides {
    /// Applies the flags to `options`, inferring the delimiter last so it
    /// sees the final quote and comment settings.
    pub fn apply(&self, options: &mut ValidationOptions, source: &dyn DataSource) -> Result<()> {
        let reader = &mut options.reader;
        if let Some(kind) = self.kind {
            options.kind = kind;
        }
        if self.no_header {
            reader.has_header = false;
        }
        if let Some(quote) = self.quote {
            reader.quote_char = quote;
        }
        if let Some(comment) = &self.comment {
            reader.comment_marker = comment.clone();
        }
        if !self.missing.is_empty() {
            reader.missing_markers = self.missing.iter().cloned().collect();
        }
        if let Some(threshold) = self.category_threshold {
            reader.category_threshold = threshold;
        }
        if !self.exclude_indices.is_empty() {
            reader.excluded_columns = ColumnExclusion::indices(self.exclude_indices.iter().copied());
        } else if !self.exclude_names.is_empty() {
            reader.excluded_columns = ColumnExclusion::names(self.exclude_names.iter().cloned());
        }
        if let Some(max_messages) = self.max_messages {
            options.max_messages = max_messages;
        }

        match self.delimiter {
            Some(DelimiterChoice::Fixed(delimiter)) => reader.delimiter = delimiter,
            Some(DelimiterChoice::Infer) => {
                let inference = InferenceOptions::from_reader(reader);
                let delimiter = infer_delimiter(source, &inference)
                    .with_context(|| format!("infer delimiter of {}", source.name()))?;
                info!(file = source.name(), delimiter = %delimiter, "delimiter inferred");
                reader.delimiter = delimiter;
            }
            None => {}
        }
        Ok(())
    }
}
