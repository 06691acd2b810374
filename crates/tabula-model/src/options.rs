//! Configuration for readers and validators.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::delimiter::{DataKind, Delimiter};

/// Default missing-value marker.
pub const DEFAULT_MISSING_MARKER: &str = "*";

/// Default comment prefix.
pub const DEFAULT_COMMENT_MARKER: &str = "//";

/// Columns with at most this many distinct values are discrete.
pub const DEFAULT_CATEGORY_THRESHOLD: usize = 10;

/// Default validation message cap.
pub const DEFAULT_MAX_MESSAGES: usize = 100;

/// Columns removed before classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnExclusion {
    #[default]
    None,
    /// Zero-based source positions. Out-of-range entries are ignored.
    Indices(Vec<usize>),
    /// Header names, matched exactly.
    Names(BTreeSet<String>),
}

impl ColumnExclusion {
    pub fn indices<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        Self::Indices(indices.into_iter().collect())
    }

    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Names(names.into_iter().map(Into::into).collect())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Options shared by every tabular and covariance read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    pub delimiter: Delimiter,
    /// Whether the first content line names the columns.
    pub has_header: bool,
    /// Character bounding quoted fields; stripped from tokens.
    pub quote_char: Option<char>,
    /// Lines starting with this prefix are skipped.
    pub comment_marker: Option<String>,
    /// Tokens read as "missing".
    pub missing_markers: BTreeSet<String>,
    pub category_threshold: usize,
    pub excluded_columns: ColumnExclusion,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::default(),
            has_header: true,
            quote_char: Some('"'),
            comment_marker: Some(DEFAULT_COMMENT_MARKER.to_string()),
            missing_markers: BTreeSet::from([DEFAULT_MISSING_MARKER.to_string()]),
            category_threshold: DEFAULT_CATEGORY_THRESHOLD,
            excluded_columns: ColumnExclusion::None,
        }
    }
}

impl ReaderOptions {
    pub fn new(delimiter: Delimiter) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_quote_char(mut self, quote_char: Option<char>) -> Self {
        self.quote_char = quote_char;
        self
    }

    pub fn with_comment_marker(mut self, marker: Option<String>) -> Self {
        self.comment_marker = marker;
        self
    }

    pub fn with_missing_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category_threshold(mut self, threshold: usize) -> Self {
        self.category_threshold = threshold;
        self
    }

    pub fn with_excluded_columns(mut self, exclusion: ColumnExclusion) -> Self {
        self.excluded_columns = exclusion;
        self
    }

    pub fn is_missing(&self, token: &str) -> bool {
        self.missing_markers.contains(token)
    }
}

/// Options for a validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    pub reader: ReaderOptions,
    pub kind: DataKind,
    /// Cap on infos + warnings + errors; 0 disables the data pass.
    pub max_messages: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            reader: ReaderOptions::default(),
            kind: DataKind::default(),
            max_messages: DEFAULT_MAX_MESSAGES,
        }
    }
}

impl ValidationOptions {
    pub fn new(kind: DataKind, reader: ReaderOptions) -> Self {
        Self {
            reader,
            kind,
            max_messages: DEFAULT_MAX_MESSAGES,
        }
    }

    pub fn with_max_messages(mut self, max_messages: usize) -> Self {
        self.max_messages = max_messages;
        self
    }
}
