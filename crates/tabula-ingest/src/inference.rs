//! Delimiter inference from sampled lines.

use std::collections::HashMap;
use std::io::BufRead;

use serde::Serialize;
use tracing::debug;

use tabula_model::{DEFAULT_COMMENT_MARKER, Delimiter, ReaderOptions};

use crate::error::{IngestError, Result};
use crate::source::{DataSource, open_utf8};
use crate::tokenizer::Tokenizer;

/// Content lines sampled by default.
pub const DEFAULT_SAMPLE_LINES: usize = 10_000;

/// Settings for [`infer_delimiter`].
#[derive(Debug, Clone)]
pub struct InferenceOptions {
    pub candidates: Vec<Delimiter>,
    /// Maximum number of content lines sampled.
    pub max_lines: usize,
    pub quote_char: Option<char>,
    pub comment_marker: Option<String>,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            candidates: vec![
                Delimiter::Tab,
                Delimiter::Space,
                Delimiter::Comma,
                Delimiter::Colon,
                Delimiter::Semicolon,
                Delimiter::Pipe,
            ],
            max_lines: DEFAULT_SAMPLE_LINES,
            quote_char: Some('"'),
            comment_marker: Some(DEFAULT_COMMENT_MARKER.to_string()),
        }
    }
}

impl InferenceOptions {
    /// Quote and comment settings taken from reader options.
    pub fn from_reader(options: &ReaderOptions) -> Self {
        Self {
            quote_char: options.quote_char,
            comment_marker: options.comment_marker.clone(),
            ..Self::default()
        }
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn with_candidates(mut self, candidates: Vec<Delimiter>) -> Self {
        self.candidates = candidates;
        self
    }
}

/// Field-count consistency of one candidate over the sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DelimiterScore {
    pub delimiter: Delimiter,
    /// Most frequent field count (larger count wins frequency ties).
    pub modal_count: usize,
    /// Sampled lines whose field count differs from the mode.
    pub deviating_lines: usize,
    /// Largest field count seen on any line.
    pub max_count: usize,
}

impl DelimiterScore {
    /// A candidate counts only if it splits at least one line.
    pub fn is_eligible(&self) -> bool {
        self.max_count > 1
    }

    fn rank(&self) -> (bool, usize, usize) {
        (
            self.modal_count <= 1,
            self.deviating_lines,
            self.delimiter.priority(),
        )
    }
}

/// Scores every candidate over the given content lines.
pub fn score_delimiters(lines: &[String], options: &InferenceOptions) -> Vec<DelimiterScore> {
    options
        .candidates
        .iter()
        .map(|&delimiter| {
            let tokenizer = Tokenizer::new(delimiter).with_quote_char(options.quote_char);
            let mut frequencies: HashMap<usize, usize> = HashMap::new();
            let mut max_count = 0;
            for line in lines {
                let count = tokenizer.split(line).len();
                max_count = max_count.max(count);
                *frequencies.entry(count).or_default() += 1;
            }
            let (modal_count, modal_lines) = frequencies
                .into_iter()
                .max_by_key(|&(count, seen)| (seen, count))
                .unwrap_or((0, 0));
            DelimiterScore {
                delimiter,
                modal_count,
                deviating_lines: lines.len() - modal_lines,
                max_count,
            }
        })
        .collect()
}

/// Picks the delimiter giving the most consistent field count.
///
/// Ranking: a modal count above one, then fewest deviating lines, then
/// [`Delimiter::INFERENCE_PRIORITY`].
pub fn infer_delimiter(source: &dyn DataSource, options: &InferenceOptions) -> Result<Delimiter> {
    let lines = sample_lines(source, options)?;
    let scores = score_delimiters(&lines, options);
    for score in &scores {
        debug!(
            delimiter = %score.delimiter,
            modal = score.modal_count,
            deviating = score.deviating_lines,
            "delimiter candidate"
        );
    }
    scores
        .iter()
        .filter(|score| score.is_eligible())
        .min_by_key(|score| score.rank())
        .map(|score| score.delimiter)
        .ok_or_else(|| IngestError::DelimiterNotDetected {
            path: source.name().to_string(),
            sampled: lines.len(),
        })
}

/// Content lines considered for inference, BOM stripped, up to `max_lines`.
pub fn sample_lines(source: &dyn DataSource, options: &InferenceOptions) -> Result<Vec<String>> {
    let skipper = Tokenizer::new(Delimiter::default())
        .with_comment_marker(options.comment_marker.clone());
    let reader = open_utf8(source)?;
    let mut lines = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        if lines.len() >= options.max_lines {
            break;
        }
        let line = line.map_err(|err| IngestError::line_read(source.name(), idx + 1, err))?;
        let line = if idx == 0 {
            line.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(line)
        } else {
            line
        };
        if !skipper.is_skipped(&line) {
            lines.push(line);
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    fn infer(text: &str) -> Result<Delimiter> {
        infer_delimiter(&MemorySource::new("mem", text), &InferenceOptions::default())
    }

    #[test]
    fn detects_common_delimiters() {
        assert_eq!(infer("a,b,c\n1,2,3\n4,5,6\n").unwrap(), Delimiter::Comma);
        assert_eq!(infer("a\tb\tc\n1\t2\t3\n").unwrap(), Delimiter::Tab);
        assert_eq!(infer("a;b\n1;2\n").unwrap(), Delimiter::Semicolon);
        assert_eq!(infer("a|b|c\n1|2|3\n").unwrap(), Delimiter::Pipe);
        assert_eq!(infer("a:b\n1:2\n").unwrap(), Delimiter::Colon);
    }

    #[test]
    fn consistency_beats_priority() {
        // Spaces appear in values, but only commas give a stable count.
        let text = "name,score\nann lee,1\nbo,2\ncy d e,3\n";
        assert_eq!(infer(text).unwrap(), Delimiter::Comma);
    }

    #[test]
    fn ties_follow_priority_order() {
        // Tab and comma both give two fields on every line.
        let text = "a\tb,c\n1\t2,3\n";
        assert_eq!(infer(text).unwrap(), Delimiter::Tab);
    }

    #[test]
    fn comments_are_not_sampled() {
        let text = "// a;b;c;d\nx,y\n1,2\n";
        assert_eq!(infer(text).unwrap(), Delimiter::Comma);
    }

    #[test]
    fn single_column_fails() {
        let err = infer("a\n1\n2\n").unwrap_err();
        assert!(matches!(err, IngestError::DelimiterNotDetected { sampled: 3, .. }));
    }

    #[test]
    fn sample_is_bounded() {
        let text = "a,b\n1,2\n3;4;5\n6;7;8\n9;1;2\n";
        let options = InferenceOptions::default().with_max_lines(2);
        let source = MemorySource::new("mem", text);
        assert_eq!(infer_delimiter(&source, &options).unwrap(), Delimiter::Comma);
    }

    #[test]
    fn scores_report_deviation() {
        let lines = vec!["a,b".to_string(), "1,2".to_string(), "1,2,3".to_string()];
        let scores = score_delimiters(&lines, &InferenceOptions::default());
        let comma = scores
            .iter()
            .find(|s| s.delimiter == Delimiter::Comma)
            .unwrap();
        assert_eq!(comma.modal_count, 2);
        assert_eq!(comma.deviating_lines, 1);
        assert_eq!(comma.max_count, 3);
    }
}
