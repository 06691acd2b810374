//! Line tokenizing.

use std::io::{BufRead, Lines};

use tabula_model::{Delimiter, ReaderOptions};

use crate::error::{IngestError, Result};
use crate::source::{DataSource, open_utf8};

/// Splits lines into fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenizer {
    delimiter: Delimiter,
    quote_char: Option<char>,
    comment_marker: Option<String>,
}

impl Tokenizer {
    pub fn new(delimiter: Delimiter) -> Self {
        Self {
            delimiter,
            quote_char: None,
            comment_marker: None,
        }
    }

    pub fn from_options(options: &ReaderOptions) -> Self {
        Self::new(options.delimiter)
            .with_quote_char(options.quote_char)
            .with_comment_marker(options.comment_marker.clone())
    }

    pub fn with_quote_char(mut self, quote_char: Option<char>) -> Self {
        self.quote_char = quote_char;
        self
    }

    pub fn with_comment_marker(mut self, marker: Option<String>) -> Self {
        self.comment_marker = marker.filter(|m| !m.is_empty());
        self
    }

    /// Blank and comment lines carry no fields.
    pub fn is_skipped(&self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return true;
        }
        self.comment_marker
            .as_deref()
            .is_some_and(|marker| trimmed.starts_with(marker))
    }

    /// Fields of `line`, or `None` for a blank or comment line.
    pub fn tokenize(&self, line: &str) -> Option<Vec<String>> {
        if self.is_skipped(line) {
            return None;
        }
        Some(self.split(line))
    }

    /// Splits a content line into trimmed fields with quotes removed.
    ///
    /// A delimiter inside a quoted span is kept as part of the field.
    pub fn split(&self, line: &str) -> Vec<String> {
        let line = if self.delimiter.is_blank_separator() {
            line.trim()
        } else {
            line.trim_end_matches(['\r', '\n'])
        };

        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut in_separator_run = false;

        for ch in line.chars() {
            if Some(ch) == self.quote_char {
                in_quotes = !in_quotes;
                in_separator_run = false;
                continue;
            }
            if !in_quotes && self.delimiter.matches(ch) {
                if !(self.delimiter.collapses_runs() && in_separator_run) {
                    fields.push(current.trim().to_string());
                    current.clear();
                }
                in_separator_run = true;
                continue;
            }
            in_separator_run = false;
            current.push(ch);
        }
        fields.push(current.trim().to_string());
        fields
    }
}

/// Fields of one content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// One-based physical line number.
    pub line_number: usize,
    pub fields: Vec<String>,
}

/// Iterates the content lines of a source, skipping blanks and comments.
pub struct LineScanner<'a> {
    name: &'a str,
    lines: Lines<Box<dyn BufRead + 'a>>,
    tokenizer: &'a Tokenizer,
    line_number: usize,
}

impl<'a> LineScanner<'a> {
    /// Opens `source` from the start.
    pub fn open(source: &'a dyn DataSource, tokenizer: &'a Tokenizer) -> Result<Self> {
        let reader = open_utf8(source)?;
        Ok(Self {
            name: source.name(),
            lines: reader.lines(),
            tokenizer,
            line_number: 0,
        })
    }

    /// Line number of the last line read.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl Iterator for LineScanner<'_> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => {
                    return Some(Err(IngestError::line_read(
                        self.name,
                        self.line_number + 1,
                        err,
                    )));
                }
            };
            self.line_number += 1;
            let line = if self.line_number == 1 {
                line.strip_prefix('\u{feff}').unwrap_or(&line)
            } else {
                &line
            };
            if let Some(fields) = self.tokenizer.tokenize(line) {
                return Some(Ok(RawRecord {
                    line_number: self.line_number,
                    fields,
                }));
            }
        }
    }
}
