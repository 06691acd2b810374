//! Field separators and dataset shapes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Separator rule applied to every line of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Tab,
    #[default]
    Comma,
    /// Every single space separates two fields.
    Space,
    Colon,
    Semicolon,
    Pipe,
    /// Runs of spaces and tabs count as one separator.
    Whitespace,
}

impl Delimiter {
    /// Candidate order used to break ties during delimiter inference.
    pub const INFERENCE_PRIORITY: [Delimiter; 7] = [
        Delimiter::Tab,
        Delimiter::Space,
        Delimiter::Comma,
        Delimiter::Colon,
        Delimiter::Semicolon,
        Delimiter::Pipe,
        Delimiter::Whitespace,
    ];

    /// The separator character, or `None` for whitespace runs.
    pub fn as_char(self) -> Option<char> {
        match self {
            Self::Tab => Some('\t'),
            Self::Comma => Some(','),
            Self::Space => Some(' '),
            Self::Colon => Some(':'),
            Self::Semicolon => Some(';'),
            Self::Pipe => Some('|'),
            Self::Whitespace => None,
        }
    }

    /// Returns true if `ch` separates fields under this rule.
    pub fn matches(self, ch: char) -> bool {
        match self.as_char() {
            Some(sep) => ch == sep,
            None => ch == ' ' || ch == '\t',
        }
    }

    /// Whether consecutive separators collapse into one.
    pub fn collapses_runs(self) -> bool {
        matches!(self, Self::Whitespace)
    }

    /// Whether the rule splits on spaces, so lines are trimmed first.
    pub fn is_blank_separator(self) -> bool {
        matches!(self, Self::Space | Self::Whitespace)
    }

    /// Position in [`Self::INFERENCE_PRIORITY`].
    pub fn priority(self) -> usize {
        Self::INFERENCE_PRIORITY
            .iter()
            .position(|candidate| *candidate == self)
            .unwrap_or(Self::INFERENCE_PRIORITY.len())
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Tab => "tab",
            Self::Comma => "comma",
            Self::Space => "space",
            Self::Colon => "colon",
            Self::Semicolon => "semicolon",
            Self::Pipe => "pipe",
            Self::Whitespace => "whitespace",
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Delimiter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "\t" => return Ok(Self::Tab),
            " " => return Ok(Self::Space),
            _ => {}
        }
        match s.trim().to_ascii_lowercase().as_str() {
            "tab" => Ok(Self::Tab),
            "comma" | "," => Ok(Self::Comma),
            "space" => Ok(Self::Space),
            "colon" | ":" => Ok(Self::Colon),
            "semicolon" | ";" => Ok(Self::Semicolon),
            "pipe" | "|" => Ok(Self::Pipe),
            "whitespace" => Ok(Self::Whitespace),
            _ => Err(ModelError::UnknownDelimiter(s.to_string())),
        }
    }
}

/// Which dataset shape a read or validation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    #[default]
    Continuous,
    Discrete,
    Mixed,
    Covariance,
}

impl DataKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Continuous => "continuous",
            Self::Discrete => "discrete",
            Self::Mixed => "mixed",
            Self::Covariance => "covariance",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DataKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continuous" => Ok(Self::Continuous),
            "discrete" => Ok(Self::Discrete),
            "mixed" => Ok(Self::Mixed),
            "covariance" => Ok(Self::Covariance),
            _ => Err(ModelError::UnknownDataKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_names_and_characters() {
        assert_eq!("Tab".parse::<Delimiter>().unwrap(), Delimiter::Tab);
        assert_eq!(",".parse::<Delimiter>().unwrap(), Delimiter::Comma);
        assert_eq!("whitespace".parse::<Delimiter>().unwrap(), Delimiter::Whitespace);
        assert!("bogus".parse::<Delimiter>().is_err());
    }

    #[test]
    fn parse_accepts_blank_separator_characters() {
        assert_eq!(" ".parse::<Delimiter>().unwrap(), Delimiter::Space);
        assert_eq!("\t".parse::<Delimiter>().unwrap(), Delimiter::Tab);
        assert_eq!(" pipe ".parse::<Delimiter>().unwrap(), Delimiter::Pipe);
        assert!("  ".parse::<Delimiter>().is_err());
    }

    #[test]
    fn whitespace_matches_space_and_tab() {
        assert!(Delimiter::Whitespace.matches(' '));
        assert!(Delimiter::Whitespace.matches('\t'));
        assert!(!Delimiter::Space.matches('\t'));
        assert!(Delimiter::Whitespace.collapses_runs());
        assert!(!Delimiter::Space.collapses_runs());
    }

    #[test]
    fn priority_follows_inference_order() {
        assert!(Delimiter::Tab.priority() < Delimiter::Space.priority());
        assert!(Delimiter::Space.priority() < Delimiter::Comma.priority());
        assert!(Delimiter::Semicolon.priority() < Delimiter::Pipe.priority());
    }
}
