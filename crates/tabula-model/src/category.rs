//! Append-only category dictionaries for discrete columns.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Code stored for a cell that matched a missing-value marker.
pub const MISSING_CATEGORY: i32 = -1;

/// Maps each distinct value of a discrete column to a code.
///
/// Codes are handed out in first-seen order starting at 0 and are never
/// renumbered. The value list doubles as the decode table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CategoryDictionary {
    values: Vec<String>,
    codes: HashMap<String, i32>,
}

impl CategoryDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the code for `value`, assigning the next one on first sight.
    pub fn encode(&mut self, value: &str) -> i32 {
        if let Some(code) = self.codes.get(value) {
            return *code;
        }
        let code = self.values.len() as i32;
        self.values.push(value.to_string());
        self.codes.insert(value.to_string(), code);
        code
    }

    /// Code of an already seen value.
    pub fn code_of(&self, value: &str) -> Option<i32> {
        self.codes.get(value).copied()
    }

    /// Value behind `code`; `None` for [`MISSING_CATEGORY`] or unknown codes.
    pub fn value_of(&self, code: i32) -> Option<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| self.values.get(idx))
            .map(String::as_str)
    }

    /// Distinct values in code order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn from_values(values: Vec<String>) -> Self {
        let mut dictionary = Self::new();
        for value in &values {
            dictionary.encode(value);
        }
        dictionary
    }
}

impl From<Vec<String>> for CategoryDictionary {
    fn from(values: Vec<String>) -> Self {
        Self::from_values(values)
    }
}

impl From<CategoryDictionary> for Vec<String> {
    fn from(dictionary: CategoryDictionary) -> Self {
        dictionary.values
    }
}
