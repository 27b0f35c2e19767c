use std::fmt;

use serde::{Deserialize, Serialize};

/// A completion candidate. `value` holds one or more space-separated words.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub value: String,
}

impl Term {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn words(&self) -> std::str::SplitWhitespace<'_> {
        self.value.split_whitespace()
    }

    /// Number of tokens this term spans when matched against input.
    pub fn word_count(&self) -> usize {
        self.words().count()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for Term {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
