//! Splits raw input into word tokens on a configurable boundary regex.

use regex::Regex;

use crate::engine::EngineError;

pub const DEFAULT_BOUNDARY_PATTERN: &str = r"\W+";

#[derive(Debug, Clone)]
pub struct Tokenizer {
    boundary: Regex,
}

impl Tokenizer {
    /// Compile a tokenizer. Invalid patterns fail here, never per call.
    ///
    /// A boundary that matches the empty string would split between every
    /// character, so it is rejected too.
    pub fn new(pattern: &str) -> Result<Self, EngineError> {
        let boundary = Regex::new(pattern)?;
        if boundary.is_match("") {
            return Err(EngineError::EmptyBoundary(pattern.to_string()));
        }
        Ok(Self { boundary })
    }

    pub fn pattern(&self) -> &str {
        self.boundary.as_str()
    }

    /// Split `text` at every boundary match.
    ///
    /// Empty tokens are kept when the boundary touches either end of the
    /// text or matches back to back, so `"new "` yields `["new", ""]`.
    /// Empty text yields no tokens at all.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        self.boundary.split(text).map(str::to_string).collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            boundary: Regex::new(DEFAULT_BOUNDARY_PATTERN).expect("default boundary pattern"),
        }
    }
}
