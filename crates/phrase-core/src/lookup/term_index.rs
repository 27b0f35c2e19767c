use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::ops::Bound;
use std::path::Path;

use tracing::debug;

use super::{LookupError, Term, TermLookup};

pub const DEFAULT_MAX_RESULTS: usize = 10;

/// In-memory term list searchable by first-word prefix.
///
/// Search contract:
/// - `search(word)` returns every term whose *first* word starts with
///   `word` (byte-wise, case-sensitive, no diacritic folding).
/// - Results are ordered by insertion rank: terms added earlier rank higher.
/// - At most `max_results` terms are returned.
/// - An empty `word` matches every term.
pub struct TermIndex {
    terms: Vec<Term>,
    /// first word → ranks of the terms starting with it, ascending.
    by_first_word: BTreeMap<String, Vec<usize>>,
    max_results: usize,
}

/// Collapse whitespace runs to single spaces and trim both ends.
fn normalize(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl TermIndex {
    /// Build an index from term values in rank order.
    ///
    /// Values are whitespace-normalized; duplicates keep their first rank.
    /// A value with no words is rejected.
    pub fn from_values<I, S>(values: I) -> Result<Self, LookupError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::empty();
        let mut seen = HashSet::new();
        for (i, raw) in values.into_iter().enumerate() {
            let value = normalize(raw.as_ref());
            if value.is_empty() {
                return Err(LookupError::Parse {
                    line: i + 1,
                    reason: "term has no words".to_string(),
                });
            }
            if seen.insert(value.clone()) {
                index.push(value);
            }
        }
        Ok(index)
    }

    /// Load a term list: one term per line, best-ranked first.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn open(path: &Path) -> Result<Self, LookupError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse the line-oriented term list format accepted by [`TermIndex::open`].
    pub fn parse(content: &str) -> Result<Self, LookupError> {
        let mut index = Self::empty();
        let mut seen = HashSet::new();
        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let value = normalize(trimmed);
            if seen.insert(value.clone()) {
                index.push(value);
            }
        }
        debug!(terms = index.terms.len(), "term list parsed");
        Ok(index)
    }

    fn empty() -> Self {
        Self {
            terms: Vec::new(),
            by_first_word: BTreeMap::new(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    fn push(&mut self, value: String) {
        let rank = self.terms.len();
        // Normalized values are non-empty, so a first word always exists.
        let first = value.split(' ').next().unwrap_or_default().to_string();
        self.by_first_word.entry(first).or_default().push(rank);
        self.terms.push(Term { value });
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over terms in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter()
    }
}

impl TermLookup for TermIndex {
    fn search(&self, word: &str) -> Result<Vec<Term>, LookupError> {
        let mut ranks: Vec<usize> = self
            .by_first_word
            .range::<str, _>((Bound::Included(word), Bound::Unbounded))
            .take_while(|(first, _)| first.starts_with(word))
            .flat_map(|(_, ranks)| ranks.iter().copied())
            .collect();
        ranks.sort_unstable();
        ranks.truncate(self.max_results);
        Ok(ranks.into_iter().map(|r| self.terms[r].clone()).collect())
    }
}
