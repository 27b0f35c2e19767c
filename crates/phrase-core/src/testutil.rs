#![cfg(test)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::lookup::{LookupError, Term, TermLookup};

pub fn tokens(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

pub fn terms(values: &[&str]) -> Vec<Term> {
    values.iter().map(|v| Term::new(*v)).collect()
}

/// Exact-key lookup: `search(word)` returns the terms registered for `word`.
pub struct MapLookup {
    entries: HashMap<String, Vec<Term>>,
}

impl MapLookup {
    pub fn new(entries: &[(&str, &[&str])]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(word, values)| (word.to_string(), terms(values)))
                .collect(),
        }
    }
}

impl TermLookup for MapLookup {
    fn search(&self, word: &str) -> Result<Vec<Term>, LookupError> {
        Ok(self.entries.get(word).cloned().unwrap_or_default())
    }
}

/// Lookup whose backing store is always down.
pub struct FailingLookup;

impl TermLookup for FailingLookup {
    fn search(&self, _word: &str) -> Result<Vec<Term>, LookupError> {
        Err(LookupError::Unavailable("backing store offline".to_string()))
    }
}

/// Wraps a lookup and counts `search` calls.
pub struct CountingLookup<L> {
    inner: L,
    calls: AtomicUsize,
}

impl<L> CountingLookup<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<L: TermLookup> TermLookup for CountingLookup<L> {
    fn search(&self, word: &str) -> Result<Vec<Term>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.search(word)
    }
}
