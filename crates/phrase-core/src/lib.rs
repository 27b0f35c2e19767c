//! Multi-word autocompletion over a single-word term lookup.
//!
//! Input text is split into tokens, every chain of terms consistent with
//! the tokens is collected into a match tree, and the root-to-leaf paths
//! that account for all typed tokens become suggestions. Enumerated paths
//! are memoized per input string in a bounded LRU cache.

pub mod cache;
pub mod engine;
pub mod lookup;
pub mod paths;
pub mod settings;
pub mod tokenizer;
pub mod tree;

mod testutil;

pub use engine::{EngineError, SuggestionEngine};
pub use lookup::{LookupError, Term, TermIndex, TermLookup};
