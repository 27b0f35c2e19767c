//! Term lookup: the per-word search interface the suggestion engine consumes.
//!
//! `TermLookup` is the seam between the engine and whatever stores terms.
//! `TermIndex` is the bundled in-memory implementation used by the CLI,
//! tests and benchmarks.

mod term;
mod term_index;

pub use term::Term;
pub use term_index::{TermIndex, DEFAULT_MAX_RESULTS};

use std::io;

/// Errors raised by a term lookup, either while searching or while
/// loading the backing term list.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("term lookup unavailable: {0}")]
    Unavailable(String),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Ranked single-word term search.
///
/// Implementations return candidates in ranking order (best first). The
/// engine never re-sorts them, so the order surfaces unchanged in the
/// final suggestions. Case sensitivity, diacritic handling and result caps
/// are up to the implementation and must be documented on it.
pub trait TermLookup: Send + Sync {
    fn search(&self, word: &str) -> Result<Vec<Term>, LookupError>;
}
