//! Match tree: every way the typed tokens can be read as a chain of terms.
//!
//! The synthetic root covers `[0, 0)`. Each child starts where its parent
//! ends and covers as many tokens as its term has words, so spans strictly
//! advance and depth is bounded by the token count.

use std::fmt::Write as _;

use tracing::{debug, debug_span, trace};

use crate::lookup::{LookupError, Term, TermLookup};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchNode {
    /// `None` only for the synthetic root.
    pub term: Option<Term>,
    pub start: usize,
    pub end: usize,
    /// Continuations starting at `end`, in lookup ranking order.
    pub children: Vec<MatchNode>,
}

impl MatchNode {
    pub fn root() -> Self {
        Self {
            term: None,
            start: 0,
            end: 0,
            children: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.term.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, excluding a synthetic root.
    pub fn node_count(&self) -> usize {
        let own = usize::from(!self.is_root());
        own + self.children.iter().map(MatchNode::node_count).sum::<usize>()
    }
}

/// Whether the tokens typed so far within `term`'s span agree with it.
///
/// The span is `[start, start + word_count)`, clipped to the typed tokens.
/// The clipped slice joined by single spaces must be a string prefix of
/// `term.value`, which lets the last typed word be partial and lets the term
/// run past the end of the input.
pub fn covers_prefix(tokens: &[String], start: usize, term: &Term) -> bool {
    let end = (start + term.word_count()).min(tokens.len());
    if start >= end {
        return false;
    }
    let typed = tokens[start..end].join(" ");
    term.value.starts_with(&typed)
}

/// Per-build memo of lookup results, one slot per token position.
struct Expander<'a> {
    tokens: &'a [String],
    lookup: &'a dyn TermLookup,
    searched: Vec<Option<Vec<Term>>>,
}

impl Expander<'_> {
    fn candidates(&mut self, pos: usize) -> Result<&[Term], LookupError> {
        if self.searched[pos].is_none() {
            let found = self.lookup.search(&self.tokens[pos])?;
            trace!(pos, word = %self.tokens[pos], found = found.len(), "lookup");
            self.searched[pos] = Some(found);
        }
        Ok(self.searched[pos].as_deref().unwrap_or_default())
    }

    fn expand(&mut self, node: &mut MatchNode) -> Result<(), LookupError> {
        let pos = node.end;
        if pos >= self.tokens.len() {
            return Ok(());
        }
        let tokens = self.tokens;
        let accepted: Vec<Term> = self
            .candidates(pos)?
            .iter()
            .filter(|term| term.word_count() > 0 && covers_prefix(tokens, pos, term))
            .cloned()
            .collect();
        for term in accepted {
            let end = pos + term.word_count();
            let mut child = MatchNode {
                term: Some(term),
                start: pos,
                end,
                children: Vec::new(),
            };
            self.expand(&mut child)?;
            node.children.push(child);
        }
        Ok(())
    }
}

/// Build the match tree for `tokens`, querying `lookup` once per position.
///
/// A lookup failure aborts the build and is returned unchanged.
pub fn build(tokens: &[String], lookup: &dyn TermLookup) -> Result<MatchNode, LookupError> {
    let _span = debug_span!("build_match_tree", tokens = tokens.len()).entered();
    let mut expander = Expander {
        tokens,
        lookup,
        searched: vec![None; tokens.len()],
    };
    let mut root = MatchNode::root();
    expander.expand(&mut root)?;
    debug!(nodes = root.node_count(), "match tree built");
    Ok(root)
}

/// Indented dump of the tree, one node per line: `[start, end) value`.
pub fn render(root: &MatchNode) -> String {
    fn walk(node: &MatchNode, depth: usize, out: &mut String) {
        if let Some(term) = &node.term {
            let _ = writeln!(
                out,
                "{:indent$}[{}, {}) {}",
                "",
                node.start,
                node.end,
                term,
                indent = depth * 2
            );
        }
        let next = if node.is_root() { depth } else { depth + 1 };
        for child in &node.children {
            walk(child, next, out);
        }
    }

    let mut out = String::new();
    walk(root, 0, &mut out);
    out
}
