//! Root-to-leaf path enumeration and the coverage filter.

use crate::lookup::Term;
use crate::tree::MatchNode;

/// One matched term on a path, with the token span it claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNode {
    pub term: Term,
    pub start: usize,
    pub end: usize,
}

/// A chain of terms from a child of the root down to a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionPath(pub Vec<PathNode>);

impl SuggestionPath {
    pub fn nodes(&self) -> &[PathNode] {
        &self.0
    }

    /// End of the last span, i.e. how many tokens this path accounts for.
    pub fn last_end(&self) -> usize {
        self.0.last().map_or(0, |n| n.end)
    }

    pub fn covers(&self, total_tokens: usize) -> bool {
        !self.0.is_empty() && self.last_end() >= total_tokens
    }

    pub fn word_count(&self) -> usize {
        self.0.iter().map(|n| n.term.word_count()).sum()
    }

    pub fn terms(&self) -> Vec<Term> {
        self.0.iter().map(|n| n.term.clone()).collect()
    }
}

/// Every root-to-leaf path, depth-first in child order.
///
/// The synthetic root is not part of any path. A root without children
/// yields no paths.
pub fn enumerate(root: &MatchNode) -> Vec<SuggestionPath> {
    let mut out = Vec::new();
    let mut prefix = Vec::new();
    for child in &root.children {
        walk(child, &mut prefix, &mut out);
    }
    out
}

fn walk(node: &MatchNode, prefix: &mut Vec<PathNode>, out: &mut Vec<SuggestionPath>) {
    let Some(term) = &node.term else {
        return;
    };
    prefix.push(PathNode {
        term: term.clone(),
        start: node.start,
        end: node.end,
    });
    if node.is_leaf() {
        out.push(SuggestionPath(prefix.clone()));
    } else {
        for child in &node.children {
            walk(child, prefix, out);
        }
    }
    prefix.pop();
}

/// Keep paths that account for every typed token and project them to terms.
pub fn covering(paths: &[SuggestionPath], total_tokens: usize) -> Vec<Vec<Term>> {
    paths
        .iter()
        .filter(|p| p.covers(total_tokens))
        .map(SuggestionPath::terms)
        .collect()
}
