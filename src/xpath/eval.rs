//! Path evaluator.
//!
//! Evaluation is step-wise over candidate sets. The first set is the
//! context node (or, for absolute paths, the top of the context's tree);
//! each step maps every candidate to its element children or element
//! descendants, keeps those passing the node test, and restores document
//! order with duplicates removed before the next step runs.

use std::cmp::Ordering;

use tracing::{debug, trace};

use super::ast::{Axis, LocationPath, Step};
use crate::tree::{Document, NodeId};

/// Evaluation context for a compiled path.
///
/// # Examples
///
/// ```
/// use xmlnav::Document;
/// use xmlnav::xpath::{compile, QueryContext};
///
/// let doc = Document::parse_str("<P><S><O/></S><O/></P>").unwrap();
/// let path = compile("//O").unwrap();
/// let ctx = QueryContext::new(&doc, doc.root());
/// assert_eq!(ctx.select(&path).len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QueryContext<'a> {
    doc: &'a Document,
    context_node: NodeId,
}

impl<'a> QueryContext<'a> {
    /// Creates a context that evaluates paths relative to `context_node`.
    #[must_use]
    pub fn new(doc: &'a Document, context_node: NodeId) -> Self {
        Self { doc, context_node }
    }

    /// Evaluates `path` and returns the matching elements in document
    /// order, without duplicates.
    #[must_use]
    pub fn select(&self, path: &LocationPath) -> Vec<NodeId> {
        let start = if path.absolute {
            self.doc.tree_root(self.context_node)
        } else {
            self.context_node
        };
        debug!(%path, ?start, "evaluating path");

        let mut candidates = vec![start];
        for step in &path.steps {
            candidates = self.apply_step(&candidates, step);
            trace!(axis = ?step.axis, count = candidates.len(), "step applied");
            if candidates.is_empty() {
                break;
            }
        }

        debug!(%path, matches = candidates.len(), "path evaluated");
        candidates
    }

    fn apply_step(&self, candidates: &[NodeId], step: &Step) -> Vec<NodeId> {
        let doc = self.doc;
        let passes = |id: &NodeId| doc.node_name(*id).is_some_and(|name| step.test.matches(name));

        let mut result: Vec<NodeId> = Vec::new();
        for &node in candidates {
            match step.axis {
                Axis::Child => result.extend(doc.children(node).filter(passes)),
                Axis::Descendant => result.extend(doc.descendants(node).filter(passes)),
            }
        }
        // Overlapping candidates (an element and its own descendant) can
        // reach the same node twice and interleave subtrees.
        if candidates.len() > 1 {
            sort_document_order(doc, &mut result);
        }
        result
    }
}

/// Sorts nodes of one tree into document order and removes duplicates.
fn sort_document_order(doc: &Document, nodes: &mut Vec<NodeId>) {
    nodes.sort_by(|&a, &b| {
        doc.compare_document_order(a, b)
            .unwrap_or(Ordering::Equal)
    });
    nodes.dedup();
}
