//! Restricted path queries.
//!
//! Supports absolute and relative child steps, descendant steps and the
//! `*` wildcard:
//!
//! | Path                 | Selects                                              |
//! |----------------------|------------------------------------------------------|
//! | `Portfolio`          | `Portfolio` children of the context node             |
//! | `/Portfolio`         | `Portfolio` children of the top of the context's tree |
//! | `Portfolio/Strategy` | `Strategy` children of those                         |
//! | `//Option`           | every `Option` element in the tree                   |
//! | `Strategy/*`         | every element child of each `Strategy` child         |
//!
//! Everything else (predicates, attributes, `.`/`..`, axes, functions,
//! unions) is rejected with [`PathError::InvalidSyntax`]. Results are
//! always elements in document order with duplicates removed.
//!
//! # Quick Start
//!
//! ```
//! use xmlnav::Document;
//! use xmlnav::xpath::evaluate;
//!
//! let doc = Document::parse_str(
//!     "<Portfolio><Option K='100'/><Strategy><Option K='110'/></Strategy></Portfolio>",
//! )
//! .unwrap();
//! let options = evaluate(&doc, doc.root(), "//Option").unwrap();
//! assert_eq!(options.len(), 2);
//! ```
//!
//! # Submodules
//!
//! - [`lexer`]: tokenizer and the [`PathError`] type.
//! - [`ast`]: the compiled [`LocationPath`].
//! - [`parser`]: path grammar.
//! - [`eval`]: step-wise evaluation via [`QueryContext`].

pub mod ast;
pub mod eval;
pub mod lexer;
pub mod parser;

pub use ast::{Axis, LocationPath, NodeTest, Step};
pub use eval::QueryContext;
pub use lexer::PathError;

use crate::serial::{serialize_node_with_options, SerializeOptions};
use crate::tree::{Document, NodeId};

/// Compiles a path for repeated evaluation.
///
/// # Errors
///
/// Returns [`PathError::InvalidSyntax`] if the path is outside the
/// supported subset.
pub fn compile(path: &str) -> Result<LocationPath, PathError> {
    parser::parse(path)
}

/// Evaluates a path against a context node.
///
/// This is a convenience function that compiles the path and evaluates it
/// in a single call. For evaluating the same path against multiple context
/// nodes, use [`compile`] and [`QueryContext::select`] separately to avoid
/// re-parsing.
///
/// # Errors
///
/// Returns [`PathError::InvalidSyntax`] if the path is outside the
/// supported subset. A valid path that matches nothing returns an empty
/// vector.
pub fn evaluate(doc: &Document, context_node: NodeId, path: &str) -> Result<Vec<NodeId>, PathError> {
    let compiled = compile(path)?;
    Ok(QueryContext::new(doc, context_node).select(&compiled))
}

/// Evaluates a path and returns the first match in document order.
///
/// # Errors
///
/// Returns [`PathError::InvalidSyntax`] if the path is invalid.
pub fn select_first(
    doc: &Document,
    context_node: NodeId,
    path: &str,
) -> Result<Option<NodeId>, PathError> {
    Ok(evaluate(doc, context_node, path)?.into_iter().next())
}

/// Evaluates a path and serializes every match, each followed by a newline.
///
/// # Errors
///
/// Returns [`PathError::InvalidSyntax`] if the path is invalid.
///
/// # Examples
///
/// ```
/// use xmlnav::Document;
/// use xmlnav::xpath::render;
///
/// let doc = Document::parse_str("<P><O K='1'/><O K='2'/></P>").unwrap();
/// let text = render(&doc, doc.root(), "//O").unwrap();
/// assert_eq!(text, "<O K=\"1\"/>\n<O K=\"2\"/>\n");
/// ```
pub fn render(doc: &Document, context_node: NodeId, path: &str) -> Result<String, PathError> {
    render_with_options(doc, context_node, path, &SerializeOptions::default())
}

/// Like [`render`], printing each match with the given options.
///
/// Every match ends with exactly one newline, indented or not.
///
/// # Errors
///
/// Returns [`PathError::InvalidSyntax`] if the path is invalid.
pub fn render_with_options(
    doc: &Document,
    context_node: NodeId,
    path: &str,
    options: &SerializeOptions,
) -> Result<String, PathError> {
    let mut out = String::new();
    for id in evaluate(doc, context_node, path)? {
        out.push_str(&serialize_node_with_options(doc, id, options));
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }
    Ok(out)
}
