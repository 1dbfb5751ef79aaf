//! Structural dump of a tree.
//!
//! One line per node, indented two spaces per level, with attributes listed
//! under their element. Useful for seeing exactly which text nodes a parse
//! produced.
//!
//! ```text
//! DOCUMENT
//!   COMMENT c
//!   ELEMENT Portfolio
//!     ATTRIBUTE id=p1
//!     TEXT \n
//! ```

use crate::tree::{Document, NodeId, NodeKind};

/// Formats the whole document as a debug tree.
///
/// # Examples
///
/// ```
/// use xmlnav::Document;
/// use xmlnav::serial::debug::format_debug_tree;
///
/// let doc = Document::parse_str("<a k='v'>hi</a>").unwrap();
/// assert_eq!(
///     format_debug_tree(&doc),
///     "DOCUMENT\n  ELEMENT a\n    ATTRIBUTE k=v\n    TEXT hi\n"
/// );
/// ```
#[must_use]
pub fn format_debug_tree(doc: &Document) -> String {
    format_debug_node(doc, doc.root())
}

/// Formats the subtree rooted at `id`, starting at depth zero.
#[must_use]
pub fn format_debug_node(doc: &Document, id: NodeId) -> String {
    let mut output = String::new();
    write_node(doc, id, 0, &mut output);
    output
}

fn write_node(doc: &Document, id: NodeId, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);

    match &doc.node(id).kind {
        NodeKind::Document => out.push_str("DOCUMENT\n"),
        NodeKind::Element { name, attributes } => {
            out.push_str("ELEMENT ");
            out.push_str(name);
            out.push('\n');
            for attr in attributes {
                out.push_str(&indent);
                out.push_str("  ATTRIBUTE ");
                out.push_str(&attr.name);
                out.push('=');
                out.push_str(&attr.value);
                out.push('\n');
            }
        }
        NodeKind::Text { content } => {
            out.push_str("TEXT ");
            out.push_str(&content.replace('\n', "\\n"));
            out.push('\n');
        }
        NodeKind::Comment { content } => {
            out.push_str("COMMENT ");
            out.push_str(&content.replace('\n', "\\n"));
            out.push('\n');
        }
    }

    for child in doc.children(id) {
        write_node(doc, child, depth + 1, out);
    }
}
