//! Node type definitions.
//!
//! The `NodeKind` enum carries the node-type-specific payload (element name
//! and attributes, text content, comment text). Navigation links live in
//! `NodeData`, not here.

use super::Attribute;

/// The kind of a node and its associated data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document node. There is exactly one per `Document`; it holds the
    /// root element and any top-level comments.
    Document,

    /// An element node, e.g., `<Option K="100">`.
    Element {
        /// The tag name. Never empty.
        name: String,
        /// Attributes in document order. Names are unique.
        attributes: Vec<Attribute>,
    },

    /// A text node containing character data (references already decoded).
    Text {
        /// The text content.
        content: String,
    },

    /// A comment node, e.g., `<!-- Some Options -->`.
    Comment {
        /// The comment text (without the `<!--` and `-->` delimiters).
        content: String,
    },
}

impl NodeKind {
    /// Returns a short lowercase label for the node type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Element { .. } => "element",
            Self::Text { .. } => "text",
            Self::Comment { .. } => "comment",
        }
    }
}
