//! Arena-based document tree.
//!
//! All nodes live in a contiguous `Vec<NodeData>` owned by the `Document`
//! and are referenced by `NodeId`, a newtype over `NonZeroU32`.
//!
//! Parents own their children through the arena; the `parent`, sibling and
//! child links are plain indices. Nothing is reference counted, so there are
//! no ownership cycles, and dropping the `Document` frees every node at once.
//!
//! # Architecture
//!
//! - `mod.rs`: the arena, raw links, node payload accessors and append-only
//!   mutation.
//! - [`nav`]: the read-only navigation API (filtered element iterators,
//!   ancestors, sibling ranges, document-order comparison).
//! - [`compose`]: functional construction of trees from values.

pub mod compose;
mod nav;
mod node;

pub use compose::ElementBuilder;
pub use nav::{Ancestors, DescendantElements, ElementChildren, Siblings};
pub use node::NodeKind;

use std::num::NonZeroU32;

use crate::error::{ParseError, TreeError};
use crate::parser::input::{is_valid_name, is_xml_char};
use crate::parser::ParseOptions;

/// A typed index into the document's node arena.
///
/// `NodeId` is a newtype over `NonZeroU32`, so `Option<NodeId>` has the same
/// size as `NodeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    /// Creates a `NodeId` from a raw arena index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 0 or does not fit in a `u32`.
    #[allow(clippy::expect_used)]
    fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index).expect("node arena exceeds u32::MAX entries");
        Self(NonZeroU32::new(raw).expect("NodeId index must be non-zero"))
    }

    /// Returns the raw index as a `usize` for indexing into the arena.
    fn as_index(self) -> usize {
        self.0.get() as usize
    }
}

/// Storage for a single node in the document arena.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// What kind of node this is and its payload.
    pub kind: NodeKind,
    /// Owning parent, if attached. The document node never has one.
    pub parent: Option<NodeId>,
    /// First child node.
    pub first_child: Option<NodeId>,
    /// Last child node (for O(1) append).
    pub last_child: Option<NodeId>,
    /// Next sibling.
    pub next_sibling: Option<NodeId>,
    /// Previous sibling.
    pub prev_sibling: Option<NodeId>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            prev_sibling: None,
        }
    }
}

/// An attribute on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute name.
    pub name: String,
    /// The attribute value (references already decoded).
    pub value: String,
}

impl Attribute {
    /// Creates an attribute from a name and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A markup document.
///
/// The `Document` owns all nodes and provides navigation through `&Document`
/// and append-only construction through `&mut Document`.
///
/// # Examples
///
/// ```
/// use xmlnav::Document;
///
/// let doc = Document::parse_str("<Portfolio><Option K='100'/></Portfolio>").unwrap();
/// let root = doc.root_element().unwrap();
/// assert_eq!(doc.node_name(root), Some("Portfolio"));
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    /// The node arena. Index 0 is unused (placeholder for `NonZeroU32`).
    nodes: Vec<NodeData>,
    /// The document node id.
    root: NodeId,
}

impl Document {
    /// Creates a new empty document holding only the document node.
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = Vec::with_capacity(64);
        // Index 0: placeholder (NodeId uses NonZeroU32)
        nodes.push(NodeData::new(NodeKind::Document));
        // Index 1: the document node
        nodes.push(NodeData::new(NodeKind::Document));
        Self {
            nodes,
            root: NodeId::from_index(1),
        }
    }

    /// Parses a markup string into a `Document` with default options.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the input is malformed, unbalanced, or
    /// repeats an attribute.
    ///
    /// # Examples
    ///
    /// ```
    /// use xmlnav::Document;
    ///
    /// let doc = Document::parse_str("<root><child/></root>").unwrap();
    /// assert!(doc.root_element().is_some());
    /// ```
    pub fn parse_str(input: &str) -> Result<Self, ParseError> {
        crate::parser::parse_str(input)
    }

    /// Parses a markup string into a `Document` with the given options.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the input is malformed, unbalanced, or
    /// repeats an attribute.
    pub fn parse_str_with_options(input: &str, options: &ParseOptions) -> Result<Self, ParseError> {
        crate::parser::parse_str_with_options(input, options)
    }

    /// Returns the document node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the root element (the single top-level element), if any.
    #[must_use]
    pub fn root_element(&self) -> Option<NodeId> {
        self.children(self.root).find(|&id| self.is_element(id))
    }

    /// Returns `true` if `id` refers to a node allocated in this document.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        id.as_index() < self.nodes.len()
    }

    /// Returns a reference to the `NodeData` for the given node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.as_index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.as_index()]
    }

    /// Returns `true` if the node is an element.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Element { .. })
    }

    /// Returns `true` if the node is a text node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Text { .. })
    }

    /// Returns `true` if the node is a comment.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn is_comment(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Comment { .. })
    }

    /// Returns the tag name of an element node, `None` for other kinds.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns the content of a text or comment node.
    ///
    /// For element nodes, returns `None`; use [`text_content`](Self::text_content)
    /// for the concatenated descendant text.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn node_text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Text { content } | NodeKind::Comment { content } => Some(content),
            _ => None,
        }
    }

    /// Returns the concatenated text of a node and all its descendants.
    ///
    /// Comments do not contribute. This is an element's "value".
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut result = String::new();
        self.collect_text(id, &mut result);
        result
    }

    fn collect_text(&self, id: NodeId, buf: &mut String) {
        match &self.node(id).kind {
            NodeKind::Text { content } => buf.push_str(content),
            NodeKind::Comment { .. } => {}
            NodeKind::Element { .. } | NodeKind::Document => {
                for child in self.children(id) {
                    self.collect_text(child, buf);
                }
            }
        }
    }

    /// Returns the attributes of an element node in document order.
    ///
    /// Returns an empty slice for non-element nodes.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        match &self.node(id).kind {
            NodeKind::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Returns the value of an attribute by name, `None` if absent.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Returns `true` if the node is an element with at least one attribute.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn has_attributes(&self, id: NodeId) -> bool {
        !self.attributes(id).is_empty()
    }

    /// Returns the first attribute of an element.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn first_attribute(&self, id: NodeId) -> Option<&Attribute> {
        self.attributes(id).first()
    }

    /// Returns the last attribute of an element.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn last_attribute(&self, id: NodeId) -> Option<&Attribute> {
        self.attributes(id).last()
    }

    // --- Raw links ---

    /// Returns the first child of a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_child
    }

    /// Returns the last child of a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).last_child
    }

    /// Returns the next sibling of a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next_sibling
    }

    /// Returns the previous sibling of a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev_sibling
    }

    /// Returns the node that owns `id` in the arena, including the document
    /// node. [`parent`](Self::parent) is the element-only view.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn owner(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Returns an iterator over all child nodes (elements, text, comments).
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            doc: self,
            next: self.node(id).first_child,
        }
    }

    /// Returns a depth-first iterator over all descendant nodes.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            root: id,
            next: self.first_child(id),
        }
    }

    // --- Construction ---

    /// Allocates a new detached node in the arena and returns its `NodeId`.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let index = self.nodes.len();
        self.nodes.push(NodeData::new(kind));
        NodeId::from_index(index)
    }

    /// Allocates a detached element with no attributes.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidName`] if `name` is not a valid tag name.
    pub fn create_element(&mut self, name: &str) -> Result<NodeId, TreeError> {
        if !is_valid_name(name) {
            return Err(TreeError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(self.create_node(NodeKind::Element {
            name: name.to_string(),
            attributes: Vec::new(),
        }))
    }

    /// Allocates a detached text node.
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.create_node(NodeKind::Text {
            content: content.to_string(),
        })
    }

    /// Allocates a detached comment node.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidComment`] if `content` contains `--`,
    /// ends with `-`, or holds a character that is not allowed in markup.
    pub fn create_comment(&mut self, content: &str) -> Result<NodeId, TreeError> {
        if content.contains("--") || content.ends_with('-') || !content.chars().all(is_xml_char) {
            return Err(TreeError::InvalidComment {
                content: content.to_string(),
            });
        }
        Ok(self.create_node(NodeKind::Comment {
            content: content.to_string(),
        }))
    }

    /// Adds an attribute to the end of an element's attribute list.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::DuplicateAttribute`] if the element already has
    /// an attribute with this name, and [`TreeError::InvalidName`] if the
    /// name is not valid or the node is not an element.
    pub fn add_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), TreeError> {
        if !is_valid_name(name) {
            return Err(TreeError::InvalidName {
                name: name.to_string(),
            });
        }
        match &mut self.node_mut(id).kind {
            NodeKind::Element {
                name: element,
                attributes,
            } => {
                if attributes.iter().any(|a| a.name == name) {
                    return Err(TreeError::DuplicateAttribute {
                        element: element.clone(),
                        name: name.to_string(),
                    });
                }
                attributes.push(Attribute::new(name, value));
                Ok(())
            }
            _ => Err(TreeError::InvalidName {
                name: name.to_string(),
            }),
        }
    }

    /// Appends a detached child to the end of a parent's child list.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidAppend`] if `child` is already attached,
    /// is the document node, is `parent` itself or one of its ancestors, or
    /// if `parent` cannot hold children (text and comment nodes).
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let refuse = |message: &str| {
            Err(TreeError::InvalidAppend {
                message: message.to_string(),
            })
        };
        if !self.contains(parent) || !self.contains(child) {
            return refuse("node does not belong to this document");
        }
        if matches!(
            self.node(parent).kind,
            NodeKind::Text { .. } | NodeKind::Comment { .. }
        ) {
            return refuse("text and comment nodes cannot have children");
        }
        if matches!(self.node(child).kind, NodeKind::Document) {
            return refuse("the document node cannot be a child");
        }
        if self.node(child).parent.is_some() {
            return refuse("child already has a parent");
        }
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return refuse("a node cannot be appended under itself or its descendant");
            }
            cursor = self.node(id).parent;
        }
        self.link_child(parent, child);
        Ok(())
    }

    /// Links `child` as the last child of `parent` without validation.
    ///
    /// Callers guarantee that `child` is detached and not an ancestor of
    /// `parent`.
    pub(crate) fn link_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            self.node(child).parent.is_none(),
            "child already has a parent"
        );

        self.node_mut(child).parent = Some(parent);

        if let Some(last) = self.node(parent).last_child {
            self.node_mut(last).next_sibling = Some(child);
            self.node_mut(child).prev_sibling = Some(last);
            self.node_mut(parent).last_child = Some(child);
        } else {
            self.node_mut(parent).first_child = Some(child);
            self.node_mut(parent).last_child = Some(child);
        }
    }

    /// Pushes an attribute onto an element without checking for duplicates.
    pub(crate) fn push_attribute(&mut self, id: NodeId, attribute: Attribute) {
        if let NodeKind::Element { attributes, .. } = &mut self.node_mut(id).kind {
            attributes.push(attribute);
        }
    }

    /// Appends `text` to an existing text node. Returns `false` (and does
    /// nothing) if `id` is not a text node.
    pub(crate) fn extend_text(&mut self, id: NodeId, text: &str) -> bool {
        match &mut self.node_mut(id).kind {
            NodeKind::Text { content } => {
                content.push_str(text);
                true
            }
            _ => false,
        }
    }

    /// Returns the total number of nodes in the arena, including the
    /// document node.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1 // subtract placeholder at index 0
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// --- Iterators ---

/// Iterator over the children of a node.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.node(current).next_sibling;
        Some(current)
    }
}

/// Depth-first (pre-order) iterator over all descendants of a node.
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    doc: &'a Document,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;

        if let Some(child) = self.doc.first_child(current) {
            self.next = Some(child);
            return Some(current);
        }

        // Walk up until some node on the way has a next sibling, stopping
        // at the subtree root.
        let mut cursor = current;
        loop {
            if cursor == self.root {
                self.next = None;
                break;
            }
            if let Some(sibling) = self.doc.next_sibling(cursor) {
                self.next = Some(sibling);
                break;
            }
            match self.doc.owner(cursor) {
                Some(parent) => cursor = parent,
                None => {
                    self.next = None;
                    break;
                }
            }
        }
        Some(current)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn element(doc: &mut Document, name: &str) -> NodeId {
        doc.create_element(name).unwrap()
    }

    #[test]
    fn test_new_document_has_root() {
        let doc = Document::new();
        assert!(matches!(doc.node(doc.root()).kind, NodeKind::Document));
        assert_eq!(doc.node_count(), 1);
        assert_eq!(doc.root_element(), None);
    }

    #[test]
    fn test_create_and_append_element() {
        let mut doc = Document::new();
        let root = doc.root();
        let elem = element(&mut doc, "Portfolio");
        doc.append_child(root, elem).unwrap();

        assert_eq!(doc.first_child(root), Some(elem));
        assert_eq!(doc.last_child(root), Some(elem));
        assert_eq!(doc.owner(elem), Some(root));
        assert_eq!(doc.node_name(elem), Some("Portfolio"));
        assert_eq!(doc.root_element(), Some(elem));
    }

    #[test]
    fn test_append_multiple_children_links_siblings() {
        let mut doc = Document::new();
        let root = element(&mut doc, "r");
        let a = doc.create_text("A");
        let b = doc.create_comment("B").unwrap();
        let c = element(&mut doc, "c");
        doc.append_child(root, a).unwrap();
        doc.append_child(root, b).unwrap();
        doc.append_child(root, c).unwrap();

        assert_eq!(doc.first_child(root), Some(a));
        assert_eq!(doc.last_child(root), Some(c));
        assert_eq!(doc.next_sibling(a), Some(b));
        assert_eq!(doc.next_sibling(b), Some(c));
        assert_eq!(doc.next_sibling(c), None);
        assert_eq!(doc.prev_sibling(c), Some(b));
        assert_eq!(doc.prev_sibling(a), None);
        assert_eq!(doc.children(root).collect::<Vec<_>>(), vec![a, b, c]);
    }

    #[test]
    fn test_append_rejects_attached_child() {
        let mut doc = Document::new();
        let a = element(&mut doc, "a");
        let b = element(&mut doc, "b");
        let c = element(&mut doc, "c");
        doc.append_child(a, c).unwrap();
        let err = doc.append_child(b, c).unwrap_err();
        assert!(matches!(err, TreeError::InvalidAppend { .. }));
    }

    #[test]
    fn test_append_rejects_cycle() {
        let mut doc = Document::new();
        let a = element(&mut doc, "a");
        let b = element(&mut doc, "b");
        doc.append_child(a, b).unwrap();
        assert!(doc.append_child(b, a).is_err());
        assert!(doc.append_child(a, a).is_err());
    }

    #[test]
    fn test_append_rejects_children_under_text() {
        let mut doc = Document::new();
        let t = doc.create_text("x");
        let e = element(&mut doc, "e");
        assert!(doc.append_child(t, e).is_err());
        let root = doc.root();
        assert!(doc.append_child(e, root).is_err());
    }

    #[test]
    fn test_create_element_rejects_bad_names() {
        let mut doc = Document::new();
        assert!(matches!(
            doc.create_element(""),
            Err(TreeError::InvalidName { .. })
        ));
        assert!(doc.create_element("1abc").is_err());
        assert!(doc.create_element("has space").is_err());
        assert!(doc.create_element("Option").is_ok());
    }

    #[test]
    fn test_add_attribute_and_duplicates() {
        let mut doc = Document::new();
        let e = element(&mut doc, "Option");
        doc.add_attribute(e, "K", "100").unwrap();
        doc.add_attribute(e, "Exp", "2019-01-01").unwrap();
        let err = doc.add_attribute(e, "K", "110").unwrap_err();
        assert_eq!(
            err,
            TreeError::DuplicateAttribute {
                element: "Option".to_string(),
                name: "K".to_string(),
            }
        );
        assert_eq!(doc.attribute(e, "K"), Some("100"));
        assert_eq!(doc.attributes(e).len(), 2);
        assert!(doc.has_attributes(e));
        assert_eq!(doc.first_attribute(e).map(|a| a.name.as_str()), Some("K"));
        assert_eq!(doc.last_attribute(e).map(|a| a.name.as_str()), Some("Exp"));
        assert_eq!(doc.attribute(e, "Missing"), None);
    }

    #[test]
    fn test_attributes_of_non_element_are_empty() {
        let mut doc = Document::new();
        let t = doc.create_text("x");
        assert!(doc.attributes(t).is_empty());
        assert!(!doc.has_attributes(t));
        assert_eq!(doc.first_attribute(t), None);
    }

    #[test]
    fn test_descendants_iterator() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = element(&mut doc, "p");
        let a = doc.create_text("hello ");
        let b = element(&mut doc, "b");
        let b_text = doc.create_text("world");
        let tail = doc.create_comment("tail").unwrap();

        doc.append_child(root, p).unwrap();
        doc.append_child(p, a).unwrap();
        doc.append_child(p, b).unwrap();
        doc.append_child(b, b_text).unwrap();
        doc.append_child(root, tail).unwrap();

        let desc: Vec<NodeId> = doc.descendants(root).collect();
        assert_eq!(desc, vec![p, a, b, b_text, tail]);

        let sub: Vec<NodeId> = doc.descendants(p).collect();
        assert_eq!(sub, vec![a, b, b_text]);

        assert_eq!(doc.descendants(b_text).count(), 0);
    }

    #[test]
    fn test_descendants_of_detached_subtree() {
        let mut doc = Document::new();
        let a = element(&mut doc, "a");
        let b = element(&mut doc, "b");
        let c = element(&mut doc, "c");
        doc.append_child(a, b).unwrap();
        doc.append_child(b, c).unwrap();
        assert_eq!(doc.descendants(a).collect::<Vec<_>>(), vec![b, c]);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_foreign_node_id_panics() {
        let big = Document::parse_str("<a><b/><c/><d/></a>").unwrap();
        let small = Document::parse_str("<a/>").unwrap();
        let foreign = big.descendants(big.root()).last().unwrap();
        assert!(!small.contains(foreign));
        let _ = small.first_child(foreign);
    }

    #[test]
    fn test_create_comment_rejects_unprintable_content() {
        let mut doc = Document::new();
        for content in ["a--b", "trailing-", "--", "nul\u{0}"] {
            assert_eq!(
                doc.create_comment(content),
                Err(TreeError::InvalidComment {
                    content: content.to_string(),
                })
            );
        }
        assert!(doc.create_comment(" a - b ").is_ok());
        assert!(doc.create_comment("").is_ok());
    }

    #[test]
    fn test_text_content_skips_comments() {
        let mut doc = Document::new();
        let p = element(&mut doc, "p");
        let t1 = doc.create_text("hello ");
        let c = doc.create_comment("ignored").unwrap();
        let b = element(&mut doc, "b");
        let t2 = doc.create_text("world");
        doc.append_child(p, t1).unwrap();
        doc.append_child(p, c).unwrap();
        doc.append_child(p, b).unwrap();
        doc.append_child(b, t2).unwrap();

        assert_eq!(doc.text_content(p), "hello world");
        assert_eq!(doc.node_text(c), Some("ignored"));
        assert_eq!(doc.node_text(p), None);
    }

    #[test]
    fn test_contains() {
        let mut small = Document::new();
        let mut big = Document::new();
        for _ in 0..5 {
            big.create_text("x");
        }
        let far = big.create_text("far");
        assert!(big.contains(far));
        assert!(!small.contains(far));
        let near = small.create_text("near");
        assert!(small.contains(near));
    }

    #[test]
    fn test_node_count() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = element(&mut doc, "a");
        let b = doc.create_text("text");
        assert_eq!(doc.node_count(), 3);
        doc.append_child(root, a).unwrap();
        doc.append_child(a, b).unwrap();
        assert_eq!(doc.node_count(), 3);
    }

    #[test]
    fn test_parse_str_simple_element() {
        let Ok(doc) = Document::parse_str("<root/>") else {
            panic!("failed to parse simple element");
        };
        let Some(root) = doc.root_element() else {
            panic!("parsed document has no root element");
        };
        assert_eq!(doc.node_name(root), Some("root"));
    }
}
