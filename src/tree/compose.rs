//! Functional construction of element trees.
//!
//! An [`ElementBuilder`] describes an element, its attributes and its
//! content as a plain value. Children can come from any iterator, so a tree
//! can be assembled from a query over ordinary data:
//!
//! ```
//! use xmlnav::ElementBuilder;
//!
//! let expiries = ["2019-01-01", "2020-01-01"];
//! let strikes = [100, 110];
//!
//! let doc = ElementBuilder::new("Portfolio")
//!     .children(expiries.iter().flat_map(|exp| {
//!         strikes
//!             .iter()
//!             .map(move |k| ElementBuilder::new("Option").attr("K", k).attr("Exp", exp))
//!     }))
//!     .build()
//!     .unwrap();
//!
//! let root = doc.root_element().unwrap();
//! assert_eq!(doc.element_children(root, Some("Option")).count(), 4);
//! ```
//!
//! Validation happens when the description is materialized: names must be
//! valid and attribute names unique per element.

use super::{Document, NodeId};
use crate::error::TreeError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Element(ElementBuilder),
    Text(String),
    Comment(String),
}

/// A value describing an element to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementBuilder {
    name: String,
    attributes: Vec<(String, String)>,
    content: Vec<Content>,
}

impl ElementBuilder {
    /// Starts describing an element with the given tag name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            content: Vec::new(),
        }
    }

    /// Adds an attribute. Any displayable value is accepted.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.push((name.into(), value.to_string()));
        self
    }

    /// Appends a child element.
    #[must_use]
    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.content.push(Content::Element(child));
        self
    }

    /// Appends every element produced by `children`, in order.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = ElementBuilder>) -> Self {
        self.content
            .extend(children.into_iter().map(Content::Element));
        self
    }

    /// Appends a text child.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content.push(Content::Text(text.into()));
        self
    }

    /// Appends a comment child.
    #[must_use]
    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.content.push(Content::Comment(text.into()));
        self
    }

    /// Creates a new document whose root element is this element.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidName`] for an invalid tag or attribute
    /// name, [`TreeError::DuplicateAttribute`] for a repeated attribute and
    /// [`TreeError::InvalidComment`] for comment text that cannot be
    /// printed, anywhere in the described tree.
    ///
    /// Empty text is dropped and adjacent text joins into one node, so the
    /// built tree is the one its printed form parses back to.
    pub fn build(self) -> Result<Document, TreeError> {
        let mut doc = Document::new();
        let root = doc.root();
        self.append_to(&mut doc, root)?;
        Ok(doc)
    }

    /// Materializes this element and appends it as the last child of
    /// `parent`. Returns the new element's id.
    ///
    /// Nothing is attached to `parent` unless the whole subtree is valid.
    ///
    /// # Errors
    ///
    /// As for [`build`](Self::build), plus [`TreeError::InvalidAppend`] if
    /// `parent` cannot hold children.
    pub fn append_to(self, doc: &mut Document, parent: NodeId) -> Result<NodeId, TreeError> {
        let element = self.materialize(doc)?;
        doc.append_child(parent, element)?;
        Ok(element)
    }

    /// Creates the subtree detached from any parent.
    fn materialize(self, doc: &mut Document) -> Result<NodeId, TreeError> {
        let element = doc.create_element(&self.name)?;
        for (name, value) in &self.attributes {
            doc.add_attribute(element, name, value)?;
        }
        for content in self.content {
            let child = match content {
                Content::Element(builder) => builder.materialize(doc)?,
                Content::Text(text) if text.is_empty() => continue,
                Content::Text(text) => {
                    if let Some(last) = doc.last_child(element) {
                        if doc.extend_text(last, &text) {
                            continue;
                        }
                    }
                    doc.create_text(&text)
                }
                Content::Comment(text) => doc.create_comment(&text)?,
            };
            doc.link_child(element, child);
        }
        Ok(element)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compose_by_objects() {
        let doc = ElementBuilder::new("Portfolio")
            .child(
                ElementBuilder::new("Option")
                    .attr("K", "100")
                    .attr("E", "2019-01-01"),
            )
            .child(
                ElementBuilder::new("Option")
                    .attr("K", "100")
                    .attr("E", "2019-01-01"),
            )
            .build()
            .unwrap();
        let root = doc.root_element().unwrap();
        assert_eq!(doc.node_name(root), Some("Portfolio"));
        let options: Vec<NodeId> = doc.element_children(root, Some("Option")).collect();
        assert_eq!(options.len(), 2);
        for option in options {
            assert_eq!(doc.attribute(option, "K"), Some("100"));
            assert_eq!(doc.attribute(option, "E"), Some("2019-01-01"));
            assert_eq!(doc.parent(option), Some(root));
        }
    }

    #[test]
    fn test_compose_from_iterator_keeps_order() {
        let expiries = ["2019-01-01", "2020-01-01"];
        let strikes = [100, 110];
        let doc = ElementBuilder::new("Portfolio")
            .children(expiries.iter().flat_map(|exp| {
                strikes
                    .iter()
                    .map(move |k| ElementBuilder::new("Option").attr("K", k).attr("Exp", exp))
            }))
            .build()
            .unwrap();
        let root = doc.root_element().unwrap();
        let pairs: Vec<(String, String)> = doc
            .element_children(root, None)
            .map(|id| {
                (
                    doc.attribute(id, "Exp").unwrap().to_string(),
                    doc.attribute(id, "K").unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("2019-01-01".to_string(), "100".to_string()),
                ("2019-01-01".to_string(), "110".to_string()),
                ("2020-01-01".to_string(), "100".to_string()),
                ("2020-01-01".to_string(), "110".to_string()),
            ]
        );
    }

    #[test]
    fn test_mixed_content() {
        let doc = ElementBuilder::new("note")
            .comment("draft")
            .text("hello ")
            .child(ElementBuilder::new("b").text("world"))
            .build()
            .unwrap();
        let root = doc.root_element().unwrap();
        assert_eq!(doc.children(root).count(), 3);
        assert_eq!(doc.text_content(root), "hello world");
    }

    #[test]
    fn test_empty_and_adjacent_text_match_reparse() {
        let doc = ElementBuilder::new("a")
            .text("")
            .child(ElementBuilder::new("b").text(""))
            .text("x")
            .text("")
            .text("y")
            .build()
            .unwrap();
        let root = doc.root_element().unwrap();
        let kinds: Vec<&str> = doc
            .children(root)
            .map(|id| doc.node(id).kind.type_name())
            .collect();
        assert_eq!(kinds, vec!["element", "text"]);
        assert_eq!(doc.node_text(doc.last_child(root).unwrap()), Some("xy"));

        let printed = crate::serial::serialize(&doc);
        assert_eq!(printed, "<a><b/>xy</a>");
        let reparsed = Document::parse_str(&printed).unwrap();
        let reparsed_root = reparsed.root_element().unwrap();
        assert_eq!(reparsed.children(reparsed_root).count(), 2);
    }

    #[test]
    fn test_unprintable_comment_rejected() {
        for content in ["x-", "a--b", "-", "bell\u{7}"] {
            let err = ElementBuilder::new("a")
                .child(ElementBuilder::new("b").comment(content))
                .build()
                .unwrap_err();
            assert_eq!(
                err,
                TreeError::InvalidComment {
                    content: content.to_string(),
                },
                "{content:?} should be rejected"
            );
        }
        let doc = ElementBuilder::new("a").comment("-x").comment("").build().unwrap();
        let printed = crate::serial::serialize(&doc);
        assert_eq!(printed, "<a><!---x--><!----></a>");
        assert!(Document::parse_str(&printed).is_ok());
    }

    #[test]
    fn test_duplicate_attribute_rejected() {
        let err = ElementBuilder::new("Option")
            .attr("K", 1)
            .attr("K", 2)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            TreeError::DuplicateAttribute {
                element: "Option".to_string(),
                name: "K".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_nested_name_rejected() {
        let err = ElementBuilder::new("ok")
            .child(ElementBuilder::new("not ok"))
            .build()
            .unwrap_err();
        assert!(matches!(err, TreeError::InvalidName { .. }));
    }

    #[test]
    fn test_append_to_existing_tree() {
        let mut doc = Document::parse_str("<Portfolio><Option K='100'/></Portfolio>").unwrap();
        let root = doc.root_element().unwrap();
        let added = ElementBuilder::new("Strategy")
            .child(ElementBuilder::new("Option").attr("K", 110))
            .append_to(&mut doc, root)
            .unwrap();
        assert_eq!(doc.last_child(root), Some(added));
        assert_eq!(doc.descendant_elements(root, Some("Option")).count(), 2);
    }

    #[test]
    fn test_failed_append_leaves_parent_untouched() {
        let mut doc = Document::parse_str("<p/>").unwrap();
        let root = doc.root_element().unwrap();
        let result = ElementBuilder::new("a")
            .child(ElementBuilder::new("b").attr("x", 1).attr("x", 2))
            .append_to(&mut doc, root);
        assert!(result.is_err());
        assert_eq!(doc.first_child(root), None);
    }
}
