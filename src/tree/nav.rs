//! Read-only navigation over a built tree.
//!
//! Every operation here takes `&Document` and returns either an
//! `Option<NodeId>` or a lazy iterator in document order. Absence (no such
//! child, no parent, an unknown name) is an empty result, never an error.
//! The only fallible operation is document-order comparison, which is
//! undefined between nodes of different trees.

use std::cmp::Ordering;

use super::{Children, Descendants, Document, NodeId};
use crate::error::TreeError;

impl Document {
    /// Returns the parent element of a node.
    ///
    /// Returns `None` for the root element and for top-level comments, whose
    /// owner is the document node rather than an element, and for detached
    /// nodes.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.owner(id).filter(|&p| self.is_element(p))
    }

    /// Returns the element children of a node, optionally filtered by tag name.
    ///
    /// # Examples
    ///
    /// ```
    /// use xmlnav::Document;
    ///
    /// let doc = Document::parse_str("<P><S/><O/><S/></P>").unwrap();
    /// let root = doc.root_element().unwrap();
    /// assert_eq!(doc.element_children(root, None).count(), 3);
    /// assert_eq!(doc.element_children(root, Some("S")).count(), 2);
    /// assert_eq!(doc.element_children(root, Some("Missing")).count(), 0);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    pub fn element_children<'a>(&'a self, id: NodeId, name: Option<&'a str>) -> ElementChildren<'a> {
        ElementChildren {
            doc: self,
            inner: self.children(id),
            name,
        }
    }

    /// Returns the first element child, optionally with the given tag name.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn first_element_child(&self, id: NodeId, name: Option<&str>) -> Option<NodeId> {
        self.element_children(id, name).next()
    }

    /// Returns the descendant elements of a node in pre-order, optionally
    /// filtered by tag name. The node itself is not included.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    pub fn descendant_elements<'a>(
        &'a self,
        id: NodeId,
        name: Option<&'a str>,
    ) -> DescendantElements<'a> {
        DescendantElements {
            doc: self,
            inner: self.descendants(id),
            name,
        }
    }

    /// Returns the ancestor elements of a node, nearest first.
    ///
    /// With `include_self`, an element node is yielded before its
    /// ancestors. The document node is never yielded.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    pub fn ancestors(&self, id: NodeId, include_self: bool) -> Ancestors<'_> {
        let next = if include_self && self.is_element(id) {
            Some(id)
        } else {
            self.parent(id)
        };
        Ancestors { doc: self, next }
    }

    /// Returns the siblings following a node, in document order.
    ///
    /// With `elements_only`, text and comment siblings are skipped. A `name`
    /// filter only ever matches elements.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    pub fn siblings_after<'a>(
        &'a self,
        id: NodeId,
        elements_only: bool,
        name: Option<&'a str>,
    ) -> Siblings<'a> {
        Siblings {
            doc: self,
            next: self.next_sibling(id),
            stop: None,
            elements_only,
            name,
        }
    }

    /// Returns the siblings preceding a node, in document order (the
    /// nearest sibling comes last).
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    pub fn siblings_before<'a>(
        &'a self,
        id: NodeId,
        elements_only: bool,
        name: Option<&'a str>,
    ) -> Siblings<'a> {
        let mut first = id;
        while let Some(prev) = self.prev_sibling(first) {
            first = prev;
        }
        Siblings {
            doc: self,
            next: (first != id).then_some(first),
            stop: Some(id),
            elements_only,
            name,
        }
    }

    // --- Document order ---

    /// Compares two nodes by document order.
    ///
    /// The order is the pre-order traversal of the tree the two nodes share:
    /// an ancestor comes before its descendants, and earlier siblings (with
    /// their subtrees) come before later ones.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::IncomparableNodes`] if either id does not belong
    /// to this document or if the nodes are in different trees (for
    /// example, one of them is detached).
    pub fn compare_document_order(&self, a: NodeId, b: NodeId) -> Result<Ordering, TreeError> {
        if !self.contains(a) || !self.contains(b) {
            return Err(TreeError::IncomparableNodes);
        }
        if a == b {
            return Ok(Ordering::Equal);
        }

        let path_a = self.path_from_root(a);
        let path_b = self.path_from_root(b);
        if path_a.first() != path_b.first() {
            return Err(TreeError::IncomparableNodes);
        }

        let common = path_a
            .iter()
            .zip(&path_b)
            .take_while(|(x, y)| x == y)
            .count();
        if common == path_a.len() {
            // a is an ancestor of b
            return Ok(Ordering::Less);
        }
        if common == path_b.len() {
            return Ok(Ordering::Greater);
        }

        // path_a[common] and path_b[common] are distinct siblings
        let target = path_b[common];
        let mut cursor = self.next_sibling(path_a[common]);
        while let Some(sibling) = cursor {
            if sibling == target {
                return Ok(Ordering::Less);
            }
            cursor = self.next_sibling(sibling);
        }
        Ok(Ordering::Greater)
    }

    /// Returns `true` if `a` comes strictly before `b` in document order.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::IncomparableNodes`] if the nodes do not share a
    /// root.
    pub fn is_before(&self, a: NodeId, b: NodeId) -> Result<bool, TreeError> {
        Ok(self.compare_document_order(a, b)? == Ordering::Less)
    }

    /// Returns `true` if `a` comes strictly after `b` in document order.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::IncomparableNodes`] if the nodes do not share a
    /// root.
    pub fn is_after(&self, a: NodeId, b: NodeId) -> Result<bool, TreeError> {
        Ok(self.compare_document_order(a, b)? == Ordering::Greater)
    }

    /// Returns the top of the tree containing `id`: the document node for
    /// attached nodes, the detached subtree's head otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn tree_root(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(owner) = self.owner(current) {
            current = owner;
        }
        current
    }

    /// The owner chain of `id`, from its tree root down to `id` itself.
    fn path_from_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(owner) = self.owner(current) {
            path.push(owner);
            current = owner;
        }
        path.reverse();
        path
    }

    fn matches_name(&self, id: NodeId, name: Option<&str>) -> bool {
        match name {
            None => self.is_element(id),
            Some(name) => self.node_name(id) == Some(name),
        }
    }
}

// --- Iterators ---

/// Element children of a node, optionally filtered by name.
#[derive(Debug, Clone)]
pub struct ElementChildren<'a> {
    doc: &'a Document,
    inner: Children<'a>,
    name: Option<&'a str>,
}

impl Iterator for ElementChildren<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let (doc, name) = (self.doc, self.name);
        self.inner.find(|&id| doc.matches_name(id, name))
    }
}

/// Pre-order descendant elements of a node, optionally filtered by name.
#[derive(Debug, Clone)]
pub struct DescendantElements<'a> {
    doc: &'a Document,
    inner: Descendants<'a>,
    name: Option<&'a str>,
}

impl Iterator for DescendantElements<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let (doc, name) = (self.doc, self.name);
        self.inner.find(|&id| doc.matches_name(id, name))
    }
}

/// Ancestor elements of a node, nearest first.
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

/// A run of siblings in document order, optionally filtered.
#[derive(Debug, Clone)]
pub struct Siblings<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
    stop: Option<NodeId>,
    elements_only: bool,
    name: Option<&'a str>,
}

impl Iterator for Siblings<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.next {
            if Some(current) == self.stop {
                self.next = None;
                return None;
            }
            self.next = self.doc.next_sibling(current);
            let keep = if self.name.is_some() || self.elements_only {
                self.doc.matches_name(current, self.name)
            } else {
                true
            };
            if keep {
                return Some(current);
            }
        }
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::parser::ParseOptions;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "<Portfolio>\
        <!-- Some Options -->\
        <Option K='100'/>\
        <Strategy><Option K='110'/><Option K='120'/></Strategy>\
        <Strategy><Option K='210'/><Option K='200'/></Strategy>\
        <Option K='1010'/>\
        </Portfolio>";

    fn sample() -> (Document, NodeId) {
        let doc = Document::parse_str(SAMPLE).unwrap();
        let root = doc.root_element().unwrap();
        (doc, root)
    }

    fn strikes(doc: &Document, ids: impl Iterator<Item = NodeId>) -> Vec<String> {
        ids.map(|id| doc.attribute(id, "K").unwrap_or("-").to_string())
            .collect()
    }

    #[test]
    fn test_parent_of_root_element_is_none() {
        let (doc, root) = sample();
        assert_eq!(doc.parent(root), None);
        let comment = doc.first_child(root).unwrap();
        assert_eq!(doc.parent(comment), Some(root));
    }

    #[test]
    fn test_parent_of_top_level_comment_is_none() {
        let doc = Document::parse_str("<!--c--><r/>").unwrap();
        let comment = doc.first_child(doc.root()).unwrap();
        assert!(doc.is_comment(comment));
        assert_eq!(doc.parent(comment), None);
    }

    #[test]
    fn test_element_children_filters() {
        let (doc, root) = sample();
        assert_eq!(doc.children(root).count(), 5);
        assert_eq!(doc.element_children(root, None).count(), 4);
        assert_eq!(doc.element_children(root, Some("Strategy")).count(), 2);
        assert_eq!(doc.element_children(root, Some("Missing")).count(), 0);
        let first = doc.first_element_child(root, Some("Option")).unwrap();
        assert_eq!(doc.attribute(first, "K"), Some("100"));
        assert_eq!(doc.first_element_child(root, Some("Missing")), None);
    }

    #[test]
    fn test_descendant_elements_pre_order() {
        let (doc, root) = sample();
        assert_eq!(
            strikes(&doc, doc.descendant_elements(root, Some("Option"))),
            vec!["100", "110", "120", "210", "200", "1010"]
        );
        assert_eq!(doc.descendant_elements(root, None).count(), 8);
    }

    #[test]
    fn test_ancestors_with_and_without_self() {
        let (doc, root) = sample();
        let strategy = doc.first_element_child(root, Some("Strategy")).unwrap();
        let leg = doc.first_element_child(strategy, Some("Option")).unwrap();

        assert_eq!(doc.ancestors(leg, false).collect::<Vec<_>>(), vec![strategy, root]);
        assert_eq!(
            doc.ancestors(leg, true).collect::<Vec<_>>(),
            vec![leg, strategy, root]
        );
        assert_eq!(doc.ancestors(root, false).count(), 0);
    }

    #[test]
    fn test_ancestors_of_text_skip_self() {
        let doc = Document::parse_str("<a><b>t</b></a>").unwrap();
        let a = doc.root_element().unwrap();
        let b = doc.first_element_child(a, None).unwrap();
        let t = doc.first_child(b).unwrap();
        assert_eq!(doc.ancestors(t, true).collect::<Vec<_>>(), vec![b, a]);
    }

    #[test]
    fn test_siblings_after_and_before() {
        let (doc, root) = sample();
        let first = doc.first_child(root).unwrap();
        let last = doc.last_child(root).unwrap();

        assert_eq!(doc.siblings_after(first, false, None).count(), 4);
        assert_eq!(doc.siblings_before(last, false, None).count(), 4);
        assert_eq!(doc.siblings_before(last, false, None).next(), Some(first));

        assert_eq!(
            strikes(&doc, doc.siblings_before(last, true, Some("Option"))),
            vec!["100"]
        );
        assert_eq!(doc.siblings_after(first, true, Some("Strategy")).count(), 2);
        assert_eq!(doc.siblings_after(last, false, None).count(), 0);
        assert_eq!(doc.siblings_before(first, false, None).count(), 0);
    }

    #[test]
    fn test_siblings_before_in_document_order() {
        let (doc, root) = sample();
        let last = doc.last_child(root).unwrap();
        let before: Vec<NodeId> = doc.siblings_before(last, true, None).collect();
        let expected: Vec<NodeId> = doc
            .element_children(root, None)
            .filter(|&id| id != last)
            .collect();
        assert_eq!(before, expected);
    }

    #[test]
    fn test_is_before_is_after() {
        let (doc, root) = sample();
        let strategies: Vec<NodeId> = doc.element_children(root, Some("Strategy")).collect();
        let a = doc.first_element_child(strategies[1], None).unwrap();
        let b = doc.first_element_child(strategies[0], None).unwrap();

        assert!(!doc.is_before(a, b).unwrap());
        assert!(doc.is_after(a, b).unwrap());
        assert!(doc.is_before(root, a).unwrap());
        assert!(doc.is_after(a, strategies[1]).unwrap());
        assert!(!doc.is_before(a, a).unwrap());
        assert!(!doc.is_after(a, a).unwrap());
    }

    #[test]
    fn test_document_order_is_total_and_matches_pre_order() {
        let (doc, _) = sample();
        let all: Vec<NodeId> = doc.descendants(doc.root()).collect();
        for (i, &a) in all.iter().enumerate() {
            for (j, &b) in all.iter().enumerate() {
                let before = doc.is_before(a, b).unwrap();
                let after = doc.is_before(b, a).unwrap();
                assert_eq!(before, i < j);
                if i != j {
                    assert!(before ^ after);
                }
            }
        }
    }

    #[test]
    fn test_detached_nodes_are_incomparable() {
        let (mut doc, root) = sample();
        let loose = doc.create_element("Loose").unwrap();
        assert_eq!(
            doc.is_before(root, loose),
            Err(TreeError::IncomparableNodes)
        );
        assert_eq!(doc.tree_root(loose), loose);
        assert_eq!(doc.tree_root(root), doc.root());
    }

    #[test]
    fn test_foreign_id_is_incomparable() {
        let mut big = Document::new();
        let mut far = big.root();
        for _ in 0..40 {
            far = big.create_text("x");
        }
        let (doc, root) = sample();
        assert!(!doc.contains(far));
        assert_eq!(doc.is_after(root, far), Err(TreeError::IncomparableNodes));
    }

    #[test]
    fn test_trimmed_sample_first_child_is_comment() {
        let text = "<Portfolio>\n  <!-- Some Options -->\n  <Option K='100'/>\n</Portfolio>";
        let raw = Document::parse_str(text).unwrap();
        let raw_root = raw.root_element().unwrap();
        assert!(raw.is_text(raw.first_child(raw_root).unwrap()));

        let opts = ParseOptions::default().trim_whitespace(true);
        let doc = Document::parse_str_with_options(text, &opts).unwrap();
        let root = doc.root_element().unwrap();
        assert!(doc.is_comment(doc.first_child(root).unwrap()));
    }
}
