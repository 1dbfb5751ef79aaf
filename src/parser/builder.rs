//! Tree builder: token stream to `Document`.
//!
//! The builder keeps an explicit stack of open elements instead of
//! recursing, so nesting depth is bounded only by `max_depth`, never by the
//! call stack.

use tracing::{debug, trace};

use super::scanner::{Scanned, Token};
use super::ParseOptions;
use crate::error::{ParseError, SourceLocation};
use crate::tree::{Attribute, Document, NodeId, NodeKind};

/// Builds a [`Document`] from scanned tokens.
///
/// Feed tokens in order with [`feed`](Self::feed), then call
/// [`finish`](Self::finish); or hand a whole token iterator to
/// [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use xmlnav::parser::{ParseOptions, Scanner, TreeBuilder};
///
/// let doc = TreeBuilder::new(&ParseOptions::default())
///     .build(Scanner::new("<a><b/></a>"))
///     .unwrap();
/// assert_eq!(doc.node_count(), 3);
/// ```
#[derive(Debug)]
pub struct TreeBuilder {
    doc: Document,
    /// Elements opened by `TagOpen` and not yet closed, innermost last.
    open: Vec<NodeId>,
    /// The element that attribute tokens currently apply to.
    attribute_target: Option<NodeId>,
    /// An attribute name waiting for its value.
    pending_name: Option<(String, SourceLocation)>,
    has_root: bool,
    max_depth: u32,
    max_attributes: u32,
}

impl TreeBuilder {
    /// Creates a builder with an empty document.
    #[must_use]
    pub fn new(options: &ParseOptions) -> Self {
        Self {
            doc: Document::new(),
            open: Vec::new(),
            attribute_target: None,
            pending_name: None,
            has_root: false,
            max_depth: options.max_depth,
            max_attributes: options.max_attributes,
        }
    }

    /// Consumes every token and finishes the document.
    ///
    /// End-of-input errors are reported at the last token's location.
    ///
    /// # Errors
    ///
    /// Returns the first scanner error, or the first structural error
    /// (see [`feed`](Self::feed) and [`finish`](Self::finish)).
    pub fn build<I>(mut self, tokens: I) -> Result<Document, ParseError>
    where
        I: IntoIterator<Item = Result<Scanned, ParseError>>,
    {
        let mut end = SourceLocation::default();
        for scanned in tokens {
            let scanned = scanned?;
            end = scanned.location;
            self.feed(scanned)?;
        }
        self.finish(end)
    }

    /// Applies one token to the tree under construction.
    ///
    /// # Errors
    ///
    /// - [`ParseError::UnbalancedTag`] if a closing tag does not match the
    ///   innermost open element or nothing is open.
    /// - [`ParseError::DuplicateAttribute`] if an element repeats a name.
    /// - [`ParseError::MalformedMarkup`] for a second root element,
    ///   non-whitespace text outside the root, a misplaced attribute token,
    ///   or an exceeded depth/attribute limit.
    pub fn feed(&mut self, scanned: Scanned) -> Result<(), ParseError> {
        let Scanned { token, location } = scanned;
        trace!(%token, %location, depth = self.open.len(), "building");

        if !matches!(token, Token::AttributeValue(_)) {
            self.expect_no_pending_name()?;
        }

        match token {
            Token::TagOpen(name) => {
                let element = self.open_element(name, location)?;
                self.open.push(element);
            }
            Token::SelfClosingTag(name) => {
                self.open_element(name, location)?;
            }
            Token::TagClose(name) => {
                self.attribute_target = None;
                self.close_element(name, location)?;
            }
            Token::AttributeName(name) => self.attribute_name(name, location)?,
            Token::AttributeValue(value) => self.attribute_value(value, location)?,
            Token::Comment(text) => {
                self.attribute_target = None;
                let comment = self.doc.create_node(NodeKind::Comment { content: text });
                self.doc.link_child(self.current(), comment);
            }
            Token::TextRun(text) => {
                self.attribute_target = None;
                self.text_run(&text, location)?;
            }
        }
        Ok(())
    }

    /// Checks that the document is complete and returns it.
    ///
    /// `end` is the location reported for end-of-input errors.
    ///
    /// # Errors
    ///
    /// - [`ParseError::UnbalancedTag`] if elements are still open.
    /// - [`ParseError::MalformedMarkup`] if there is no root element or an
    ///   attribute name is missing its value.
    pub fn finish(self, end: SourceLocation) -> Result<Document, ParseError> {
        self.expect_no_pending_name()?;
        if let Some(&innermost) = self.open.last() {
            return Err(ParseError::UnbalancedTag {
                open: self.doc.node_name(innermost).map(str::to_string),
                close: None,
                location: end,
            });
        }
        if !self.has_root {
            return Err(ParseError::malformed("no root element", end));
        }
        debug!(nodes = self.doc.node_count(), "tree built");
        Ok(self.doc)
    }

    /// The node new children are appended to.
    fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or_else(|| self.doc.root())
    }

    fn expect_no_pending_name(&self) -> Result<(), ParseError> {
        match &self.pending_name {
            Some((name, location)) => Err(ParseError::malformed(
                format!("attribute '{name}' has no value"),
                *location,
            )),
            None => Ok(()),
        }
    }

    fn open_element(&mut self, name: String, location: SourceLocation) -> Result<NodeId, ParseError> {
        if self.open.is_empty() {
            if self.has_root {
                return Err(ParseError::malformed(
                    format!("second root element <{name}>"),
                    location,
                ));
            }
            self.has_root = true;
        }
        if self.open.len() >= self.max_depth as usize {
            return Err(ParseError::malformed(
                format!("maximum nesting depth ({}) exceeded", self.max_depth),
                location,
            ));
        }

        let parent = self.current();
        let element = self.doc.create_node(NodeKind::Element {
            name,
            attributes: Vec::new(),
        });
        self.doc.link_child(parent, element);
        self.attribute_target = Some(element);
        Ok(element)
    }

    fn close_element(&mut self, name: String, location: SourceLocation) -> Result<(), ParseError> {
        let Some(&innermost) = self.open.last() else {
            return Err(ParseError::UnbalancedTag {
                open: None,
                close: Some(name),
                location,
            });
        };
        let open_name = self.doc.node_name(innermost).unwrap_or_default();
        if open_name != name {
            return Err(ParseError::UnbalancedTag {
                open: Some(open_name.to_string()),
                close: Some(name),
                location,
            });
        }
        self.open.pop();
        Ok(())
    }

    fn attribute_name(&mut self, name: String, location: SourceLocation) -> Result<(), ParseError> {
        let Some(target) = self.attribute_target else {
            return Err(ParseError::malformed(
                format!("attribute '{name}' outside of a start tag"),
                location,
            ));
        };
        if self.doc.attribute(target, &name).is_some() {
            return Err(ParseError::DuplicateAttribute {
                element: self.doc.node_name(target).unwrap_or_default().to_string(),
                name,
                location,
            });
        }
        if self.doc.attributes(target).len() >= self.max_attributes as usize {
            return Err(ParseError::malformed(
                format!("too many attributes (limit {})", self.max_attributes),
                location,
            ));
        }
        self.pending_name = Some((name, location));
        Ok(())
    }

    fn attribute_value(&mut self, value: String, location: SourceLocation) -> Result<(), ParseError> {
        let (Some(target), Some((name, _))) = (self.attribute_target, self.pending_name.take())
        else {
            return Err(ParseError::malformed(
                "attribute value without a name",
                location,
            ));
        };
        self.doc.push_attribute(target, Attribute { name, value });
        Ok(())
    }

    fn text_run(&mut self, text: &str, location: SourceLocation) -> Result<(), ParseError> {
        if self.open.is_empty() && !text.chars().all(char::is_whitespace) {
            return Err(ParseError::malformed(
                "text outside the root element",
                location,
            ));
        }
        let parent = self.current();
        // Adjacent runs (text next to a CDATA section) form one text node.
        if let Some(last) = self.doc.last_child(parent) {
            if self.doc.extend_text(last, text) {
                return Ok(());
            }
        }
        let node = self.doc.create_text(text);
        self.doc.link_child(parent, node);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::parser::Scanner;
    use pretty_assertions::assert_eq;

    fn build(input: &str) -> Result<Document, ParseError> {
        TreeBuilder::new(&ParseOptions::default()).build(Scanner::new(input))
    }

    fn at(line: u32, column: u32, byte_offset: usize) -> SourceLocation {
        SourceLocation {
            line,
            column,
            byte_offset,
        }
    }

    fn scanned(token: Token) -> Scanned {
        Scanned {
            token,
            location: SourceLocation::default(),
        }
    }

    #[test]
    fn test_builds_nested_elements() {
        let doc = build("<Portfolio><Option K='100'/><Strategy><Option K='110'/></Strategy></Portfolio>")
            .unwrap();
        let root = doc.root_element().unwrap();
        assert_eq!(doc.node_name(root), Some("Portfolio"));
        let kids: Vec<_> = doc.children(root).collect();
        assert_eq!(kids.len(), 2);
        assert_eq!(doc.attribute(kids[0], "K"), Some("100"));
        assert_eq!(doc.node_name(kids[1]), Some("Strategy"));
        let leg = doc.first_child(kids[1]).unwrap();
        assert_eq!(doc.attribute(leg, "K"), Some("110"));
        assert_eq!(doc.owner(leg), Some(kids[1]));
    }

    #[test]
    fn test_attribute_order_preserved() {
        let doc = build("<o b='2' a='1' c='3'/>").unwrap();
        let root = doc.root_element().unwrap();
        let names: Vec<&str> = doc
            .attributes(root)
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_mismatched_close_is_unbalanced() {
        let err = build("<Option K='1'><Option K='2'></Wrong>").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnbalancedTag {
                open: Some("Option".to_string()),
                close: Some("Wrong".to_string()),
                location: at(1, 29, 28),
            }
        );
    }

    #[test]
    fn test_unclosed_element_is_unbalanced() {
        let err = build("<a><b></b>").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnbalancedTag { open: Some(ref o), close: None, .. } if o == "a"
        ));
    }

    #[test]
    fn test_stray_close_is_unbalanced() {
        let err = build("<a/></a>").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnbalancedTag { open: None, close: Some(ref c), .. } if c == "a"
        ));
    }

    #[test]
    fn test_duplicate_attribute() {
        let err = build("<Option K='1' K='2' />").unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateAttribute {
                element: "Option".to_string(),
                name: "K".to_string(),
                location: at(1, 15, 14),
            }
        );
    }

    #[test]
    fn test_document_shape_errors() {
        for input in ["<a/><b/>", "text<a/>", "<a/>tail", "", "<!-- only -->"] {
            let err = build(input).unwrap_err();
            assert!(
                matches!(err, ParseError::MalformedMarkup { .. }),
                "{input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_top_level_comments_and_whitespace_kept() {
        let doc = build("<!-- head -->\n<a/>\n").unwrap();
        let kinds: Vec<&str> = doc
            .children(doc.root())
            .map(|id| doc.node(id).kind.type_name())
            .collect();
        assert_eq!(kinds, vec!["comment", "text", "element", "text"]);
    }

    #[test]
    fn test_cdata_merges_with_adjacent_text() {
        let doc = build("<a>x<![CDATA[<y>]]>z</a>").unwrap();
        let root = doc.root_element().unwrap();
        assert_eq!(doc.children(root).count(), 1);
        assert_eq!(doc.text_content(root), "x<y>z");
    }

    #[test]
    fn test_depth_limit() {
        let opts = ParseOptions::default().max_depth(3);
        let ok = TreeBuilder::new(&opts).build(Scanner::new("<a><b><c/></b></a>"));
        assert!(ok.is_ok());
        let err = TreeBuilder::new(&opts)
            .build(Scanner::new("<a><b><c><d/></c></b></a>"))
            .unwrap_err();
        assert!(err.to_string().contains("nesting depth"));
    }

    #[test]
    fn test_attribute_limit() {
        let opts = ParseOptions::default().max_attributes(2);
        let err = TreeBuilder::new(&opts)
            .build(Scanner::new("<a x='1' y='2' z='3'/>"))
            .unwrap_err();
        assert!(err.to_string().contains("too many attributes"));
    }

    #[test]
    fn test_misplaced_attribute_tokens() {
        let mut builder = TreeBuilder::new(&ParseOptions::default());
        let err = builder
            .feed(scanned(Token::AttributeName("k".to_string())))
            .unwrap_err();
        assert!(err.to_string().contains("outside of a start tag"));

        let mut builder = TreeBuilder::new(&ParseOptions::default());
        builder
            .feed(scanned(Token::TagOpen("a".to_string())))
            .unwrap();
        builder
            .feed(scanned(Token::AttributeName("k".to_string())))
            .unwrap();
        let err = builder
            .feed(scanned(Token::TagClose("a".to_string())))
            .unwrap_err();
        assert!(err.to_string().contains("has no value"));

        let mut builder = TreeBuilder::new(&ParseOptions::default());
        builder
            .feed(scanned(Token::TagOpen("a".to_string())))
            .unwrap();
        let err = builder
            .feed(scanned(Token::AttributeValue("v".to_string())))
            .unwrap_err();
        assert!(err.to_string().contains("without a name"));
    }

    #[test]
    fn test_scanner_error_propagates() {
        let err = build("<a k=1/>").unwrap_err();
        assert!(matches!(err, ParseError::MalformedMarkup { .. }));
    }
}
