//! Markup serializer.
//!
//! Serializes a `Document`, or any node of it, back into markup text.
//! With default options the output preserves every text node exactly, so
//! parsing it again yields the same tree structure.

use crate::tree::{Document, NodeId, NodeKind};

/// The quote character used around attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    /// `name="value"` (default).
    #[default]
    Double,
    /// `name='value'`.
    Single,
}

impl QuoteStyle {
    fn char(self) -> char {
        match self {
            Self::Double => '"',
            Self::Single => '\'',
        }
    }
}

/// Options controlling serialization output.
///
/// # Examples
///
/// ```
/// use xmlnav::Document;
/// use xmlnav::serial::{serialize_with_options, SerializeOptions};
///
/// let doc = Document::parse_str("<root><child>Hello</child></root>").unwrap();
/// let xml = serialize_with_options(&doc, &SerializeOptions::default().indent(true));
/// assert!(xml.contains("  <child>"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Whether to produce indented (pretty-printed) output.
    /// Defaults to `false`.
    pub indent: bool,
    /// The indentation string used for each level when `indent` is `true`.
    /// Defaults to two spaces.
    pub indent_str: String,
    /// The quote character for attribute values. Defaults to double quotes.
    pub quote: QuoteStyle,
    /// Whether to start document output with `<?xml version="1.0"?>`.
    /// Defaults to `false`.
    pub declaration: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            indent: false,
            indent_str: "  ".to_string(),
            quote: QuoteStyle::Double,
            declaration: false,
        }
    }
}

impl SerializeOptions {
    /// Enables or disables indented (pretty-printed) output.
    ///
    /// When enabled, child elements are placed on their own lines with
    /// indentation. Mixed-content elements (those containing both text and
    /// element children) are written as-is, and whitespace-only text
    /// between elements is replaced by the layout.
    #[must_use]
    pub fn indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the indentation string used for each nesting level.
    #[must_use]
    pub fn indent_str(mut self, s: &str) -> Self {
        self.indent_str = s.to_string();
        self
    }

    /// Sets the attribute quote character.
    #[must_use]
    pub fn quote(mut self, quote: QuoteStyle) -> Self {
        self.quote = quote;
        self
    }

    /// Enables or disables the leading XML declaration.
    #[must_use]
    pub fn declaration(mut self, yes: bool) -> Self {
        self.declaration = yes;
        self
    }
}

/// Serializes a document to a string.
///
/// # Examples
///
/// ```
/// use xmlnav::Document;
/// use xmlnav::serial::serialize;
///
/// let doc = Document::parse_str("<root><child>Hello</child></root>").unwrap();
/// assert_eq!(serialize(&doc), "<root><child>Hello</child></root>");
/// ```
#[must_use]
pub fn serialize(doc: &Document) -> String {
    serialize_with_options(doc, &SerializeOptions::default())
}

/// Serializes a document to a string with the given options.
#[must_use]
pub fn serialize_with_options(doc: &Document, options: &SerializeOptions) -> String {
    let mut output = String::new();
    if options.declaration {
        output.push_str("<?xml version=\"1.0\"?>\n");
    }
    write_document_children(doc, doc.root(), &mut output, options);
    output
}

/// Serializes a single node (and its subtree) to a string.
///
/// For the document node this is the same as [`serialize`] without a
/// declaration.
///
/// # Examples
///
/// ```
/// use xmlnav::Document;
/// use xmlnav::serial::serialize_node;
///
/// let doc = Document::parse_str("<P><O K='1'/></P>").unwrap();
/// let root = doc.root_element().unwrap();
/// let option = doc.first_child(root).unwrap();
/// assert_eq!(serialize_node(&doc, option), "<O K=\"1\"/>");
/// ```
#[must_use]
pub fn serialize_node(doc: &Document, id: NodeId) -> String {
    serialize_node_with_options(doc, id, &SerializeOptions::default())
}

/// Serializes a single node (and its subtree) with the given options.
///
/// The declaration option is ignored here.
#[must_use]
pub fn serialize_node_with_options(doc: &Document, id: NodeId, options: &SerializeOptions) -> String {
    let mut output = String::new();
    if matches!(doc.node(id).kind, NodeKind::Document) {
        write_document_children(doc, id, &mut output, options);
    } else {
        write_node(doc, id, &mut output, options, 0, false);
    }
    output
}

fn write_document_children(doc: &Document, id: NodeId, out: &mut String, options: &SerializeOptions) {
    for child in doc.children(id) {
        if options.indent {
            if is_blank_text(doc, child) {
                continue;
            }
            write_node(doc, child, out, options, 0, true);
        } else {
            write_node(doc, child, out, options, 0, false);
        }
    }
}

fn is_blank_text(doc: &Document, id: NodeId) -> bool {
    matches!(&doc.node(id).kind, NodeKind::Text { content } if content.trim().is_empty())
}

/// Returns `true` if the element contains only other elements and comments
/// (and optional whitespace text), meaning it's safe to add indentation.
fn is_element_only(doc: &Document, id: NodeId) -> bool {
    let mut has_element_child = false;
    for child in doc.children(id) {
        match &doc.node(child).kind {
            NodeKind::Element { .. } => has_element_child = true,
            NodeKind::Text { content } => {
                if !content.trim().is_empty() {
                    return false;
                }
            }
            NodeKind::Comment { .. } | NodeKind::Document => {}
        }
    }
    has_element_child
}

fn write_indent(out: &mut String, options: &SerializeOptions, depth: usize) {
    for _ in 0..depth {
        out.push_str(&options.indent_str);
    }
}

fn write_node(
    doc: &Document,
    id: NodeId,
    out: &mut String,
    options: &SerializeOptions,
    depth: usize,
    on_own_line: bool,
) {
    match &doc.node(id).kind {
        NodeKind::Element { name, attributes } => {
            if on_own_line {
                write_indent(out, options, depth);
            }
            out.push('<');
            out.push_str(name);

            let quote = options.quote.char();
            for attr in attributes {
                out.push(' ');
                out.push_str(&attr.name);
                out.push('=');
                out.push(quote);
                write_escaped_attr(out, &attr.value, quote);
                out.push(quote);
            }

            if doc.first_child(id).is_none() {
                out.push_str("/>");
            } else {
                out.push('>');
                let element_only = options.indent && is_element_only(doc, id);
                if element_only {
                    out.push('\n');
                }
                for child in doc.children(id) {
                    if element_only && is_blank_text(doc, child) {
                        continue;
                    }
                    write_node(doc, child, out, options, depth + 1, element_only);
                }
                if element_only {
                    write_indent(out, options, depth);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
            if on_own_line {
                out.push('\n');
            }
        }
        NodeKind::Text { content } => {
            write_escaped_text(out, content);
        }
        NodeKind::Comment { content } => {
            if on_own_line {
                write_indent(out, options, depth);
            }
            out.push_str("<!--");
            out.push_str(content);
            out.push_str("-->");
            if on_own_line {
                out.push('\n');
            }
        }
        NodeKind::Document => {
            // Never a child node
        }
    }
}

/// Escapes text content: `&`, `<` and `>` become entity references and a
/// carriage return becomes `&#13;` so it survives line-end folding.
fn write_escaped_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(ch),
        }
    }
}

/// Escapes an attribute value for the given quote character.
///
/// - `&`, `<`, `>` and the active quote become entity references
/// - `\t` → `&#9;`, `\n` → `&#10;`, `\r` → `&#13;`
fn write_escaped_attr(out: &mut String, text: &str, quote: char) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quote == '"' => out.push_str("&quot;"),
            '\'' if quote == '\'' => out.push_str("&apos;"),
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(ch),
        }
    }
}
