//! Markup parser.
//!
//! Parsing is two explicit stages: the [`Scanner`] turns text into a lazy
//! token stream, and the [`TreeBuilder`] folds that stream into a
//! [`Document`] with a stack of open elements. Either stage can be used on
//! its own; [`parse_str`] wires them together.

pub(crate) mod input;
mod builder;
mod scanner;

pub use builder::TreeBuilder;
pub use scanner::{Scanned, Scanner, Token};

use tracing::debug;

use crate::error::{ParseError, SourceLocation};
use crate::tree::Document;

use input::{DEFAULT_MAX_ATTRIBUTES, DEFAULT_MAX_DEPTH, DEFAULT_MAX_NAME_LENGTH};

/// Parse options controlling whitespace handling and resource limits.
///
/// Use the builder pattern to configure options:
///
/// ```
/// use xmlnav::parser::ParseOptions;
///
/// let opts = ParseOptions::default()
///     .trim_whitespace(true)
///     .max_depth(128);
/// assert!(opts.trim_whitespace);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// If true, whitespace-only text runs are dropped instead of becoming
    /// text nodes (default: false).
    pub trim_whitespace: bool,

    // -- Limits --
    /// Maximum element nesting depth (default: 256).
    pub max_depth: u32,
    /// Maximum number of attributes on a single element (default: 256).
    pub max_attributes: u32,
    /// Maximum length in bytes of an element or attribute name (default: 50,000).
    pub max_name_length: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            trim_whitespace: false,
            max_depth: DEFAULT_MAX_DEPTH,
            max_attributes: DEFAULT_MAX_ATTRIBUTES,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }
}

impl ParseOptions {
    /// Enables or disables dropping of whitespace-only text runs.
    #[must_use]
    pub fn trim_whitespace(mut self, yes: bool) -> Self {
        self.trim_whitespace = yes;
        self
    }

    /// Sets the maximum element nesting depth.
    #[must_use]
    pub fn max_depth(mut self, max: u32) -> Self {
        self.max_depth = max;
        self
    }

    /// Sets the maximum number of attributes per element.
    #[must_use]
    pub fn max_attributes(mut self, max: u32) -> Self {
        self.max_attributes = max;
        self
    }

    /// Sets the maximum element/attribute name length in bytes.
    #[must_use]
    pub fn max_name_length(mut self, max: usize) -> Self {
        self.max_name_length = max;
        self
    }
}

/// Parses a markup string into a `Document` using default options.
///
/// # Errors
///
/// Returns `ParseError` if the input is malformed, has unbalanced tags, or
/// repeats an attribute on one element.
///
/// # Examples
///
/// ```
/// use xmlnav::parser::parse_str;
///
/// let doc = parse_str("<Portfolio><Option K='100'/></Portfolio>").unwrap();
/// let root = doc.root_element().unwrap();
/// assert_eq!(doc.node_name(root), Some("Portfolio"));
/// ```
pub fn parse_str(input: &str) -> Result<Document, ParseError> {
    parse_str_with_options(input, &ParseOptions::default())
}

/// Parses a markup string into a `Document` with the given options.
///
/// # Errors
///
/// Returns `ParseError` if the input is malformed, has unbalanced tags,
/// repeats an attribute, or exceeds a configured limit.
pub fn parse_str_with_options(input: &str, options: &ParseOptions) -> Result<Document, ParseError> {
    debug!(bytes = input.len(), trim = options.trim_whitespace, "parsing document");
    let mut builder = TreeBuilder::new(options);
    for scanned in Scanner::with_options(input, options) {
        builder.feed(scanned?)?;
    }
    builder.finish(end_location(input))
}

/// The location just past the last character of `input`.
fn end_location(input: &str) -> SourceLocation {
    let line_count = input.matches('\n').count();
    let last_line = input.rsplit('\n').next().unwrap_or_default();
    SourceLocation {
        line: u32::try_from(line_count + 1).unwrap_or(u32::MAX),
        column: u32::try_from(last_line.chars().count() + 1).unwrap_or(u32::MAX),
        byte_offset: input.len(),
    }
}
