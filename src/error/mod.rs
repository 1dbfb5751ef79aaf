//! Error types for parsing, tree operations, and path queries.
//!
//! Every failure is terminal for the operation that raised it. Parse errors
//! carry a [`SourceLocation`] (line, column, byte offset) pointing at the
//! offending markup. Missing optional results (no such child, no such
//! attribute) are never errors: navigation returns `Option` or an empty
//! iterator for those.

use std::fmt;

use crate::xpath::PathError;

/// Source location within a markup string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number (in characters, not bytes).
    pub column: u32,
    /// 0-based byte offset from the start of the input.
    pub byte_offset: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The error type returned when markup cannot be turned into a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input does not follow the markup grammar: an unterminated tag,
    /// comment, or attribute value, a bad name, an unknown entity, text
    /// outside the root element, and so on.
    #[error("malformed markup at {location}: {message}")]
    MalformedMarkup {
        /// What was wrong.
        message: String,
        /// Where the problem was detected.
        location: SourceLocation,
    },

    /// A closing tag does not match the innermost open element, a closing
    /// tag appears with nothing open, or input ends with elements open.
    #[error("unbalanced tag at {location}: {}", describe_unbalanced(.open.as_deref(), .close.as_deref()))]
    UnbalancedTag {
        /// The innermost open element, if any.
        open: Option<String>,
        /// The closing tag that was found, or `None` at end of input.
        close: Option<String>,
        /// Where the closing tag (or end of input) was found.
        location: SourceLocation,
    },

    /// An element carries the same attribute name twice.
    #[error("duplicate attribute '{name}' on <{element}> at {location}")]
    DuplicateAttribute {
        /// The element's tag name.
        element: String,
        /// The repeated attribute name.
        name: String,
        /// Where the second occurrence was found.
        location: SourceLocation,
    },
}

impl ParseError {
    /// Returns where in the input the error was detected.
    #[must_use]
    pub fn location(&self) -> SourceLocation {
        match self {
            Self::MalformedMarkup { location, .. }
            | Self::UnbalancedTag { location, .. }
            | Self::DuplicateAttribute { location, .. } => *location,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::MalformedMarkup {
            message: message.into(),
            location,
        }
    }
}

fn describe_unbalanced(open: Option<&str>, close: Option<&str>) -> String {
    match (open, close) {
        (Some(open), Some(close)) => format!("expected </{open}>, found </{close}>"),
        (None, Some(close)) => format!("found </{close}> with no open element"),
        (Some(open), None) => format!("end of input with <{open}> still open"),
        (None, None) => "unbalanced markup".to_string(),
    }
}

/// Errors raised by tree construction and document-order comparison.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The two nodes do not belong to the same tree, so document order is
    /// undefined between them.
    #[error("nodes do not share a root and cannot be ordered")]
    IncomparableNodes,

    /// A composed element was given the same attribute name twice.
    #[error("duplicate attribute '{name}' on <{element}>")]
    DuplicateAttribute {
        /// The element's tag name.
        element: String,
        /// The repeated attribute name.
        name: String,
    },

    /// A constructed element or attribute name is empty or is not a valid
    /// markup name.
    #[error("invalid name: '{name}'")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// Comment content that cannot be printed as a comment: it contains
    /// `--`, ends with `-`, or holds a character markup cannot carry.
    #[error("invalid comment content: '{content}'")]
    InvalidComment {
        /// The rejected content.
        content: String,
    },

    /// An append would break the tree shape (the child is attached
    /// elsewhere, is the parent itself, or is one of its ancestors).
    #[error("invalid append: {message}")]
    InvalidAppend {
        /// Why the append was refused.
        message: String,
    },
}

/// Any error produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A tree operation failed.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// A path expression was rejected.
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Result alias over the crate-wide [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn loc(line: u32, column: u32, byte_offset: usize) -> SourceLocation {
        SourceLocation {
            line,
            column,
            byte_offset,
        }
    }

    #[test]
    fn test_source_location_display() {
        assert_eq!(loc(10, 5, 42).to_string(), "10:5");
    }

    #[test]
    fn test_malformed_display() {
        let err = ParseError::malformed("unterminated comment", loc(1, 15, 14));
        assert_eq!(
            err.to_string(),
            "malformed markup at 1:15: unterminated comment"
        );
    }

    #[test]
    fn test_unbalanced_display_variants() {
        let mismatch = ParseError::UnbalancedTag {
            open: Some("Option".to_string()),
            close: Some("Wrong".to_string()),
            location: loc(1, 30, 29),
        };
        assert_eq!(
            mismatch.to_string(),
            "unbalanced tag at 1:30: expected </Option>, found </Wrong>"
        );

        let stray = ParseError::UnbalancedTag {
            open: None,
            close: Some("a".to_string()),
            location: loc(1, 1, 0),
        };
        assert_eq!(
            stray.to_string(),
            "unbalanced tag at 1:1: found </a> with no open element"
        );

        let unclosed = ParseError::UnbalancedTag {
            open: Some("a".to_string()),
            close: None,
            location: loc(1, 4, 3),
        };
        assert_eq!(
            unclosed.to_string(),
            "unbalanced tag at 1:4: end of input with <a> still open"
        );
    }

    #[test]
    fn test_duplicate_attribute_display() {
        let err = ParseError::DuplicateAttribute {
            element: "Option".to_string(),
            name: "K".to_string(),
            location: loc(1, 16, 15),
        };
        assert_eq!(
            err.to_string(),
            "duplicate attribute 'K' on <Option> at 1:16"
        );
    }

    #[test]
    fn test_location_accessor() {
        let err = ParseError::malformed("x", loc(3, 7, 20));
        assert_eq!(err.location(), loc(3, 7, 20));
    }

    #[test]
    fn test_crate_error_from_parts() {
        let err: Error = TreeError::IncomparableNodes.into();
        assert_eq!(
            err.to_string(),
            "nodes do not share a root and cannot be ordered"
        );
        assert!(matches!(err, Error::Tree(TreeError::IncomparableNodes)));
    }

    #[test]
    fn test_parse_error_is_error_trait() {
        let err = ParseError::malformed("bad", SourceLocation::default());
        let _: &dyn std::error::Error = &err;
    }
}
