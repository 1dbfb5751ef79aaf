//! Path expression parser.
//!
//! ```text
//! Path ::= ('/' | '//')? Step (('/' | '//') Step)*
//! Step ::= Name | '*'
//! ```
//!
//! The parser consumes the spanned tokens produced by the
//! [`Lexer`](super::lexer::Lexer) and produces a [`LocationPath`]. Error
//! positions are byte offsets into the original path string.

use super::ast::{Axis, LocationPath, NodeTest, Step};
use super::lexer::{Lexer, PathError, Spanned, Token};

/// Parses a path string into a [`LocationPath`].
///
/// # Errors
///
/// Returns [`PathError::InvalidSyntax`] for an empty path, a bare `/`, a
/// trailing separator, two steps without a separator, or any unsupported
/// syntax.
///
/// # Examples
///
/// ```
/// use xmlnav::xpath::parser::parse;
///
/// let path = parse("/Portfolio//Option").unwrap();
/// assert!(path.absolute);
/// assert_eq!(path.steps.len(), 2);
/// assert!(parse("Portfolio/").is_err());
/// ```
pub fn parse(input: &str) -> Result<LocationPath, PathError> {
    let tokens = Lexer::new(input).tokenize()?;
    if tokens.is_empty() {
        return Err(PathError::syntax("empty path", 0));
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        end: input.len(),
    };
    parser.parse_location_path()
}

/// Internal parser over a spanned token stream.
struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    /// Byte length of the input, reported for errors at end of path.
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    /// Consumes a separator if one is next, returning the axis it selects.
    fn eat_separator(&mut self) -> Option<Axis> {
        let axis = match self.peek()? {
            Token::Slash => Axis::Child,
            Token::DoubleSlash => Axis::Descendant,
            _ => return None,
        };
        self.pos += 1;
        Some(axis)
    }

    /// Byte offset of the current token, or the end of the input.
    fn position(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |s| s.position)
    }

    fn error(&self, message: &str) -> PathError {
        PathError::syntax(message, self.position())
    }

    fn parse_location_path(&mut self) -> Result<LocationPath, PathError> {
        let leading = self.eat_separator();
        let absolute = leading.is_some();
        let mut axis = leading.unwrap_or(Axis::Child);
        let mut steps = Vec::new();

        loop {
            let test = self.parse_node_test()?;
            steps.push(Step { axis, test });

            match self.eat_separator() {
                Some(next) => axis = next,
                None if self.pos < self.tokens.len() => {
                    let found = self.tokens[self.pos].token.clone();
                    return Err(self.error(&format!("expected '/' or '//' before '{found}'")));
                }
                None => break,
            }
        }

        Ok(LocationPath { absolute, steps })
    }

    fn parse_node_test(&mut self) -> Result<NodeTest, PathError> {
        let test = match self.peek() {
            Some(Token::Name(name)) => NodeTest::Name(name.clone()),
            Some(Token::Star) => NodeTest::Any,
            Some(other) => {
                let found = other.clone();
                return Err(self.error(&format!("expected a name or '*', found '{found}'")));
            }
            None => return Err(self.error("expected a name or '*' after separator")),
        };
        self.pos += 1;
        Ok(test)
    }
}
