//! Path expression tokenizer.
//!
//! The supported language has only four tokens: `/`, `//`, `*` and names.
//! Anything that belongs to the wider path-expression language (abbreviated
//! steps, attributes, predicates, function calls, axes, unions, operators)
//! is recognized here only to be rejected with a precise message and
//! position.

use std::fmt;

use crate::parser::input::{is_name_char, is_name_start_char};

/// The error returned for a path outside the supported subset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The path is empty, incomplete, or uses unsupported syntax.
    #[error("invalid path syntax at position {position}: {message}")]
    InvalidSyntax {
        /// Human-readable error message.
        message: String,
        /// 0-based byte offset in the path where the error was detected.
        position: usize,
    },
}

impl PathError {
    pub(crate) fn syntax(message: impl Into<String>, position: usize) -> Self {
        Self::InvalidSyntax {
            message: message.into(),
            position,
        }
    }

    /// Returns the byte offset where the error was detected.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            Self::InvalidSyntax { position, .. } => *position,
        }
    }
}

/// A token produced by the path lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `/`: child step separator.
    Slash,
    /// `//`: descendant step separator.
    DoubleSlash,
    /// `*`: any element.
    Star,
    /// An element name.
    Name(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slash => f.write_str("/"),
            Self::DoubleSlash => f.write_str("//"),
            Self::Star => f.write_str("*"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// A token and the byte offset it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    /// The token.
    pub token: Token,
    /// 0-based byte offset of the token's first character.
    pub position: usize,
}

/// Path expression tokenizer.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given path string.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the entire path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidSyntax`] at the first character that
    /// cannot start a supported token.
    pub fn tokenize(&mut self) -> Result<Vec<Spanned>, PathError> {
        let mut tokens = Vec::new();
        while let Some(ch) = self.peek() {
            let position = self.pos;
            let token = self.next_token(ch)?;
            tokens.push(Spanned { token, position });
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.input[self.pos..].chars().nth(1)
    }

    fn bump(&mut self, ch: char) {
        self.pos += ch.len_utf8();
    }

    fn error(&self, message: &str) -> PathError {
        PathError::syntax(message, self.pos)
    }

    fn next_token(&mut self, ch: char) -> Result<Token, PathError> {
        match ch {
            '/' => {
                self.bump(ch);
                if self.peek() == Some('/') {
                    self.bump('/');
                    Ok(Token::DoubleSlash)
                } else {
                    Ok(Token::Slash)
                }
            }
            '*' => {
                self.bump(ch);
                Ok(Token::Star)
            }
            '.' if self.peek_second() == Some('.') => {
                Err(self.error("parent step '..' is not supported"))
            }
            '.' => Err(self.error("self step '.' is not supported")),
            '@' => Err(self.error("attribute steps are not supported")),
            '[' | ']' => Err(self.error("predicates are not supported")),
            '(' | ')' => Err(self.error("function calls and grouping are not supported")),
            '|' => Err(self.error("unions are not supported")),
            ':' if self.peek_second() == Some(':') => Err(self.error("axes are not supported")),
            c if c.is_whitespace() => Err(self.error("whitespace is not allowed in a path")),
            c if is_name_start_char(c) => Ok(self.read_name()),
            c => Err(self.error(&format!("unexpected character '{c}'"))),
        }
    }

    /// Reads a name. A `:` belongs to the name unless it starts `::`.
    fn read_name(&mut self) -> Token {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            let continues = if ch == ':' {
                self.peek_second() != Some(':')
            } else {
                is_name_char(ch)
            };
            if !continues {
                break;
            }
            self.bump(ch);
        }
        Token::Name(self.input[start..self.pos].to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(input: &str) -> Vec<Token> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    fn error_at(input: &str) -> usize {
        Lexer::new(input).tokenize().unwrap_err().position()
    }

    #[test]
    fn test_tokenize_steps() {
        assert_eq!(
            tokens("/Portfolio//Option/*"),
            vec![
                Token::Slash,
                Token::Name("Portfolio".to_string()),
                Token::DoubleSlash,
                Token::Name("Option".to_string()),
                Token::Slash,
                Token::Star,
            ]
        );
    }

    #[test]
    fn test_positions_are_byte_offsets() {
        let spanned = Lexer::new("a//bc/*").tokenize().unwrap();
        let positions: Vec<usize> = spanned.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0, 1, 3, 5, 6]);
    }

    #[test]
    fn test_names_with_punctuation() {
        assert_eq!(
            tokens("x-1.y_z"),
            vec![Token::Name("x-1.y_z".to_string())]
        );
        assert_eq!(tokens("ns:tag"), vec![Token::Name("ns:tag".to_string())]);
    }

    #[test]
    fn test_unsupported_syntax_rejected() {
        assert_eq!(error_at("."), 0);
        assert_eq!(error_at("a/.."), 2);
        assert_eq!(error_at("@K"), 0);
        assert_eq!(error_at("Option[1]"), 6);
        assert_eq!(error_at("count(a)"), 5);
        assert_eq!(error_at("child::a"), 5);
        assert_eq!(error_at("a|b"), 1);
        assert_eq!(error_at("a /b"), 1);
        assert_eq!(error_at("a=b"), 1);
        assert_eq!(error_at("1a"), 0);
    }

    #[test]
    fn test_error_display() {
        let err = Lexer::new("@K").tokenize().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid path syntax at position 0: attribute steps are not supported"
        );
    }

    #[test]
    fn test_empty_input_has_no_tokens() {
        assert!(tokens("").is_empty());
    }
}
