//! Text scanner: markup string to token stream.
//!
//! The [`Scanner`] is a lazy, finite iterator over [`Scanned`] tokens. A
//! start tag is scanned as a whole and then emitted as a `TagOpen` (or
//! `SelfClosingTag`) token followed by one `AttributeName`/`AttributeValue`
//! pair per attribute, so a consumer sees every attribute before any
//! content of the element.
//!
//! The scanner checks lexical well-formedness only (terminated tags,
//! quoted values, valid names, known references). Nesting and document
//! shape are the tree builder's business.
//!
//! # Examples
//!
//! ```
//! use xmlnav::parser::{Scanner, Token};
//!
//! let tokens: Vec<Token> = Scanner::new("<Option K='100'/>")
//!     .map(|s| s.map(|s| s.token))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(
//!     tokens,
//!     vec![
//!         Token::SelfClosingTag("Option".to_string()),
//!         Token::AttributeName("K".to_string()),
//!         Token::AttributeValue("100".to_string()),
//!     ]
//! );
//! ```

use std::collections::VecDeque;
use std::fmt;

use tracing::trace;

use super::input::{
    parse_cdata_content, parse_comment_content, skip_processing_instruction, ParserInput,
};
use super::ParseOptions;
use crate::error::{ParseError, SourceLocation};

/// A lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A start tag, `<name ...>`.
    TagOpen(String),
    /// An empty-element tag, `<name .../>`.
    SelfClosingTag(String),
    /// An end tag, `</name>`.
    TagClose(String),
    /// The name half of an attribute.
    AttributeName(String),
    /// The value half of an attribute, references decoded.
    AttributeValue(String),
    /// A comment's text, without delimiters.
    Comment(String),
    /// Character data, references decoded. CDATA sections arrive here too.
    TextRun(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TagOpen(name) => write!(f, "<{name}>"),
            Self::SelfClosingTag(name) => write!(f, "<{name}/>"),
            Self::TagClose(name) => write!(f, "</{name}>"),
            Self::AttributeName(name) => write!(f, "attribute {name}"),
            Self::AttributeValue(value) => write!(f, "value {value:?}"),
            Self::Comment(text) => write!(f, "<!--{text}-->"),
            Self::TextRun(text) => write!(f, "text {text:?}"),
        }
    }
}

/// A token together with where it started in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanned {
    /// The token.
    pub token: Token,
    /// The location of the token's first character.
    pub location: SourceLocation,
}

/// A restartable tokenizer over a markup string.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    input: ParserInput<'a>,
    trim_whitespace: bool,
    max_name_length: usize,
    /// Tokens already scanned but not yet handed out (attribute pairs that
    /// follow a start tag).
    pending: VecDeque<Scanned>,
    /// Set once an error has been yielded; the iterator is then exhausted.
    failed: bool,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner with default options.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, &ParseOptions::default())
    }

    /// Creates a scanner honoring `trim_whitespace` and `max_name_length`
    /// from `options`.
    #[must_use]
    pub fn with_options(source: &'a str, options: &ParseOptions) -> Self {
        let mut input = ParserInput::new(source);
        input.set_max_name_length(options.max_name_length);
        Self {
            source,
            input,
            trim_whitespace: options.trim_whitespace,
            max_name_length: options.max_name_length,
            pending: VecDeque::new(),
            failed: false,
        }
    }

    /// Rewinds the scanner to the start of its input.
    pub fn restart(&mut self) {
        self.input = ParserInput::new(self.source);
        self.input.set_max_name_length(self.max_name_length);
        self.pending.clear();
        self.failed = false;
    }

    fn emit(&mut self, token: Token, location: SourceLocation) {
        self.pending.push_back(Scanned { token, location });
    }

    /// Scans the next construct into the pending queue. Constructs that
    /// produce no token (processing instructions, dropped whitespace)
    /// leave the queue empty.
    fn scan_construct(&mut self) -> Result<(), ParseError> {
        let location = self.input.location();
        if self.input.looking_at(b"<!--") {
            let text = parse_comment_content(&mut self.input)?;
            self.emit(Token::Comment(text), location);
        } else if self.input.looking_at(b"<![CDATA[") {
            let text = parse_cdata_content(&mut self.input)?;
            if !text.is_empty() {
                self.emit(Token::TextRun(text), location);
            }
        } else if self.input.looking_at(b"<!DOCTYPE") {
            return Err(self.input.fatal("document type declarations are not supported"));
        } else if self.input.looking_at(b"<!") {
            return Err(self.input.fatal("unexpected markup declaration"));
        } else if self.input.looking_at(b"<?") {
            let target = skip_processing_instruction(&mut self.input)?;
            trace!(pi = %target, %location, "skipped processing instruction");
        } else if self.input.looking_at(b"</") {
            self.scan_end_tag(location)?;
        } else if self.input.peek() == Some(b'<') {
            self.scan_start_tag(location)?;
        } else {
            self.scan_text(location)?;
        }
        Ok(())
    }

    fn scan_end_tag(&mut self, location: SourceLocation) -> Result<(), ParseError> {
        self.input.expect_str(b"</")?;
        let name = self.input.parse_name()?;
        self.input.skip_whitespace();
        if self.input.at_end() {
            return Err(self.input.fatal(format!("unterminated end tag </{name}")));
        }
        self.input.expect_byte(b'>')?;
        self.emit(Token::TagClose(name), location);
        Ok(())
    }

    fn scan_start_tag(&mut self, location: SourceLocation) -> Result<(), ParseError> {
        self.input.expect_byte(b'<')?;
        let name = self.input.parse_name()?;
        let mut attributes = Vec::new();

        let self_closing = loop {
            let had_whitespace = self.input.skip_whitespace();
            match self.input.peek() {
                None => {
                    return Err(self.input.fatal(format!("unterminated start tag <{name}")));
                }
                Some(b'>') => {
                    self.input.advance(1);
                    break false;
                }
                Some(b'/') => {
                    self.input.advance(1);
                    self.input.expect_byte(b'>')?;
                    break true;
                }
                Some(_) if !had_whitespace => {
                    return Err(self.input.fatal("whitespace required before attribute"));
                }
                Some(_) => {
                    let name_location = self.input.location();
                    let attr_name = self.input.parse_name()?;
                    self.input.skip_whitespace();
                    if self.input.peek() != Some(b'=') {
                        return Err(self
                            .input
                            .fatal(format!("expected '=' after attribute name '{attr_name}'")));
                    }
                    self.input.advance(1);
                    self.input.skip_whitespace();
                    let value_location = self.input.location();
                    let value = self.input.parse_attribute_value()?;
                    attributes.push((attr_name, name_location, value, value_location));
                }
            }
        };

        let head = if self_closing {
            Token::SelfClosingTag(name)
        } else {
            Token::TagOpen(name)
        };
        self.emit(head, location);
        for (attr_name, name_location, value, value_location) in attributes {
            self.emit(Token::AttributeName(attr_name), name_location);
            self.emit(Token::AttributeValue(value), value_location);
        }
        Ok(())
    }

    fn scan_text(&mut self, location: SourceLocation) -> Result<(), ParseError> {
        let mut text = String::new();
        while let Some(b) = self.input.peek() {
            match b {
                b'<' => break,
                b'&' => text.push_str(&self.input.parse_reference()?),
                _ => text.push(self.input.next_char()?),
            }
        }
        if self.trim_whitespace && text.chars().all(char::is_whitespace) {
            return Ok(());
        }
        self.emit(Token::TextRun(text), location);
        Ok(())
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Scanned, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(scanned) = self.pending.pop_front() {
                trace!(token = %scanned.token, location = %scanned.location, "scanned token");
                return Some(Ok(scanned));
            }
            if self.failed || self.input.at_end() {
                return None;
            }
            if let Err(err) = self.scan_construct() {
                self.failed = true;
                self.pending.clear();
                return Some(Err(err));
            }
        }
    }
}
