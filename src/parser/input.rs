//! Low-level input handling for the text scanner.
//!
//! [`ParserInput`] wraps the raw byte stream with position tracking (line,
//! column, byte offset) and the lexical primitives the scanner is built
//! from: peeking, advancing, name parsing, reference decoding and the
//! delimited constructs (comments, CDATA sections, processing
//! instructions).
//!
//! # Limits
//!
//! Names longer than the configured maximum are rejected so that a single
//! huge tag cannot exhaust memory. Only the five predefined entities and
//! numeric character references are decoded; there is no DTD, so there is
//! nothing to expand recursively and nothing external to load.

use crate::error::{ParseError, SourceLocation};

/// Default maximum element nesting depth.
pub(crate) const DEFAULT_MAX_DEPTH: u32 = 256;

/// Default maximum number of attributes on a single element.
pub(crate) const DEFAULT_MAX_ATTRIBUTES: u32 = 256;

/// Default maximum length (in bytes) of an element or attribute name.
pub(crate) const DEFAULT_MAX_NAME_LENGTH: usize = 50_000;

// -------------------------------------------------------------------------
// Name character classes
// -------------------------------------------------------------------------

/// Returns `true` if `c` may appear in markup at all.
///
/// Allows `#x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] |
/// [#x10000-#x10FFFF]`.
pub(crate) fn is_xml_char(c: char) -> bool {
    matches!(c as u32,
        0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x0001_0000..=0x0010_FFFF
    )
}

/// Returns `true` if `c` may start a tag or attribute name.
pub(crate) fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z' |
        '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}' |
        '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' |
        '\u{200C}'..='\u{200D}' | '\u{2070}'..='\u{218F}' |
        '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}' |
        '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' |
        '\u{10000}'..='\u{EFFFF}'
    )
}

/// Returns `true` if `c` may continue a tag or attribute name.
pub(crate) fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' |
            '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}'
        )
}

/// Returns `true` if `name` is a complete, valid tag or attribute name.
pub(crate) fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

// -------------------------------------------------------------------------
// ParserInput
// -------------------------------------------------------------------------

/// A cursor over the markup text.
#[derive(Debug, Clone)]
pub(crate) struct ParserInput<'a> {
    /// The raw input bytes (always valid UTF-8, borrowed from a `&str`).
    input: &'a [u8],

    /// Current byte offset.
    pos: usize,

    /// Current 1-based line number.
    line: u32,

    /// Current 1-based column number.
    column: u32,

    /// Maximum allowed name length in bytes.
    max_name_length: usize,
}

impl<'a> ParserInput<'a> {
    /// Creates a new `ParserInput` from a UTF-8 string with default limits.
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }

    /// Sets the maximum name length.
    pub fn set_max_name_length(&mut self, max: usize) {
        self.max_name_length = max;
    }

    /// Returns the current source location.
    pub fn location(&self) -> SourceLocation {
        SourceLocation {
            line: self.line,
            column: self.column,
            byte_offset: self.pos,
        }
    }

    /// Returns `true` if all input has been consumed.
    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    // -- Peek operations --

    /// Returns the byte at the current position without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Returns the character at the current position without consuming it.
    pub fn peek_char(&self) -> Option<char> {
        if self.at_end() {
            return None;
        }
        std::str::from_utf8(&self.input[self.pos..])
            .ok()
            .and_then(|s| s.chars().next())
    }

    // -- Advance operations --

    /// Advances the position by `count` ASCII bytes, updating line/column.
    pub fn advance(&mut self, count: usize) {
        for _ in 0..count {
            if self.pos < self.input.len() {
                if self.input[self.pos] == b'\n' {
                    self.line += 1;
                    self.column = 1;
                } else {
                    self.column += 1;
                }
                self.pos += 1;
            }
        }
    }

    /// Advances by one UTF-8 character, updating line/column.
    pub fn advance_char(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += ch.len_utf8();
    }

    /// Consumes and returns the next character, folding `\r\n` and lone
    /// `\r` into `\n`.
    pub fn next_char(&mut self) -> Result<char, ParseError> {
        let ch = self
            .peek_char()
            .ok_or_else(|| self.fatal("unexpected end of input"))?;
        if !is_xml_char(ch) {
            return Err(self.fatal(format!("invalid character: U+{:04X}", ch as u32)));
        }
        self.advance_char(ch);
        if ch == '\r' {
            if self.peek() == Some(b'\n') {
                self.advance(1);
            }
            return Ok('\n');
        }
        Ok(ch)
    }

    /// Consumes the next byte and checks that it is `expected`.
    pub fn expect_byte(&mut self, expected: u8) -> Result<(), ParseError> {
        match self.peek() {
            Some(b) if b == expected => {
                self.advance(1);
                Ok(())
            }
            Some(b) => Err(self.fatal(format!(
                "expected '{}', found '{}'",
                expected as char, b as char
            ))),
            None => Err(self.fatal(format!(
                "expected '{}', found end of input",
                expected as char
            ))),
        }
    }

    /// Consumes bytes and checks that they match the `expected` sequence.
    pub fn expect_str(&mut self, expected: &[u8]) -> Result<(), ParseError> {
        for &b in expected {
            self.expect_byte(b)?;
        }
        Ok(())
    }

    /// Returns `true` if the remaining input starts with `s`.
    pub fn looking_at(&self, s: &[u8]) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    /// Skips whitespace characters. Returns `true` if any were consumed.
    pub fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.peek() {
            self.advance(1);
        }
        self.pos > start
    }

    /// Consumes ASCII bytes while `pred` returns `true` and returns them.
    pub fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> String {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if pred(b) {
                self.advance(1);
            } else {
                break;
            }
        }
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }

    // -- Names --

    /// Parses a tag or attribute name.
    ///
    /// Returns an error if the name is empty, starts with an invalid
    /// character, or exceeds the configured length limit.
    pub fn parse_name(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        let first = self
            .peek_char()
            .ok_or_else(|| self.fatal("expected name, found end of input"))?;
        if !is_name_start_char(first) {
            return Err(self.fatal(format!("invalid name start character: '{first}'")));
        }
        self.advance_char(first);

        while let Some(ch) = self.peek_char() {
            if !is_name_char(ch) {
                break;
            }
            self.advance_char(ch);
        }

        let len = self.pos - start;
        if len > self.max_name_length {
            return Err(self.fatal(format!(
                "name length ({len}) exceeds maximum ({})",
                self.max_name_length
            )));
        }

        let name = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| self.fatal("invalid UTF-8 in name"))?;
        Ok(name.to_string())
    }

    // -- References --

    /// Parses an entity or character reference (`&...;`) and returns the
    /// decoded text.
    ///
    /// Handles the five predefined entities (`amp`, `lt`, `gt`, `apos`,
    /// `quot`) and decimal/hexadecimal character references.
    pub fn parse_reference(&mut self) -> Result<String, ParseError> {
        self.expect_byte(b'&')?;

        if self.peek() == Some(b'#') {
            self.advance(1);
            let value = if self.peek() == Some(b'x') {
                self.advance(1);
                let hex = self.take_while(|b| b.is_ascii_hexdigit());
                if hex.is_empty() {
                    return Err(self.fatal("empty hex character reference"));
                }
                u32::from_str_radix(&hex, 16)
                    .map_err(|_| self.fatal("invalid hex character reference"))?
            } else {
                let dec = self.take_while(|b| b.is_ascii_digit());
                if dec.is_empty() {
                    return Err(self.fatal("empty decimal character reference"));
                }
                dec.parse::<u32>()
                    .map_err(|_| self.fatal("invalid decimal character reference"))?
            };
            self.expect_byte(b';')?;

            return match char::from_u32(value) {
                Some(ch) if is_xml_char(ch) => Ok(ch.to_string()),
                _ => Err(self.fatal(format!(
                    "character reference &#x{value:X}; is not a valid character"
                ))),
            };
        }

        let name = self.parse_name()?;
        self.expect_byte(b';')?;
        let text = match name.as_str() {
            "amp" => "&",
            "lt" => "<",
            "gt" => ">",
            "apos" => "'",
            "quot" => "\"",
            _ => return Err(self.fatal(format!("unknown entity reference: &{name};"))),
        };
        Ok(text.to_string())
    }

    // -- Attribute values --

    /// Parses a quoted attribute value, decoding references and folding
    /// literal tabs and newlines into spaces.
    pub fn parse_attribute_value(&mut self) -> Result<String, ParseError> {
        let quote = match self.peek() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => return Err(self.fatal("attribute value must be quoted")),
        };
        self.advance(1);

        let mut value = String::new();
        loop {
            let Some(b) = self.peek() else {
                return Err(self.fatal("unterminated attribute value"));
            };
            if b == quote {
                self.advance(1);
                break;
            }
            match b {
                b'&' => value.push_str(&self.parse_reference()?),
                b'<' => return Err(self.fatal("'<' not allowed in attribute values")),
                _ => match self.next_char()? {
                    '\n' | '\t' => value.push(' '),
                    ch => value.push(ch),
                },
            }
        }

        Ok(value)
    }

    /// Creates a `MalformedMarkup` error at the current location.
    pub fn fatal(&self, message: impl Into<String>) -> ParseError {
        ParseError::malformed(message, self.location())
    }
}

// -------------------------------------------------------------------------
// Delimited constructs
// -------------------------------------------------------------------------

/// Parses a comment (`<!-- ... -->`), returning the content text.
///
/// The opening `<!--` must not have been consumed yet.
pub(crate) fn parse_comment_content(input: &mut ParserInput<'_>) -> Result<String, ParseError> {
    input.expect_str(b"<!--")?;
    let mut content = String::new();

    loop {
        if input.at_end() {
            return Err(input.fatal("unterminated comment"));
        }
        if input.looking_at(b"-->") {
            input.advance(3);
            break;
        }
        if input.looking_at(b"--") {
            return Err(input.fatal("'--' not allowed inside comments"));
        }
        content.push(input.next_char()?);
    }

    Ok(content)
}

/// Parses a CDATA section (`<![CDATA[ ... ]]>`), returning the literal
/// content text.
///
/// The opening `<![CDATA[` must not have been consumed yet.
pub(crate) fn parse_cdata_content(input: &mut ParserInput<'_>) -> Result<String, ParseError> {
    input.expect_str(b"<![CDATA[")?;
    let mut content = String::new();

    loop {
        if input.at_end() {
            return Err(input.fatal("unterminated CDATA section"));
        }
        if input.looking_at(b"]]>") {
            input.advance(3);
            break;
        }
        content.push(input.next_char()?);
    }

    Ok(content)
}

/// Skips a processing instruction or XML declaration (`<?target ...?>`)
/// and returns its target name.
///
/// The opening `<?` must not have been consumed yet.
pub(crate) fn skip_processing_instruction(
    input: &mut ParserInput<'_>,
) -> Result<String, ParseError> {
    input.expect_str(b"<?")?;
    let target = input.parse_name()?;

    loop {
        if input.at_end() {
            return Err(input.fatal("unterminated processing instruction"));
        }
        if input.looking_at(b"?>") {
            input.advance(2);
            break;
        }
        input.next_char()?;
    }

    Ok(target)
}
