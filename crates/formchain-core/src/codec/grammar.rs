//! Tokenizer for the header and body grammars.
//!
//! ```text
//! header  := "form" D FIELD D FIELD D "{" ADDR (D ADDR)* "}"
//! body    := "{" ELEM (D ELEM)* "}"
//! ELEM    := "{" DIGITS D FIELD D FIELD (D "{" FIELD (D FIELD)* "}")? "}"
//! FIELD   := [A-Za-z0-9 ]+
//! ADDR    := [A-Z0-9]{40}
//! ```
//!
//! Lists nest at most one level, so a single-byte lookahead is enough.

use std::sync::OnceLock;

use regex::Regex;

use super::{Delimiter, SUPPORTED_DELIMITERS};
use crate::error::{FormError, Result};
use crate::{ADDRESS_LEN, FORM_TAG};

/// Parse failures carry a description; callers pick header or body.
type Parse<T> = std::result::Result<T, String>;

const FIELD_PATTERN: &str = "[A-Za-z0-9 ]+";
const ADDRESS_PATTERN: &str = "[A-Z0-9]{40}";

pub(crate) fn is_field_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b' '
}

pub(crate) fn is_field_text(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_field_byte)
}

/// Header fields in wire order. `tag` is always [`FORM_TAG`].
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RawHeader<'a> {
    pub delimiter: Delimiter,
    pub tag: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub editors: Vec<&'a str>,
}

/// One element block before type resolution.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RawElement<'a> {
    pub type_index: &'a str,
    pub label: &'a str,
    pub description: &'a str,
    pub options: Option<Vec<&'a str>>,
}

impl RawElement<'_> {
    /// Fields after the type index.
    pub fn arity(&self) -> usize {
        if self.options.is_some() {
            3
        } else {
            2
        }
    }
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    delimiter: u8,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str, delimiter: Delimiter) -> Self {
        Self {
            text,
            pos: 0,
            delimiter: delimiter.as_byte(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_delimiter(&mut self) -> bool {
        self.eat(self.delimiter)
    }

    fn expect(&mut self, b: u8) -> Parse<()> {
        if self.eat(b) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", b as char)))
        }
    }

    fn expect_delimiter(&mut self) -> Parse<()> {
        self.expect(self.delimiter)
    }

    fn expect_end(&self) -> Parse<()> {
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(self.unexpected("end of input")),
        }
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        // Predicates only accept ASCII, so both ends are char boundaries.
        &self.text[start..self.pos]
    }

    fn field(&mut self, what: &str) -> Parse<&'a str> {
        let s = self.take_while(is_field_byte);
        if s.is_empty() {
            Err(self.unexpected(what))
        } else {
            Ok(s)
        }
    }

    fn digits(&mut self) -> Parse<&'a str> {
        let s = self.take_while(|b| b.is_ascii_digit());
        if s.is_empty() {
            Err(self.unexpected("element type index"))
        } else {
            Ok(s)
        }
    }

    fn address(&mut self) -> Parse<&'a str> {
        let start = self.pos;
        let s = self.take_while(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
        if s.len() != ADDRESS_LEN {
            return Err(format!(
                "expected a {}-character address at offset {}, found {} characters",
                ADDRESS_LEN,
                start,
                s.len()
            ));
        }
        Ok(s)
    }

    fn unexpected(&self, expected: &str) -> String {
        match self.text[self.pos..].chars().next() {
            Some(c) => format!("expected {} at offset {}, found {:?}", expected, self.pos, c),
            None => format!("expected {} at offset {}, found end of input", expected, self.pos),
        }
    }
}

/// Recover the delimiter and header fields.
pub(crate) fn parse_header(header: &str) -> Result<RawHeader<'_>> {
    let rest = header
        .strip_prefix(FORM_TAG)
        .ok_or_else(|| FormError::MalformedHeader(format!("missing \"{}\" tag", FORM_TAG)))?;
    let c = rest
        .chars()
        .next()
        .ok_or_else(|| FormError::MalformedHeader("missing delimiter".to_string()))?;
    let delimiter = Delimiter::new(c)
        .map_err(|_| FormError::MalformedHeader(format!("unsupported delimiter {:?}", c)))?;

    let mut cursor = Cursor::new(header, delimiter);
    cursor.pos = FORM_TAG.len();
    let (name, description, editors) =
        header_fields(&mut cursor).map_err(FormError::MalformedHeader)?;

    Ok(RawHeader {
        delimiter,
        tag: &header[..FORM_TAG.len()],
        name,
        description,
        editors,
    })
}

fn header_fields<'a>(cursor: &mut Cursor<'a>) -> Parse<(&'a str, &'a str, Vec<&'a str>)> {
    cursor.expect_delimiter()?;
    let name = cursor.field("form name")?;
    cursor.expect_delimiter()?;
    let description = cursor.field("form description")?;
    cursor.expect_delimiter()?;
    cursor.expect(b'{')?;
    let mut editors = vec![cursor.address()?];
    while cursor.eat_delimiter() {
        editors.push(cursor.address()?);
    }
    cursor.expect(b'}')?;
    cursor.expect_end()?;
    Ok((name, description, editors))
}

/// Split the body into element blocks.
pub(crate) fn parse_body(body: &str, delimiter: Delimiter) -> Result<Vec<RawElement<'_>>> {
    let mut cursor = Cursor::new(body, delimiter);
    body_elements(&mut cursor).map_err(FormError::MalformedBody)
}

fn body_elements<'a>(cursor: &mut Cursor<'a>) -> Parse<Vec<RawElement<'a>>> {
    cursor.expect(b'{')?;
    let mut elements = vec![parse_element(cursor)?];
    while cursor.eat_delimiter() {
        elements.push(parse_element(cursor)?);
    }
    cursor.expect(b'}')?;
    cursor.expect_end()?;
    Ok(elements)
}

fn parse_element<'a>(cursor: &mut Cursor<'a>) -> Parse<RawElement<'a>> {
    cursor.expect(b'{')?;
    let type_index = cursor.digits()?;
    cursor.expect_delimiter()?;
    let label = cursor.field("element label")?;
    cursor.expect_delimiter()?;
    let description = cursor.field("element description")?;

    let options = if cursor.eat_delimiter() {
        cursor.expect(b'{')?;
        let mut options = vec![cursor.field("option")?];
        while cursor.eat_delimiter() {
            options.push(cursor.field("option")?);
        }
        cursor.expect(b'}')?;
        Some(options)
    } else {
        None
    };

    cursor.expect(b'}')?;
    Ok(RawElement {
        type_index,
        label,
        description,
        options,
    })
}

/// Whether `text` is a well-formed header, checked with a fixed pattern.
///
/// Used to pick definition candidates out of arbitrary ledger messages
/// before any decoding is attempted.
pub fn is_form_header(text: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            let alternatives: Vec<String> = SUPPORTED_DELIMITERS
                .iter()
                .map(|d| {
                    let d = regex::escape(&d.to_string());
                    format!(
                        "{tag}{d}{f}{d}{f}{d}\\{{{a}(?:{d}{a})*\\}}",
                        tag = FORM_TAG,
                        d = d,
                        f = FIELD_PATTERN,
                        a = ADDRESS_PATTERN,
                    )
                })
                .collect();
            Regex::new(&format!("^(?:{})$", alternatives.join("|")))
                .expect("header pattern is built from constants")
        })
        .is_match(text)
}
