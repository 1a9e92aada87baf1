//! Header/body wire codec.
//!
//! A form travels as two strings. The header carries the tag, name,
//! description and editor list; the body carries the elements:
//!
//! ```text
//! header: form~Survey~Q1~{SBFBW6TUGLEWQIBCMTBMXXQORZKUP3WTVVTOKK5M}
//! body:   {{0~q1~Your name}~{2~q2~Pick one~{red~blue}}}
//! ```
//!
//! The delimiter is whatever character follows the `form` tag.

mod decode;
mod encode;
mod grammar;

use crate::error::{FormError, Result};

pub use decode::{decode, DecodeContext};
pub use encode::{check_encodable, encode, encode_with};
pub use grammar::is_form_header;

/// Delimiters a published header may declare.
pub const SUPPORTED_DELIMITERS: [char; 3] = ['~', ',', '-'];

/// Field separator declared by a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Delimiter(char);

impl Delimiter {
    pub fn new(c: char) -> Result<Self> {
        if SUPPORTED_DELIMITERS.contains(&c) {
            Ok(Self(c))
        } else {
            Err(FormError::InvalidDelimiter(c))
        }
    }

    pub fn as_char(self) -> char {
        self.0
    }

    // All supported delimiters are ASCII.
    pub(crate) fn as_byte(self) -> u8 {
        self.0 as u8
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self('~')
    }
}

/// Encoded form, one string per transport slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireForm {
    pub header: String,
    pub body: String,
}
