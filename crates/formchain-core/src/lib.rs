//! Form documents and their ledger wire encoding.
//!
//! This crate holds the data model (accounts, elements, forms) and the pure
//! codec between a [`Form`] and its two wire strings. Fetching and submitting
//! ledger records is left to `formchain-ledger`.

pub mod account;
pub mod codec;
pub mod element;
pub mod error;
pub mod form;
pub mod network;

pub use account::{Address, AddressAllocator, PublicAccount, RandomAddressAllocator};
pub use codec::{
    check_encodable, decode, encode, encode_with, is_form_header, DecodeContext, Delimiter,
    WireForm, SUPPORTED_DELIMITERS,
};
pub use element::{
    ChoiceField, ElementType, FormElement, InputField, OptionSelector, ELEMENT_TYPES,
};
pub use error::FormError;
pub use form::{ElementSelector, Form, OptionsMut};
pub use network::NetworkType;

/// Literal that opens every form header.
pub const FORM_TAG: &str = "form";

/// Length of a plain address.
pub const ADDRESS_LEN: usize = 40;
