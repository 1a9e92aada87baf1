use thiserror::Error;

use crate::network::NetworkType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Network mismatch: {subject} is on {got:?}, form is on {expected:?}")]
    NetworkMismatch {
        subject: String,
        expected: NetworkType,
        got: NetworkType,
    },

    #[error("Duplicate label \"{label}\" in {context}")]
    DuplicateLabel {
        label: String,
        context: &'static str,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No {0} were provided")]
    EmptyInput(&'static str),

    #[error("Malformed form header: {0}")]
    MalformedHeader(String),

    #[error("Malformed form body: {0}")]
    MalformedBody(String),

    #[error("{element} element has {got} arguments. Expected {expected}")]
    ArityMismatch {
        element: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Unknown form element type index: {0}")]
    UnknownElementType(String),

    #[error("Invalid address \"{0}\"")]
    InvalidAddress(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Unsupported delimiter {0:?}")]
    InvalidDelimiter(char),

    #[error("Field {field} cannot be encoded: {value:?}")]
    UnencodableField { field: &'static str, value: String },

    #[error("Address allocation failed: {0}")]
    AddressAllocation(String),
}

pub type Result<T> = std::result::Result<T, FormError>;
