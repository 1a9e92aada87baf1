use std::fmt;

use formchain_core::FormError;
use thiserror::Error;

/// Failure reported by a [`RecordSource`](crate::RecordSource) implementation.
///
/// Carried through the pipeline untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    pub message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SourceError {}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Address {address} has no form definition")]
    NoDefinition { address: String },

    #[error("Address {address} has multiple form definitions ({count})")]
    AmbiguousDefinition { address: String, count: usize },

    #[error("Invalid form definition: {0}")]
    InvalidDefinition(String),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
