//! Ledger side of formchain.
//!
//! [`publish`] turns a [`Form`](formchain_core::Form) into an unsigned
//! complete aggregate of two message transfers. [`FormService`] walks the
//! other direction: it asks a [`RecordSource`] for the block in which a
//! form address first appeared, picks the single definition aggregate out
//! of it and decodes the form.
//!
//! Signing, announcing and the network client itself stay with the caller.

pub mod error;
pub mod publish;
pub mod retrieve;
pub mod source;
pub mod types;

pub use error::{Result, ServiceError, SourceError};
pub use publish::{publish, PublishOptions};
pub use retrieve::{
    form_from_definition, is_definition, select_definition, FormService, FormServiceOptions,
};
pub use source::RecordSource;
pub use types::{
    AccountInfo, AggregateKind, AggregateTransaction, Deadline, InnerBody, InnerTransaction,
    Mosaic, PlainMessage, Transaction, TransferTransaction, DEFAULT_DEADLINE_HOURS,
};
