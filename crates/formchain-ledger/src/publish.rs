//! Form → unsigned ledger aggregate.

use formchain_core::{check_encodable, encode_with, Delimiter, Form, FormError};

use crate::types::{AggregateTransaction, Deadline, PlainMessage, TransferTransaction};

/// Configuration for [`publish`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PublishOptions {
    /// Default: two hours after the call.
    pub deadline: Option<Deadline>,
    /// Default: `~`.
    pub delimiter: Option<Delimiter>,
}

/// Build the complete aggregate that stores `form` on the ledger.
///
/// The first inner transfer carries the header, the second the body. Both
/// target the form address, carry no mosaics and are authorized by the
/// creator. Signing and announcing are up to the caller.
///
/// # Errors
/// Returns `FormError` if the form cannot be encoded losslessly.
pub fn publish(form: &Form, options: &PublishOptions) -> Result<AggregateTransaction, FormError> {
    check_encodable(form)?;

    let deadline = options.deadline.unwrap_or_default();
    let wire = encode_with(form, options.delimiter.unwrap_or_default());

    let inner = [wire.header, wire.body]
        .into_iter()
        .map(|payload| {
            TransferTransaction::message_only(
                form.network(),
                deadline,
                form.address().clone(),
                PlainMessage::new(payload),
            )
            .into_embedded(form.creator().clone())
        })
        .collect();

    tracing::debug!(
        address = %form.address().pretty(),
        elements = form.elements().len(),
        "built form definition aggregate"
    );
    Ok(AggregateTransaction::create_complete(
        deadline,
        inner,
        form.network(),
    ))
}
