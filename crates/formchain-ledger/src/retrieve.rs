//! Ledger records → Form.

use std::sync::Arc;

use formchain_core::{decode, is_form_header, Address, DecodeContext, Form, FormError, NetworkType};

use crate::error::{Result, ServiceError};
use crate::source::RecordSource;
use crate::types::{AggregateKind, AggregateTransaction, Transaction};

/// Configuration for [`FormService`].
#[derive(Clone)]
pub struct FormServiceOptions {
    /// Ledger read access.
    pub source: Arc<dyn RecordSource>,
    /// Network every looked-up address must belong to.
    pub network: NetworkType,
}

/// Looks up form definitions through a [`RecordSource`].
pub struct FormService {
    source: Arc<dyn RecordSource>,
    network: NetworkType,
}

impl FormService {
    pub fn new(options: FormServiceOptions) -> Self {
        Self {
            source: options.source,
            network: options.network,
        }
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    /// Fetch and decode the form stored at `address`.
    ///
    /// The definition must sit in the block where the address first
    /// appeared. Exactly one qualifying aggregate may be found there.
    pub async fn retrieve_form(&self, address: &Address) -> Result<Form> {
        if address.network() != self.network {
            return Err(FormError::NetworkMismatch {
                subject: format!("address {}", address.pretty()),
                expected: self.network,
                got: address.network(),
            }
            .into());
        }

        let info = self.source.account_info(address).await?;
        tracing::debug!(
            address = %address.pretty(),
            height = info.address_height,
            "fetching form definition block"
        );
        let records = self.source.block_transactions(info.address_height).await?;

        let definition = select_definition(&records, address)?;
        form_from_definition(definition)
    }
}

/// Whether `aggregate` has the shape of a definition for `address`.
///
/// It must be a signed complete aggregate of at least two transfers, all
/// sent to `address`, the first of which carries a form header.
pub fn is_definition(aggregate: &AggregateTransaction, address: &Address) -> bool {
    if aggregate.kind != AggregateKind::Complete
        || aggregate.signer.is_none()
        || aggregate.inner.len() < 2
    {
        return false;
    }
    let all_to_address = aggregate.inner.iter().all(|inner| {
        inner
            .as_transfer()
            .is_some_and(|transfer| transfer.recipient == *address)
    });
    all_to_address
        && aggregate.inner[0]
            .as_transfer()
            .is_some_and(|transfer| is_form_header(&transfer.message.payload))
}

/// Pick the single definition for `address` out of a block's records.
pub fn select_definition<'a>(
    records: &'a [Transaction],
    address: &Address,
) -> Result<&'a AggregateTransaction> {
    let candidates: Vec<&AggregateTransaction> = records
        .iter()
        .filter_map(Transaction::as_aggregate)
        .filter(|aggregate| is_definition(aggregate, address))
        .collect();
    tracing::debug!(
        records = records.len(),
        candidates = candidates.len(),
        "filtered definition candidates"
    );

    match candidates.as_slice() {
        [definition] => Ok(*definition),
        [] => Err(ServiceError::NoDefinition {
            address: address.pretty(),
        }),
        many => {
            tracing::warn!(
                address = %address.pretty(),
                count = many.len(),
                "ambiguous form definition"
            );
            Err(ServiceError::AmbiguousDefinition {
                address: address.pretty(),
                count: many.len(),
            })
        }
    }
}

/// Decode a definition aggregate.
///
/// The aggregate signer becomes the creator and the header recipient the
/// form address. The body is the concatenation of every payload after the
/// header.
pub fn form_from_definition(aggregate: &AggregateTransaction) -> Result<Form> {
    let creator = aggregate
        .signer
        .clone()
        .ok_or_else(|| ServiceError::InvalidDefinition("aggregate is not signed".into()))?;

    let mut transfers = aggregate.inner.iter().map(|inner| inner.as_transfer());
    let header = match transfers.next() {
        Some(Some(transfer)) => transfer,
        Some(None) => {
            return Err(ServiceError::InvalidDefinition(
                "first inner transaction is not a transfer".into(),
            ))
        }
        None => {
            return Err(ServiceError::InvalidDefinition(
                "aggregate has no inner transactions".into(),
            ))
        }
    };
    let body = transfers
        .map(|transfer| transfer.map(|t| t.message.payload.as_str()))
        .collect::<Option<String>>()
        .ok_or_else(|| {
            ServiceError::InvalidDefinition("body part is not a transfer".into())
        })?;

    let context = DecodeContext {
        creator,
        address: header.recipient.clone(),
        network: aggregate.network,
    };
    Ok(decode(&header.message.payload, &body, &context)?)
}
