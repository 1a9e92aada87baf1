//! Ledger record shapes used as text-carrying envelopes.

use chrono::{DateTime, Duration, Utc};
use formchain_core::{Address, NetworkType, PublicAccount};
use serde::{Deserialize, Serialize};

/// Hours a default deadline lies in the future.
pub const DEFAULT_DEADLINE_HOURS: i64 = 2;

/// Latest time at which the ledger may include a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Deadline(DateTime<Utc>);

impl Deadline {
    /// Two hours from now.
    pub fn create() -> Self {
        Self::after(Duration::hours(DEFAULT_DEADLINE_HOURS))
    }

    pub fn after(duration: Duration) -> Self {
        Self(Utc::now() + duration)
    }

    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self(timestamp)
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.0
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::create()
    }
}

/// Unencrypted message payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainMessage {
    pub payload: String,
}

impl PlainMessage {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

/// Amount of a transferable asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mosaic {
    pub id: u64,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferTransaction {
    pub network: NetworkType,
    pub deadline: Deadline,
    pub recipient: Address,
    pub mosaics: Vec<Mosaic>,
    pub message: PlainMessage,
}

impl TransferTransaction {
    /// Transfer carrying only `message`.
    pub fn message_only(
        network: NetworkType,
        deadline: Deadline,
        recipient: Address,
        message: PlainMessage,
    ) -> Self {
        Self {
            network,
            deadline,
            recipient,
            mosaics: Vec::new(),
            message,
        }
    }

    /// Embed in an aggregate, authorized by `signer`.
    pub fn into_embedded(self, signer: PublicAccount) -> InnerTransaction {
        InnerTransaction {
            signer,
            body: InnerBody::Transfer(self),
        }
    }
}

/// Payload of an embedded transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InnerBody {
    Transfer(TransferTransaction),
    /// Any embedded kind the pipeline does not interpret.
    Other { type_id: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InnerTransaction {
    pub signer: PublicAccount,
    pub body: InnerBody,
}

impl InnerTransaction {
    pub fn as_transfer(&self) -> Option<&TransferTransaction> {
        match &self.body {
            InnerBody::Transfer(t) => Some(t),
            InnerBody::Other { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateKind {
    /// All parties signed up front.
    Complete,
    /// Awaiting cosignatures.
    Bonded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateTransaction {
    pub kind: AggregateKind,
    pub network: NetworkType,
    pub deadline: Deadline,
    pub inner: Vec<InnerTransaction>,
    /// Set once the external client has signed it.
    pub signer: Option<PublicAccount>,
}

impl AggregateTransaction {
    pub fn create_complete(
        deadline: Deadline,
        inner: Vec<InnerTransaction>,
        network: NetworkType,
    ) -> Self {
        Self {
            kind: AggregateKind::Complete,
            network,
            deadline,
            inner,
            signer: None,
        }
    }

    /// The same aggregate as the ledger reports it after `signer` signed it.
    pub fn signed_by(mut self, signer: PublicAccount) -> Self {
        self.signer = Some(signer);
        self
    }
}

/// A confirmed ledger record, as returned by a [`RecordSource`](crate::RecordSource).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transaction {
    Aggregate(AggregateTransaction),
    Transfer {
        transfer: TransferTransaction,
        signer: Option<PublicAccount>,
    },
    Other {
        type_id: u16,
        network: NetworkType,
        signer: Option<PublicAccount>,
    },
}

impl Transaction {
    pub fn as_aggregate(&self) -> Option<&AggregateTransaction> {
        match self {
            Self::Aggregate(a) => Some(a),
            _ => None,
        }
    }
}

/// Account metadata needed to locate its records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountInfo {
    pub address: Address,
    /// Height at which the ledger first saw the address.
    pub address_height: u64,
    pub public_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "TBFBW6TUGLEWQIBCMTBMXXQORZKUP3WTVVTOKK5M";
    const KEY: &str = "B4F12E7C9F6946091E2CB8B6D3A12B50D17CCBBF646386EA27CE2946A7423DCF";

    fn account() -> PublicAccount {
        PublicAccount::new(KEY, Address::from_raw(ADDR).unwrap()).unwrap()
    }

    #[test]
    fn default_deadline_is_two_hours_ahead() {
        let before = Utc::now();
        let deadline = Deadline::create();
        let ahead = deadline.timestamp() - before;
        assert!(ahead >= Duration::hours(2));
        assert!(ahead < Duration::hours(2) + Duration::minutes(1));
    }

    #[test]
    fn deadlines_order_by_time() {
        let now = Utc::now();
        assert!(Deadline::at(now) < Deadline::at(now + Duration::seconds(1)));
    }

    #[test]
    fn message_only_transfer_has_no_mosaics() {
        let transfer = TransferTransaction::message_only(
            NetworkType::TestNet,
            Deadline::create(),
            Address::from_raw(ADDR).unwrap(),
            PlainMessage::new("hello"),
        );
        assert!(transfer.mosaics.is_empty());
        let inner = transfer.into_embedded(account());
        assert_eq!(inner.as_transfer().unwrap().message.payload, "hello");
        assert_eq!(inner.signer, account());
    }

    #[test]
    fn signed_by_sets_signer() {
        let aggregate =
            AggregateTransaction::create_complete(Deadline::create(), vec![], NetworkType::TestNet);
        assert!(aggregate.signer.is_none());
        let signed = aggregate.signed_by(account());
        assert_eq!(signed.signer, Some(account()));
        assert_eq!(signed.kind, AggregateKind::Complete);
    }

    #[test]
    fn other_inner_body_is_not_a_transfer() {
        let inner = InnerTransaction {
            signer: account(),
            body: InnerBody::Other { type_id: 0x414e },
        };
        assert!(inner.as_transfer().is_none());
    }
}
