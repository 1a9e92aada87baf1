//! RecordSource: user-provided ledger read access.

use async_trait::async_trait;
use formchain_core::Address;

use crate::error::SourceError;
use crate::types::{AccountInfo, Transaction};

/// Read side of the ledger client.
///
/// Implementations own transport, timeouts and retries. The retrieval
/// pipeline issues exactly one call of each kind per lookup and passes
/// their errors through unchanged.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Metadata for `address`, including the height of its first record.
    async fn account_info(&self, address: &Address) -> Result<AccountInfo, SourceError>;

    /// All confirmed transactions in the block at `height`.
    async fn block_transactions(&self, height: u64) -> Result<Vec<Transaction>, SourceError>;
}
