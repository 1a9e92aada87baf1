//! Account identities and addresses.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::network::NetworkType;
use crate::ADDRESS_LEN;

/// Plain (undashed) ledger address. The first character encodes the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    plain: String,
    network: NetworkType,
}

impl Address {
    /// Parse a plain or dash-grouped address. Case-insensitive.
    pub fn from_raw(raw: &str) -> Result<Self> {
        let plain: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if plain.len() != ADDRESS_LEN
            || !plain
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(FormError::InvalidAddress(raw.to_string()));
        }

        let network = plain
            .chars()
            .next()
            .and_then(NetworkType::from_address_prefix)
            .ok_or_else(|| FormError::InvalidAddress(raw.to_string()))?;

        Ok(Self { plain, network })
    }

    /// The 40-character form carried on the wire.
    pub fn plain(&self) -> &str {
        &self.plain
    }

    /// Dash-separated groups of six characters, for messages.
    pub fn pretty(&self) -> String {
        self.plain
            .as_bytes()
            .chunks(6)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("-")
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain)
    }
}

impl TryFrom<String> for Address {
    type Error = FormError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_raw(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.plain
    }
}

/// Public half of a ledger account: its key and the address derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PublicAccount {
    public_key: String,
    address: Address,
}

impl PublicAccount {
    /// `public_key` must be 32 bytes of hex.
    pub fn new(public_key: &str, address: Address) -> Result<Self> {
        let bytes = hex::decode(public_key)
            .map_err(|e| FormError::InvalidPublicKey(format!("{}: {}", public_key, e)))?;
        if bytes.len() != 32 {
            return Err(FormError::InvalidPublicKey(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self {
            public_key: hex::encode_upper(bytes),
            address,
        })
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn network(&self) -> NetworkType {
        self.address.network()
    }
}

/// Source of fresh addresses for newly created forms.
pub trait AddressAllocator {
    fn allocate(&self, network: NetworkType) -> Result<Address>;
}

const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Draws addresses from OS randomness.
///
/// The result is well-formed but not backed by a key pair; deployments that
/// need to sign as the form account inject their ledger's key generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAddressAllocator;

impl AddressAllocator for RandomAddressAllocator {
    fn allocate(&self, network: NetworkType) -> Result<Address> {
        let mut entropy = [0u8; ADDRESS_LEN - 1];
        getrandom::getrandom(&mut entropy)
            .map_err(|e| FormError::AddressAllocation(e.to_string()))?;

        let mut plain = String::with_capacity(ADDRESS_LEN);
        plain.push(network.address_prefix());
        plain.extend(
            entropy
                .iter()
                .map(|b| BASE32_ALPHABET[(b & 0x1f) as usize] as char),
        );
        Address::from_raw(&plain)
    }
}
