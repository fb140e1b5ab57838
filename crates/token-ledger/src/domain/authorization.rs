//! # Transfer Authorization
//!
//! Binding between an off-line signed approval and the transfer it approves.
//!
//! The signed digest covers the ledger address, the submitting caller, the
//! target, the requested amount (full 512-bit request width) and a
//! caller-chosen nonce. A digest is accepted at most once per ledger.

use super::value_objects::{Address, Hash, U512};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::collections::HashSet;

/// Domain tag mixed into every authorization digest.
const AUTHORIZATION_DOMAIN: &[u8] = b"token-ledger/transfer-to/v1";

/// Recoverable ECDSA signature (r, s, v) over an authorization digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationArtifact {
    /// R component.
    pub r: [u8; 32],
    /// S component.
    pub s: [u8; 32],
    /// Recovery id (0, 1, 27 or 28).
    pub v: u8,
}

/// Keccak-256 helper.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    Hash(hash)
}

/// Digest an authorizer signs to approve moving `amount` to `target`.
#[must_use]
pub fn authorization_digest(
    ledger: Address,
    caller: Address,
    target: Address,
    amount: U512,
    nonce: u64,
) -> Hash {
    let mut amount_bytes = [0u8; 64];
    amount.to_big_endian(&mut amount_bytes);

    let mut hasher = Keccak256::new();
    hasher.update(AUTHORIZATION_DOMAIN);
    hasher.update(ledger.as_bytes());
    hasher.update(caller.as_bytes());
    hasher.update(target.as_bytes());
    hasher.update(amount_bytes);
    hasher.update(nonce.to_be_bytes());
    let result = hasher.finalize();

    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    Hash(hash)
}

/// Digests already honoured by a ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayGuard {
    consumed: HashSet<Hash>,
}

impl ReplayGuard {
    /// Empty guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `digest` was already consumed.
    #[must_use]
    pub fn is_consumed(&self, digest: &Hash) -> bool {
        self.consumed.contains(digest)
    }

    /// Mark `digest` consumed. Returns false if it already was.
    pub fn consume(&mut self, digest: Hash) -> bool {
        self.consumed.insert(digest)
    }

    /// Number of consumed digests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.consumed.len()
    }

    /// True when nothing was consumed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }
}
