//! # Driven Ports (SPI - Outbound)
//!
//! Collaborators the ledger consults but does not own. Adapters in
//! `crate::adapters` provide in-memory implementations.
//!
//! All checks are synchronous; a ledger calls them while holding its own
//! lock, so implementations must not call back into the same ledger.

use crate::domain::authorization::AuthorizationArtifact;
use crate::domain::value_objects::{Address, Hash};
use crate::events::LedgerEventRecord;

// =============================================================================
// ADMINISTRATION
// =============================================================================

/// Capability check: is `caller` the current administrator?
///
/// How administration is handed over (e.g. propose/claim) is the
/// implementation's business.
pub trait AdminAuthority: Send + Sync {
    /// True if `caller` may perform administrative operations.
    fn is_admin(&self, caller: &Address) -> bool;
}

// =============================================================================
// WHITELIST
// =============================================================================

/// Allow-list gating who may originate an authorized transfer.
pub trait Whitelist: Send + Sync {
    /// True if `account` is allowed.
    fn is_whitelisted(&self, account: &Address) -> bool;
}

// =============================================================================
// AUTHORIZATION VERIFIER
// =============================================================================

/// Resolves an authorization artifact to the account that produced it.
pub trait AuthorizationVerifier: Send + Sync {
    /// Recover the signer of `digest`.
    ///
    /// # Returns
    ///
    /// * `Some(Address)` - Account that signed the digest
    /// * `None` - If the artifact is malformed or does not verify
    fn recover_authorizer(&self, digest: &Hash, artifact: &AuthorizationArtifact)
        -> Option<Address>;
}

// =============================================================================
// EVENT SINK
// =============================================================================

/// Output channel for ledger events.
pub trait EventSink: Send + Sync {
    /// Deliver one record. Called in sequence order.
    fn publish(&self, record: LedgerEventRecord);
}
