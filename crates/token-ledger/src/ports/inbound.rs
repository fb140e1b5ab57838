//! # Driving Ports (API - Inbound)
//!
//! `TokenLedgerApi` is what callers use. `DelegateLedger` is the narrower
//! surface a predecessor ledger uses when it forwards to this one; every
//! method there is accepted only from the recognised mandator.

use crate::domain::authorization::AuthorizationArtifact;
use crate::domain::delegation::Mandate;
use crate::domain::supply::MintOutcome;
use crate::domain::transfer::TransferOutcome;
use crate::domain::value_objects::{Address, Hash, U256, U512};
use crate::errors::Result;
use std::sync::Arc;

// =============================================================================
// DELEGATE-FACING API
// =============================================================================

/// Entry points a predecessor forwards into.
pub trait DelegateLedger: Send + Sync {
    /// Address of this ledger.
    fn ledger_address(&self) -> Address;

    /// Total supply as seen by the current authority.
    fn delegate_total_supply(&self, mandate: Mandate) -> Result<U256>;

    /// Balance of `who` as seen by the current authority.
    fn delegate_balance_of(&self, mandate: Mandate, who: Address) -> Result<U256>;

    /// Transfer executed as if `origin` had called `transfer` here.
    fn delegate_transfer(
        &self,
        mandate: Mandate,
        to: Address,
        amount: U256,
        origin: Address,
    ) -> Result<()>;
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Caller-facing ledger operations. `caller` is the authenticated identity
/// of whoever invokes the operation.
pub trait TokenLedgerApi: Send + Sync {
    // === Reads (forwarded when delegated) ===

    /// Issued supply of the current authority.
    fn total_supply(&self) -> Result<U256>;

    /// Balance of `who` at the current authority.
    fn balance_of(&self, who: Address) -> Result<U256>;

    // === Holder transfers ===

    /// Move `amount` from `caller` to `to` (forwarded when delegated).
    fn transfer(&self, caller: Address, to: Address, amount: U256) -> Result<()>;

    /// Move value on the strength of an off-line signed authorization.
    fn transfer_to(
        &self,
        caller: Address,
        to: Address,
        amount: U512,
        nonce: u64,
        artifact: &AuthorizationArtifact,
    ) -> Result<TransferOutcome>;

    /// Digest `caller` must have signed for `transfer_to`.
    fn calc_hash(&self, caller: Address, to: Address, amount: U512, nonce: u64) -> Hash;

    // === Administration ===

    /// Administrator transfer between arbitrary holders.
    fn transfer_from_to(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U512,
    ) -> Result<TransferOutcome>;

    /// Issue tokens.
    fn mint(&self, caller: Address, to: Address, amount: U512) -> Result<MintOutcome>;

    /// Close minting permanently.
    fn finish_minting(&self, caller: Address) -> Result<()>;

    /// Block transfers.
    fn pause(&self, caller: Address) -> Result<()>;

    /// Allow transfers.
    fn unpause(&self, caller: Address) -> Result<()>;

    /// Start forwarding to `successor`, or stop with `None`.
    fn delegate_to_new_contract(
        &self,
        caller: Address,
        successor: Option<Arc<dyn DelegateLedger>>,
    ) -> Result<()>;

    /// Recognise `predecessor` as the mandator of this ledger.
    fn set_delegated_from(&self, caller: Address, predecessor: Address) -> Result<()>;
}
