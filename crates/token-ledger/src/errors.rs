//! # Error Types
//!
//! Every failure a ledger operation can report. A failed operation never
//! leaves partial state behind.

use crate::domain::value_objects::{Address, U256};
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LedgerError>;

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors surfaced by ledger operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Caller failed the administrator capability check.
    #[error("unauthorized caller: {caller:?}")]
    Unauthorized {
        /// Rejected caller.
        caller: Address,
    },

    /// Balance would equal or exceed the reserved maximum.
    #[error("invalid amount: {amount} reaches the reserved maximum")]
    InvalidAmount {
        /// Rejected amount.
        amount: U256,
    },

    /// Balance addition would reach the reserved maximum.
    #[error("balance overflow for {account:?}: {balance} + {delta}")]
    Overflow {
        /// Account being credited.
        account: Address,
        /// Balance before the credit.
        balance: U256,
        /// Requested credit.
        delta: U256,
    },

    /// Debit larger than the available balance.
    #[error("insufficient balance for {account:?}: required {required}, available {available}")]
    InsufficientBalance {
        /// Account being debited.
        account: Address,
        /// Requested debit.
        required: U256,
        /// Current balance.
        available: U256,
    },

    /// Mint would push total supply past the issuance cap.
    #[error("supply cap exceeded: {supply} + {amount} > {cap}")]
    SupplyCapExceeded {
        /// Total supply before the mint.
        supply: U256,
        /// Requested mint.
        amount: U256,
        /// Issuance cap.
        cap: U256,
    },

    /// Minting has been permanently finished.
    #[error("minting is finished")]
    MintingClosed,

    /// Transfers are paused.
    #[error("ledger is paused")]
    ContractPaused,

    /// Authorizing account is not whitelisted.
    #[error("account not whitelisted: {account:?}")]
    NotWhitelisted {
        /// Account that failed the whitelist check.
        account: Address,
    },

    /// Recipient is the null account or the ledger itself.
    #[error("invalid recipient: {recipient:?}")]
    InvalidRecipient {
        /// Rejected recipient.
        recipient: Address,
    },

    /// Batch inputs have different lengths.
    #[error("batch length mismatch: {accounts} accounts, {amounts} amounts")]
    LengthMismatch {
        /// Number of accounts supplied.
        accounts: usize,
        /// Number of amounts supplied.
        amounts: usize,
    },

    /// Delegate-facing entry point invoked by someone other than the mandator.
    #[error("not the delegated mandator: {caller:?}")]
    NotDelegatedMandator {
        /// Rejected caller.
        caller: Address,
    },

    /// Holder enumeration index out of range.
    #[error("holder index out of range: {index} >= {count}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of registered holders.
        count: usize,
    },

    /// Attempt to delegate a ledger to itself.
    #[error("ledger cannot delegate to itself")]
    SelfDelegation,

    /// Authorization artifact did not recover to the caller.
    #[error("invalid transfer authorization")]
    InvalidAuthorization,

    /// Authorization digest was already consumed.
    #[error("transfer authorization already used")]
    AuthorizationReplayed,

    /// Forwarding chain longer than the configured limit.
    #[error("delegation depth exceeded: {depth} > {max}")]
    DelegationDepthExceeded {
        /// Depth reached.
        depth: u8,
        /// Configured limit.
        max: u8,
    },

    /// Rejected ledger configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl LedgerError {
    /// Returns true for capability failures (admin, whitelist, mandator).
    #[must_use]
    pub fn is_permission_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. }
                | Self::NotWhitelisted { .. }
                | Self::NotDelegatedMandator { .. }
                | Self::InvalidAuthorization
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
