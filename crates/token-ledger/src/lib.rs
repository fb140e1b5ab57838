//! # Token Ledger - Mintable, Pausable Balance Accounting
//!
//! A single-asset ledger: holder balances with an enumeration index, capped
//! minting, a pause switch, signed off-line transfers from whitelisted
//! holders, and forwarding to a successor ledger for migrations.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Holder appears in the index at most once | `domain/balance_store.rs` - `HolderRegistry::register()` |
//! | Total supply equals the sum of balances (absent admin writes) | `domain/supply.rs` - `SupplyController::mint()` |
//! | Minting, once finished, stays finished | `domain/supply.rs` - `SupplyController::finish_minting()` |
//! | A ledger never delegates to itself | `domain/delegation.rs` - `check_successor()` |
//!
//! `domain/invariants.rs` checks them on demand; debug builds assert the
//! structural ones before every event is published.
//!
//! ## Overflow Policy
//!
//! | Path | Amount at/over the 256-bit maximum |
//! |------|------------------------------------|
//! | `set_balance`, `add_balance` | rejected (`InvalidAmount` / `Overflow`) |
//! | `mint` | not representable: succeeds, moves nothing |
//! | `transfer_to`, `transfer_from_to` | not representable: succeeds, moves nothing |
//! | `mint` within range but over the cap | rejected (`SupplyCapExceeded`) |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose | Bundled adapter |
//! |-------|---------|-----------------|
//! | `AdminAuthority` | Administrator capability check | `ClaimableAdmin` |
//! | `Whitelist` | Who may originate authorized transfers | `InMemoryWhitelist` |
//! | `AuthorizationVerifier` | Artifact to signer recovery | `EcdsaAuthorizationVerifier` |
//! | `EventSink` | Event output channel | `InMemoryEventLog` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use token_ledger::prelude::*;
//!
//! let ledger = TokenLedger::new(address, LedgerConfig::from_env(), collaborators)?;
//! ledger.mint(owner, investor, widen_amount(tokens(75_000, 9)))?;
//! assert_eq!(ledger.balance_of(investor)?, tokens(75_000, 9));
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Value objects
    pub use crate::domain::value_objects::{
        narrow_amount, tokens, widen_amount, Address, Hash, MAX_AMOUNT, U256, U512,
    };

    // Domain components
    pub use crate::domain::{
        AuthorizationArtifact, BalanceStore, DelegationState, InvariantViolation, Mandate,
        MintOutcome, PauseGate, SupplyController, TransferOutcome,
    };

    // Ports
    pub use crate::ports::inbound::{DelegateLedger, TokenLedgerApi};
    pub use crate::ports::outbound::{AdminAuthority, AuthorizationVerifier, EventSink, Whitelist};

    // Events
    pub use crate::events::{LedgerEvent, LedgerEventRecord};

    // Errors
    pub use crate::errors::{LedgerError, Result};

    // Config
    pub use crate::config::LedgerConfig;

    // Adapters
    pub use crate::adapters::{
        address_from_verifying_key, sign_authorization, ClaimableAdmin,
        EcdsaAuthorizationVerifier, InMemoryEventLog, InMemoryWhitelist,
    };

    // Service
    pub use crate::service::{Collaborators, SuccessorHandle, TokenLedger};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
