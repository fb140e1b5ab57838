//! # Domain Module
//!
//! Ledger state components and the rules binding them. Nothing here locks,
//! logs or talks to collaborators; the service layer does that.

pub mod authorization;
pub mod balance_store;
pub mod delegation;
pub mod invariants;
pub mod pause;
pub mod supply;
pub mod transfer;
pub mod value_objects;

pub use authorization::{
    authorization_digest, keccak256, AuthorizationArtifact, ReplayGuard,
};
pub use balance_store::{BalanceStore, HolderRegistry};
pub use delegation::{check_mandator, check_successor, DelegationState, Mandate};
pub use invariants::InvariantViolation;
pub use pause::PauseGate;
pub use supply::{MintOutcome, SupplyController};
pub use transfer::{AuthorizedTransferEngine, TransferOutcome};
pub use value_objects::{
    narrow_amount, tokens, widen_amount, Address, Hash, MAX_AMOUNT, U256, U512,
};
