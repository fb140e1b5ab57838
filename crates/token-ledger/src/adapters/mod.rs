//! # Adapters
//!
//! In-memory implementations of the outbound ports.

pub mod claimable_admin;
pub mod ecdsa;
pub mod event_log;
pub mod whitelist;

pub use claimable_admin::ClaimableAdmin;
pub use ecdsa::{address_from_verifying_key, sign_authorization, EcdsaAuthorizationVerifier};
pub use event_log::InMemoryEventLog;
pub use whitelist::InMemoryWhitelist;
