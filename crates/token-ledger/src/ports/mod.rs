//! # Ports
//!
//! - `inbound`: what the ledger offers (public API, delegate-facing API)
//! - `outbound`: what the ledger needs (admin check, whitelist, signature
//!   recovery, event sink)

pub mod inbound;
pub mod outbound;

pub use inbound::{DelegateLedger, TokenLedgerApi};
pub use outbound::{AdminAuthority, AuthorizationVerifier, EventSink, Whitelist};
