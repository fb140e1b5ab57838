//! # Integration Flows
//!
//! Whole-ledger behaviour through the public API, one ledger or several.

pub mod concurrency;
pub mod delegation;
pub mod properties;
