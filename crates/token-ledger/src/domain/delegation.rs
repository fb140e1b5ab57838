//! # Delegation State
//!
//! A ledger is either answering locally or forwarding to a successor. The
//! successor handle type is left generic so the domain does not depend on
//! how ledgers reach each other.

use super::value_objects::Address;
use crate::errors::{LedgerError, Result};
use std::fmt;

/// Routing state of a ledger.
#[derive(Clone)]
pub enum DelegationState<S> {
    /// Reads and writes are served from local state.
    Local,
    /// Reads and writes are forwarded to the successor.
    Forwarding {
        /// Address of the successor ledger.
        successor: Address,
        /// Handle used to reach it.
        handle: S,
    },
}

impl<S> Default for DelegationState<S> {
    fn default() -> Self {
        Self::Local
    }
}

impl<S> fmt::Debug for DelegationState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("Local"),
            Self::Forwarding { successor, .. } => {
                f.debug_struct("Forwarding").field("successor", successor).finish()
            }
        }
    }
}

impl<S> DelegationState<S> {
    /// Successor address, if forwarding.
    #[must_use]
    pub fn successor(&self) -> Option<Address> {
        match self {
            Self::Local => None,
            Self::Forwarding { successor, .. } => Some(*successor),
        }
    }

    /// Whether calls are forwarded.
    #[must_use]
    pub fn is_forwarding(&self) -> bool {
        matches!(self, Self::Forwarding { .. })
    }
}

/// Context carried with every forwarded call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mandate {
    /// Ledger that forwarded the call.
    pub mandator: Address,
    /// Number of forwarding hops taken so far, this one included.
    pub depth: u8,
}

impl Mandate {
    /// First hop out of `mandator`.
    #[must_use]
    pub fn first_hop(mandator: Address) -> Self {
        Self { mandator, depth: 1 }
    }

    /// Next hop when `mandator` forwards again. A hop count that no longer
    /// fits fails like any other over-long chain.
    pub fn next_hop(&self, mandator: Address) -> Result<Self> {
        let depth = self
            .depth
            .checked_add(1)
            .ok_or(LedgerError::DelegationDepthExceeded {
                depth: self.depth,
                max: u8::MAX,
            })?;
        Ok(Self { mandator, depth })
    }

    /// Fails once the chain is longer than `max` hops.
    pub fn check_depth(&self, max: u8) -> Result<()> {
        if self.depth > max {
            return Err(LedgerError::DelegationDepthExceeded {
                depth: self.depth,
                max,
            });
        }
        Ok(())
    }
}

/// Rejects delegating a ledger to itself.
pub fn check_successor(ledger: Address, successor: Option<Address>) -> Result<()> {
    if successor == Some(ledger) {
        return Err(LedgerError::SelfDelegation);
    }
    Ok(())
}

/// Accepts a delegate-facing call only from the recognised mandator.
pub fn check_mandator(delegated_from: Option<Address>, mandate: &Mandate) -> Result<()> {
    match delegated_from {
        Some(expected) if expected == mandate.mandator => Ok(()),
        _ => Err(LedgerError::NotDelegatedMandator {
            caller: mandate.mandator,
        }),
    }
}
