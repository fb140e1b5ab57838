//! # Domain Invariants
//!
//! Executable forms of the ledger invariants. The service checks them in
//! debug builds after every mutation; tests call them directly.
//!
//! | Invariant | Check |
//! |-----------|-------|
//! | Holder index has no duplicates | [`check_holder_uniqueness`] |
//! | Supply equals sum of balances | [`check_supply_matches_balances`] |
//! | Supply within issuance cap | [`check_supply_cap`] |
//! | No balance reaches the sentinel | [`check_balances_storable`] |

use super::balance_store::BalanceStore;
use super::supply::SupplyController;
use super::value_objects::{Address, MAX_AMOUNT, U256};
use std::collections::HashSet;

/// A violated invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Holder listed twice.
    DuplicateHolder(Address),
    /// Supply and summed balances disagree.
    SupplyMismatch {
        /// Recorded supply.
        supply: U256,
        /// Summed balances, `None` if the sum overflowed.
        balances: Option<U256>,
    },
    /// Supply above the cap.
    SupplyAboveCap {
        /// Recorded supply.
        supply: U256,
        /// Issuance cap.
        cap: U256,
    },
    /// Stored balance at the reserved maximum.
    SentinelBalance(Address),
}

/// Every holder appears once in the enumeration.
#[must_use]
pub fn check_holder_uniqueness(balances: &BalanceStore) -> Option<InvariantViolation> {
    let mut seen = HashSet::new();
    balances
        .holders()
        .iter()
        .find(|holder| !seen.insert(**holder))
        .map(|holder| InvariantViolation::DuplicateHolder(*holder))
}

/// Recorded supply equals the sum of every holder balance.
///
/// Only meaningful while balances are changed exclusively through minting and
/// transfers; direct administrative balance writes are out-of-band.
#[must_use]
pub fn check_supply_matches_balances(
    supply: &SupplyController,
    balances: &BalanceStore,
) -> Option<InvariantViolation> {
    let summed = balances.sum_of_balances();
    if summed == Some(supply.total_supply()) {
        None
    } else {
        Some(InvariantViolation::SupplyMismatch {
            supply: supply.total_supply(),
            balances: summed,
        })
    }
}

/// Supply never exceeds the issuance cap.
#[must_use]
pub fn check_supply_cap(supply: &SupplyController) -> Option<InvariantViolation> {
    (supply.total_supply() > supply.total_tokens()).then(|| InvariantViolation::SupplyAboveCap {
        supply: supply.total_supply(),
        cap: supply.total_tokens(),
    })
}

/// No stored balance equals the reserved maximum.
#[must_use]
pub fn check_balances_storable(balances: &BalanceStore) -> Option<InvariantViolation> {
    balances
        .holders()
        .iter()
        .find(|holder| balances.balance_of(holder) >= MAX_AMOUNT)
        .map(|holder| InvariantViolation::SentinelBalance(*holder))
}

/// Structural invariants that hold regardless of administrative writes.
#[must_use]
pub fn check_structural_invariants(
    supply: &SupplyController,
    balances: &BalanceStore,
) -> Vec<InvariantViolation> {
    [
        check_holder_uniqueness(balances),
        check_supply_cap(supply),
        check_balances_storable(balances),
    ]
    .into_iter()
    .flatten()
    .collect()
}
