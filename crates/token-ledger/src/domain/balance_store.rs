//! # Balance Store
//!
//! Authoritative holder → balance map plus the holder enumeration index.
//!
//! The map and the index are only ever mutated together through the methods
//! below; neither is exposed mutably. An account enters the index the first
//! time it is credited through `set_balance`/`add_balance` (even with a zero
//! amount) and never leaves it.

use super::value_objects::{Address, MAX_AMOUNT, U256};
use crate::errors::{LedgerError, Result};
use std::collections::{HashMap, HashSet};

// =============================================================================
// HOLDER REGISTRY
// =============================================================================

/// Insertion-ordered set of every account that has been credited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolderRegistry {
    order: Vec<Address>,
    members: HashSet<Address>,
}

impl HolderRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `account` unless it is already registered.
    ///
    /// Returns true when the account was newly added.
    pub fn register(&mut self, account: Address) -> bool {
        if self.members.insert(account) {
            self.order.push(account);
            true
        } else {
            false
        }
    }

    /// Number of registered holders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no holder was ever registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Holder at `index` in registration order.
    pub fn get(&self, index: usize) -> Result<Address> {
        self.order
            .get(index)
            .copied()
            .ok_or(LedgerError::IndexOutOfRange {
                index,
                count: self.order.len(),
            })
    }

    /// Whether `account` is registered.
    #[must_use]
    pub fn contains(&self, account: &Address) -> bool {
        self.members.contains(account)
    }

    /// Iterate holders in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.order.iter()
    }
}

// =============================================================================
// BALANCE STORE
// =============================================================================

/// Holder balances with their enumeration index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceStore {
    balances: HashMap<Address, U256>,
    holders: HolderRegistry,
}

impl BalanceStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored balance, zero when the account is unknown.
    #[must_use]
    pub fn balance_of(&self, account: &Address) -> U256 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Overwrite the balance of `account`.
    pub fn set_balance(&mut self, account: Address, amount: U256) -> Result<()> {
        Self::check_storable(amount)?;
        self.write(account, amount);
        Ok(())
    }

    /// Credit `account` by `delta`, returning the new balance.
    pub fn add_balance(&mut self, account: Address, delta: U256) -> Result<U256> {
        let updated = self.credited(&account, delta)?;
        self.write(account, updated);
        Ok(updated)
    }

    /// Debit `account` by `delta`, returning the new balance.
    pub fn sub_balance(&mut self, account: Address, delta: U256) -> Result<U256> {
        let updated = self.debited(&account, delta)?;
        if let Some(balance) = self.balances.get_mut(&account) {
            *balance = updated;
        }
        Ok(updated)
    }

    /// Overwrite several balances at once.
    ///
    /// All-or-nothing: every pair is validated before any is written, so a
    /// rejected batch leaves the store untouched.
    pub fn set_balance_batch(&mut self, accounts: &[Address], amounts: &[U256]) -> Result<()> {
        if accounts.len() != amounts.len() {
            return Err(LedgerError::LengthMismatch {
                accounts: accounts.len(),
                amounts: amounts.len(),
            });
        }
        for amount in amounts {
            Self::check_storable(*amount)?;
        }
        for (account, amount) in accounts.iter().zip(amounts) {
            self.write(*account, *amount);
        }
        Ok(())
    }

    /// Move `amount` from `from` to `to` as one unit.
    ///
    /// Both sides are computed before either is written.
    pub fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<()> {
        let debited = self.debited(&from, amount)?;
        if from == to {
            // Net effect is nil; still register the recipient like a credit would.
            let unchanged = self.balance_of(&to);
            self.write(to, unchanged);
            return Ok(());
        }
        let credited = self.credited(&to, amount)?;
        if let Some(balance) = self.balances.get_mut(&from) {
            *balance = debited;
        }
        self.write(to, credited);
        Ok(())
    }

    /// Balance `account` would have after a credit of `delta`.
    pub fn credited(&self, account: &Address, delta: U256) -> Result<U256> {
        let balance = self.balance_of(account);
        match balance.checked_add(delta) {
            Some(sum) if sum < MAX_AMOUNT => Ok(sum),
            _ => Err(LedgerError::Overflow {
                account: *account,
                balance,
                delta,
            }),
        }
    }

    /// Balance `account` would have after a debit of `delta`.
    pub fn debited(&self, account: &Address, delta: U256) -> Result<U256> {
        let available = self.balance_of(account);
        available
            .checked_sub(delta)
            .ok_or(LedgerError::InsufficientBalance {
                account: *account,
                required: delta,
                available,
            })
    }

    /// Number of registered holders.
    #[must_use]
    pub fn holder_count(&self) -> usize {
        self.holders.len()
    }

    /// Holder at `index` in registration order.
    pub fn holder(&self, index: usize) -> Result<Address> {
        self.holders.get(index)
    }

    /// Read-only view of the holder index.
    #[must_use]
    pub fn holders(&self) -> &HolderRegistry {
        &self.holders
    }

    /// `(holder, balance)` pairs in registration order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(Address, U256)> {
        self.holders
            .iter()
            .map(|holder| (*holder, self.balance_of(holder)))
            .collect()
    }

    /// Sum of all registered balances, `None` if it does not fit in 256 bits.
    #[must_use]
    pub fn sum_of_balances(&self) -> Option<U256> {
        self.holders
            .iter()
            .try_fold(U256::zero(), |acc, holder| {
                acc.checked_add(self.balance_of(holder))
            })
    }

    fn check_storable(amount: U256) -> Result<()> {
        if amount >= MAX_AMOUNT {
            return Err(LedgerError::InvalidAmount { amount });
        }
        Ok(())
    }

    fn write(&mut self, account: Address, amount: U256) {
        self.holders.register(account);
        self.balances.insert(account, amount);
    }
}

// =============================================================================
// TESTS
// =============================================================================
