//! # Supply Controller
//!
//! Tracks issued supply against the fixed issuance cap and owns the
//! one-way minting latch.
//!
//! Two outcomes of [`SupplyController::mint`] look alike but are not:
//! a representable amount that does not fit under the cap is rejected with
//! `SupplyCapExceeded`, while an amount that does not even fit in 256 bits
//! collapses into a successful zero-value mint.

use super::balance_store::BalanceStore;
use super::value_objects::{narrow_amount, Address, U256, U512};
use crate::errors::{LedgerError, Result};

/// Result of a mint request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintOutcome {
    /// Tokens were issued.
    Minted {
        /// Amount issued.
        amount: U256,
        /// Total supply after issuance.
        total_supply: U256,
    },
    /// Amount was not representable; nothing changed.
    Collapsed {
        /// Unchanged total supply.
        total_supply: U256,
    },
}

impl MintOutcome {
    /// Total supply after the request.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        match self {
            Self::Minted { total_supply, .. } | Self::Collapsed { total_supply } => *total_supply,
        }
    }

    /// Amount actually issued.
    #[must_use]
    pub fn minted(&self) -> U256 {
        match self {
            Self::Minted { amount, .. } => *amount,
            Self::Collapsed { .. } => U256::zero(),
        }
    }
}

/// Issued supply, issuance cap and minting latch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyController {
    total_supply: U256,
    total_tokens: U256,
    minting_finished: bool,
}

impl SupplyController {
    /// New controller with nothing issued.
    #[must_use]
    pub fn new(total_tokens: U256) -> Self {
        Self {
            total_supply: U256::zero(),
            total_tokens,
            minting_finished: false,
        }
    }

    /// Currently issued amount.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Issuance cap.
    #[must_use]
    pub fn total_tokens(&self) -> U256 {
        self.total_tokens
    }

    /// Whether minting has been closed for good.
    #[must_use]
    pub fn minting_finished(&self) -> bool {
        self.minting_finished
    }

    /// Issue `amount` to `account`.
    ///
    /// Validation happens before any write, so an error leaves both the
    /// controller and `balances` unchanged.
    pub fn mint(
        &mut self,
        balances: &mut BalanceStore,
        account: Address,
        amount: U512,
    ) -> Result<MintOutcome> {
        if self.minting_finished {
            return Err(LedgerError::MintingClosed);
        }

        let Some(amount) = narrow_amount(amount) else {
            return Ok(MintOutcome::Collapsed {
                total_supply: self.total_supply,
            });
        };

        let new_supply = self
            .total_supply
            .checked_add(amount)
            .filter(|supply| *supply <= self.total_tokens)
            .ok_or(LedgerError::SupplyCapExceeded {
                supply: self.total_supply,
                amount,
                cap: self.total_tokens,
            })?;

        // Cap is below the sentinel, but the credit check stays authoritative.
        let credited = balances.credited(&account, amount)?;
        balances.set_balance(account, credited)?;
        self.total_supply = new_supply;

        Ok(MintOutcome::Minted {
            amount,
            total_supply: new_supply,
        })
    }

    /// Close minting permanently. Returns false if it was already closed.
    pub fn finish_minting(&mut self) -> bool {
        let changed = !self.minting_finished;
        self.minting_finished = true;
        changed
    }
}

// =============================================================================
// TESTS
// =============================================================================
