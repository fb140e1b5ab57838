//! # Transfer Engine
//!
//! Validation and application of value movement between holders.
//!
//! Three entry shapes share one application step:
//! - authorized transfers (signed off-line, whitelisted authorizer, pausable)
//! - privileged administrator transfers (no signature or whitelist, not pausable)
//! - plain holder transfers (pausable)
//!
//! The authorized and privileged paths accept wide request amounts. An amount
//! that does not fit in 256 bits is reported as fulfilled while moving
//! nothing, mirroring the mint policy.

use super::balance_store::BalanceStore;
use super::pause::PauseGate;
use super::value_objects::{narrow_amount, Address, U256, U512};
use crate::errors::{LedgerError, Result};

/// Result of a transfer that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Value moved.
    Moved {
        /// Amount moved.
        amount: U256,
    },
    /// Requested amount was not representable; nothing moved.
    Collapsed,
}

impl TransferOutcome {
    /// Amount actually moved.
    #[must_use]
    pub fn moved(&self) -> U256 {
        match self {
            Self::Moved { amount } => *amount,
            Self::Collapsed => U256::zero(),
        }
    }
}

/// Stateless transfer rules applied to a ledger's balance store.
#[derive(Debug, Clone, Copy)]
pub struct AuthorizedTransferEngine {
    ledger: Address,
}

impl AuthorizedTransferEngine {
    /// Engine acting for the ledger at `ledger`.
    #[must_use]
    pub fn new(ledger: Address) -> Self {
        Self { ledger }
    }

    /// Apply an authorization already resolved to `authorizer`.
    ///
    /// Checks run in a fixed order: pause gate, whitelist, recipient, amount
    /// width, balance.
    pub fn authorized_transfer(
        &self,
        balances: &mut BalanceStore,
        gate: &PauseGate,
        authorizer: Address,
        authorizer_whitelisted: bool,
        to: Address,
        amount: U512,
    ) -> Result<TransferOutcome> {
        gate.assert_not_paused()?;
        if !authorizer_whitelisted {
            return Err(LedgerError::NotWhitelisted {
                account: authorizer,
            });
        }
        self.check_recipient(to)?;
        self.apply_wide(balances, authorizer, to, amount)
    }

    /// Administrator transfer between arbitrary holders.
    pub fn privileged_transfer(
        &self,
        balances: &mut BalanceStore,
        from: Address,
        to: Address,
        amount: U512,
    ) -> Result<TransferOutcome> {
        self.check_recipient(to)?;
        self.apply_wide(balances, from, to, amount)
    }

    /// Holder-initiated transfer of a representable amount.
    pub fn plain_transfer(
        &self,
        balances: &mut BalanceStore,
        gate: &PauseGate,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<U256> {
        gate.assert_not_paused()?;
        self.check_recipient(to)?;
        balances.transfer(from, to, amount)?;
        Ok(amount)
    }

    /// Rejects the null account and the ledger's own address.
    pub fn check_recipient(&self, to: Address) -> Result<()> {
        if to.is_zero() || to == self.ledger {
            return Err(LedgerError::InvalidRecipient { recipient: to });
        }
        Ok(())
    }

    fn apply_wide(
        &self,
        balances: &mut BalanceStore,
        from: Address,
        to: Address,
        amount: U512,
    ) -> Result<TransferOutcome> {
        let Some(amount) = narrow_amount(amount) else {
            return Ok(TransferOutcome::Collapsed);
        };
        balances.transfer(from, to, amount)?;
        Ok(TransferOutcome::Moved { amount })
    }
}

// =============================================================================
// TESTS
// =============================================================================
