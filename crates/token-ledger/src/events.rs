//! # Ledger Events
//!
//! Structured records published after every successful state transition.
//! Failed operations publish nothing.

use crate::domain::value_objects::{Address, U256};
use serde::{Deserialize, Serialize};

/// A state transition observed on a ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Value moved. `from` is the null account for issuance.
    Transfer {
        /// Debited account.
        from: Address,
        /// Credited account.
        to: Address,
        /// Amount moved.
        value: U256,
    },
    /// Tokens issued.
    Mint {
        /// Credited account.
        to: Address,
        /// Amount issued.
        amount: U256,
    },
    /// Minting closed for good.
    MintFinished,
    /// Transfers blocked.
    Pause,
    /// Transfers allowed again.
    Unpause,
    /// Administrator overwrote a balance.
    BalanceSet {
        /// Affected account.
        account: Address,
        /// New balance.
        amount: U256,
    },
    /// Administrator credited a balance.
    BalanceAdded {
        /// Affected account.
        account: Address,
        /// Credit applied.
        amount: U256,
    },
    /// Administrator debited a balance.
    BalanceSubtracted {
        /// Affected account.
        account: Address,
        /// Debit applied.
        amount: U256,
    },
    /// Forwarding target changed. `None` returns the ledger to local service.
    DelegateToNewContract {
        /// New successor.
        new_contract: Option<Address>,
    },
    /// Recognised predecessor changed.
    DelegatedFromSet {
        /// Predecessor allowed to call delegate-facing entry points.
        addr: Address,
    },
    /// Token name and symbol changed.
    ChangeTokenName {
        /// New name.
        new_name: String,
        /// New symbol.
        new_symbol: String,
    },
}

impl LedgerEvent {
    /// Short kind label, used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "Transfer",
            Self::Mint { .. } => "Mint",
            Self::MintFinished => "MintFinished",
            Self::Pause => "Pause",
            Self::Unpause => "Unpause",
            Self::BalanceSet { .. } => "BalanceSet",
            Self::BalanceAdded { .. } => "BalanceAdded",
            Self::BalanceSubtracted { .. } => "BalanceSubtracted",
            Self::DelegateToNewContract { .. } => "DelegateToNewContract",
            Self::DelegatedFromSet { .. } => "DelegatedFromSet",
            Self::ChangeTokenName { .. } => "ChangeTokenName",
        }
    }
}

/// Event stamped with its emitting ledger and a per-ledger sequence number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEventRecord {
    /// Emitting ledger.
    pub ledger: Address,
    /// Position in the ledger's event stream, starting at 0.
    pub sequence: u64,
    /// The event itself.
    pub event: LedgerEvent,
}
