//! Claimable Administration Adapter
//!
//! Implements `AdminAuthority` with a two-step handover: the current owner
//! proposes a successor, which only takes effect once that successor claims.

use crate::domain::value_objects::Address;
use crate::errors::{LedgerError, Result};
use crate::ports::outbound::AdminAuthority;
use parking_lot::RwLock;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy)]
struct Ownership {
    owner: Address,
    pending_owner: Option<Address>,
}

/// Two-step ownership record for the ledger at `ledger`.
#[derive(Debug)]
pub struct ClaimableAdmin {
    ledger: Address,
    state: RwLock<Ownership>,
}

impl ClaimableAdmin {
    /// Administration of the ledger at `ledger`, owned by `owner`.
    pub fn new(owner: Address, ledger: Address) -> Self {
        Self {
            ledger,
            state: RwLock::new(Ownership {
                owner,
                pending_owner: None,
            }),
        }
    }

    /// Current owner.
    pub fn owner(&self) -> Address {
        self.state.read().owner
    }

    /// Proposed owner awaiting claim.
    pub fn pending_owner(&self) -> Option<Address> {
        self.state.read().pending_owner
    }

    /// Propose `new_owner`. Only the current owner may propose. Neither the
    /// null account nor the ledger itself can own the ledger.
    pub fn transfer_ownership(&self, caller: Address, new_owner: Address) -> Result<()> {
        let mut state = self.state.write();
        if caller != state.owner {
            warn!("[ledger] ownership proposal by non-owner {}", caller);
            return Err(LedgerError::Unauthorized { caller });
        }
        if new_owner.is_zero() || new_owner == self.ledger {
            return Err(LedgerError::InvalidRecipient {
                recipient: new_owner,
            });
        }
        state.pending_owner = Some(new_owner);
        info!("[ledger] ownership proposed to {}", new_owner);
        Ok(())
    }

    /// Complete a handover. Only the pending owner may claim.
    pub fn claim_ownership(&self, caller: Address) -> Result<()> {
        let mut state = self.state.write();
        if state.pending_owner != Some(caller) {
            return Err(LedgerError::Unauthorized { caller });
        }
        let previous = state.owner;
        state.owner = caller;
        state.pending_owner = None;
        info!("[ledger] ownership claimed: {} -> {}", previous, caller);
        Ok(())
    }
}

impl AdminAuthority for ClaimableAdmin {
    fn is_admin(&self, caller: &Address) -> bool {
        self.state.read().owner == *caller
    }
}
