//! # Pause Gate
//!
//! Binary switch consulted by the transfer paths. Minting and administrative
//! operations ignore it.

use crate::errors::{LedgerError, Result};

/// Transfer gate. Pausing while paused (or unpausing while running) is an
/// accepted no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PauseGate {
    paused: bool,
}

impl PauseGate {
    /// New gate in the running state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether transfers are currently blocked.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Block transfers. Returns true if the state changed.
    pub fn pause(&mut self) -> bool {
        let changed = !self.paused;
        self.paused = true;
        changed
    }

    /// Allow transfers. Returns true if the state changed.
    pub fn unpause(&mut self) -> bool {
        let changed = self.paused;
        self.paused = false;
        changed
    }

    /// Fails with `ContractPaused` while paused.
    pub fn assert_not_paused(&self) -> Result<()> {
        if self.paused {
            return Err(LedgerError::ContractPaused);
        }
        Ok(())
    }
}
