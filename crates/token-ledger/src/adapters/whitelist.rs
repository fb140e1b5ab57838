//! Whitelist Adapter
//!
//! In-memory allow-list administered through an `AdminAuthority`.

use crate::domain::value_objects::Address;
use crate::errors::{LedgerError, Result};
use crate::ports::outbound::{AdminAuthority, Whitelist};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// Admin-managed set of whitelisted accounts.
pub struct InMemoryWhitelist {
    admin: Arc<dyn AdminAuthority>,
    members: RwLock<HashSet<Address>>,
}

impl InMemoryWhitelist {
    /// Empty whitelist managed by `admin`.
    pub fn new(admin: Arc<dyn AdminAuthority>) -> Self {
        Self {
            admin,
            members: RwLock::new(HashSet::new()),
        }
    }

    /// Add `account`. Returns false if it was already present.
    pub fn add_address(&self, caller: Address, account: Address) -> Result<bool> {
        self.ensure_admin(caller)?;
        let added = self.members.write().insert(account);
        if added {
            info!("[ledger] whitelisted {}", account);
        }
        Ok(added)
    }

    /// Add every account in `accounts`, returning how many were new.
    pub fn add_addresses(&self, caller: Address, accounts: &[Address]) -> Result<usize> {
        self.ensure_admin(caller)?;
        let mut members = self.members.write();
        Ok(accounts
            .iter()
            .filter(|account| members.insert(**account))
            .count())
    }

    /// Remove `account`. Returns false if it was not present.
    pub fn remove_address(&self, caller: Address, account: Address) -> Result<bool> {
        self.ensure_admin(caller)?;
        let removed = self.members.write().remove(&account);
        if removed {
            info!("[ledger] removed {} from whitelist", account);
        }
        Ok(removed)
    }

    /// Number of whitelisted accounts.
    pub fn len(&self) -> usize {
        self.members.read().len()
    }

    /// True when nobody is whitelisted.
    pub fn is_empty(&self) -> bool {
        self.members.read().is_empty()
    }

    fn ensure_admin(&self, caller: Address) -> Result<()> {
        if self.admin.is_admin(&caller) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized { caller })
        }
    }
}

impl Whitelist for InMemoryWhitelist {
    fn is_whitelisted(&self, account: &Address) -> bool {
        self.members.read().contains(account)
    }
}
