//! Ledger configuration from defaults or environment variables.

use crate::domain::value_objects::{checked_tokens, tokens, MAX_AMOUNT, U256};
use crate::errors::{LedgerError, Result};
use std::env;
use tracing::warn;

/// Default token precision.
pub const DEFAULT_DECIMALS: u8 = 9;

/// Default issuance cap in whole tokens.
pub const DEFAULT_TOTAL_WHOLE_TOKENS: u64 = 1_000_000_000;

/// Default bound on forwarding hops.
pub const DEFAULT_MAX_DELEGATION_DEPTH: u8 = 8;

/// Static parameters of a ledger instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Token name.
    pub name: String,

    /// Token symbol.
    pub symbol: String,

    /// Display precision.
    pub decimals: u8,

    /// Issuance cap (TOTAL_TOKENS) in base units.
    pub total_tokens: U256,

    /// Longest forwarding chain a call may traverse.
    pub max_delegation_depth: u8,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            name: "XBM Token".to_string(),
            symbol: "XBM".to_string(),
            decimals: DEFAULT_DECIMALS,
            total_tokens: tokens(DEFAULT_TOTAL_WHOLE_TOKENS, DEFAULT_DECIMALS),
            max_delegation_depth: DEFAULT_MAX_DELEGATION_DEPTH,
        }
    }
}

impl LedgerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LEDGER_TOKEN_NAME`: Token name (default: XBM Token)
    /// - `LEDGER_TOKEN_SYMBOL`: Token symbol (default: XBM)
    /// - `LEDGER_DECIMALS`: Precision (default: 9)
    /// - `LEDGER_TOTAL_TOKENS`: Issuance cap in base units, decimal
    ///   (default: 10^9 whole tokens at the configured precision)
    /// - `LEDGER_MAX_DELEGATION_DEPTH`: Forwarding hop limit (default: 8)
    ///
    /// Values that fail to parse fall back to their defaults. So does a
    /// precision at which the default cap would not fit in 256 bits.
    pub fn from_env() -> Self {
        let decimals = env::var("LEDGER_DECIMALS")
            .ok()
            .and_then(|v| v.trim().parse::<u8>().ok())
            .and_then(|d| {
                if checked_tokens(DEFAULT_TOTAL_WHOLE_TOKENS, d).is_some() {
                    Some(d)
                } else {
                    warn!(decimals = d, "[ledger] LEDGER_DECIMALS too large, using default");
                    None
                }
            })
            .unwrap_or(DEFAULT_DECIMALS);

        Self {
            name: env::var("LEDGER_TOKEN_NAME").unwrap_or_else(|_| "XBM Token".to_string()),

            symbol: env::var("LEDGER_TOKEN_SYMBOL").unwrap_or_else(|_| "XBM".to_string()),

            decimals,

            total_tokens: env::var("LEDGER_TOTAL_TOKENS")
                .ok()
                .and_then(|v| U256::from_dec_str(v.trim()).ok())
                .unwrap_or_else(|| tokens(DEFAULT_TOTAL_WHOLE_TOKENS, decimals)),

            max_delegation_depth: env::var("LEDGER_MAX_DELEGATION_DEPTH")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_MAX_DELEGATION_DEPTH),
        }
    }

    /// Override the issuance cap.
    #[must_use]
    pub fn with_total_tokens(mut self, total_tokens: U256) -> Self {
        self.total_tokens = total_tokens;
        self
    }

    /// Override the forwarding hop limit.
    #[must_use]
    pub fn with_max_delegation_depth(mut self, depth: u8) -> Self {
        self.max_delegation_depth = depth;
        self
    }

    /// Reject configurations the ledger cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.total_tokens.is_zero() {
            return Err(LedgerError::InvalidConfig(
                "total_tokens must be positive".to_string(),
            ));
        }
        if self.total_tokens >= MAX_AMOUNT {
            return Err(LedgerError::InvalidConfig(
                "total_tokens must stay below the reserved maximum".to_string(),
            ));
        }
        if checked_tokens(1, self.decimals).is_none() {
            return Err(LedgerError::InvalidConfig(format!(
                "decimals {} exceeds the 256-bit range",
                self.decimals
            )));
        }
        if self.max_delegation_depth == 0 {
            return Err(LedgerError::InvalidConfig(
                "max_delegation_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
