//! # Value Objects
//!
//! Primitive values the ledger is expressed in: accounts, digests and
//! 256-bit amounts.

use serde::{Deserialize, Serialize};
use std::fmt;

pub use primitive_types::{U256, U512};

/// Largest representable amount (2^256 - 1).
///
/// Reserved as a sentinel: no stored balance may ever equal it.
pub const MAX_AMOUNT: U256 = U256::MAX;

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte account identifier.
///
/// Both holder accounts and ledger instances are addressed this way.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The null account (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address whose bytes are all `byte`. Handy for fixtures.
    #[must_use]
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; 20])
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 20 {
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the null account.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[18..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; 20] {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

// =============================================================================
// HASH (32 bytes)
// =============================================================================

/// A 32-byte Keccak-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// The zero hash.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates a hash from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 32]> for Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// AMOUNTS
// =============================================================================

/// Narrows a wide request amount into the 256-bit balance domain.
///
/// Returns `None` when the amount cannot be represented in 256 bits. Callers
/// on the mint and authorized-transfer paths treat `None` as a zero-value
/// operation rather than an error.
#[must_use]
pub fn narrow_amount(amount: U512) -> Option<U256> {
    U256::try_from(amount).ok()
}

/// Converts a balance-domain amount to the wide request domain.
#[must_use]
pub fn widen_amount(amount: U256) -> U512 {
    U512::from(amount)
}

/// Base units for `whole` tokens at `decimals` precision, or `None` when
/// that does not fit in 256 bits.
#[must_use]
pub fn checked_tokens(whole: u64, decimals: u8) -> Option<U256> {
    U256::from(10u8)
        .checked_pow(U256::from(decimals))
        .and_then(|scale| U256::from(whole).checked_mul(scale))
}

/// Base units for `whole` tokens at `decimals` precision. Saturates at
/// `MAX_AMOUNT`, which no ledger accepts as a balance or cap.
#[must_use]
pub fn tokens(whole: u64, decimals: u8) -> U256 {
    checked_tokens(whole, decimals).unwrap_or(MAX_AMOUNT)
}

// =============================================================================
// TESTS
// =============================================================================
