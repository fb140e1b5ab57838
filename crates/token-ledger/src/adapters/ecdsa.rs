//! ECDSA Authorization Adapter
//!
//! Implements `AuthorizationVerifier` with secp256k1 public-key recovery.
//! Accounts are the last 20 bytes of the Keccak-256 of the uncompressed
//! public key, as on Ethereum.

use crate::domain::authorization::{keccak256, AuthorizationArtifact};
use crate::domain::value_objects::{Address, Hash};
use crate::ports::outbound::AuthorizationVerifier;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use tracing::debug;

/// secp256k1 signature recovery.
#[derive(Debug, Default, Clone, Copy)]
pub struct EcdsaAuthorizationVerifier;

impl EcdsaAuthorizationVerifier {
    /// Create a verifier.
    pub fn new() -> Self {
        Self
    }
}

impl AuthorizationVerifier for EcdsaAuthorizationVerifier {
    fn recover_authorizer(
        &self,
        digest: &Hash,
        artifact: &AuthorizationArtifact,
    ) -> Option<Address> {
        let recovery_id = parse_recovery_id(artifact.v)?;

        let mut sig_bytes = [0u8; 64];
        sig_bytes[..32].copy_from_slice(&artifact.r);
        sig_bytes[32..].copy_from_slice(&artifact.s);
        let signature = Signature::from_slice(&sig_bytes).ok()?;

        match VerifyingKey::recover_from_prehash(digest.as_bytes(), &signature, recovery_id) {
            Ok(key) => Some(address_from_verifying_key(&key)),
            Err(_) => {
                debug!("[ledger] authorization recovery failed");
                None
            }
        }
    }
}

/// Account controlled by `key`.
pub fn address_from_verifying_key(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    // Skip the 0x04 SEC1 prefix.
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash.as_bytes()[12..]);
    Address(address)
}

/// Sign `digest` with `key`, producing an artifact `transfer_to` accepts.
///
/// Returns `None` if signing fails.
pub fn sign_authorization(key: &SigningKey, digest: &Hash) -> Option<AuthorizationArtifact> {
    let (signature, recovery_id) = key.sign_prehash_recoverable(digest.as_bytes()).ok()?;
    let bytes = signature.to_bytes();

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);

    Some(AuthorizationArtifact {
        r,
        s,
        v: recovery_id.to_byte() + 27,
    })
}

/// Valid v values: 0, 1, 27, 28.
fn parse_recovery_id(v: u8) -> Option<RecoveryId> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return None,
    };
    RecoveryId::try_from(id).ok()
}
