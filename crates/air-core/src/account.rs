// crates/air-core/src/account.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crypto::hash_bytes;

/// A protocol account identifier.
///
/// Accounts are 32-byte values derived from ed25519 public keys
/// (SHA-256 of the key bytes). Every balance holder on the Token Ledger —
/// users, the treasury vault, the emissions controller, the distributor,
/// the staking ledger — is addressed by an `AccountId`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// Construct an account id from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Derive an account id from an ed25519 public key.
    ///
    /// The id is the SHA-256 hash of the 32-byte public key, so account
    /// identity does not reveal the key itself.
    pub fn from_public_key(public_key_bytes: &[u8; 32]) -> Self {
        Self(hash_bytes(public_key_bytes))
    }

    /// Get the raw bytes of the account id.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
