// crates/air-core/src/error.rs

use thiserror::Error;

use crate::account::AccountId;

/// Protocol-wide error types for the AIR Protocol.
///
/// Every fallible operation fails totally: an error means no state was
/// mutated by the call that produced it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AirError {
    /// Caller lacks the required capability (vault withdrawal, admin setter).
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// The epoch has already been funded; funding is exactly-once per epoch.
    #[error("Epoch {0} has already been funded")]
    AlreadyFunded(u64),

    /// A merkle root already exists for the epoch; roots are write-once.
    #[error("Merkle root already set for epoch {0}")]
    RootAlreadySet(u64),

    /// The (epoch, account) allocation has already been paid out.
    #[error("Allocation already claimed for epoch {0} by {1}")]
    AlreadyClaimed(u64, AccountId),

    /// The merkle proof does not verify against the stored root.
    #[error("Invalid merkle proof: {0}")]
    InvalidProof(String),

    /// A ledger transfer exceeds the sender's balance.
    #[error("Insufficient balance: requested {requested} units but only {available} available")]
    InsufficientBalance { requested: u64, available: u64 },

    /// A delegated transfer exceeds the spender's allowance.
    #[error("Insufficient allowance: requested {requested} units but only {approved} approved")]
    InsufficientAllowance { requested: u64, approved: u64 },

    /// A content identifier was submitted to the report registry twice.
    #[error("CID already exists: {0}")]
    DuplicateCid(String),

    /// Invalid state transition.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AirError {
    fn from(e: serde_json::Error) -> Self {
        AirError::Serialization(e.to_string())
    }
}
