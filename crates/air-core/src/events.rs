// crates/air-core/src/events.rs
//
// Observable events emitted by protocol components.
//
// Components that emit events append them to an internal log which
// external indexers (and tests) can inspect or drain. The log is the
// protocol's equivalent of an event stream: an entry exists only for
// operations that fully committed.

use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::crypto::Hash32;

/// Events emitted by protocol components on successful state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolEvent {
    /// An epoch was funded: `amount` units moved from the treasury vault
    /// to the distributor.
    EpochFunded {
        /// The epoch that was funded.
        epoch_id: u64,
        /// Amount transferred, in base units.
        amount: u64,
    },
    /// A merkle root was committed for an epoch.
    MerkleRootSet {
        /// The epoch the root covers.
        epoch_id: u64,
        /// The committed 32-byte root.
        root: Hash32,
    },
    /// An allocation was claimed and paid out.
    Claimed {
        /// The epoch the allocation belongs to.
        epoch_id: u64,
        /// The recipient account.
        account: AccountId,
        /// Amount paid, in base units.
        amount: u64,
    },
}
