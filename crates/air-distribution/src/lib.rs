// crates/air-distribution/src/lib.rs
//
// air-distribution: the epoch-based funding-and-claim subsystem of the
// AIR Protocol.
//
// Three components form the funding pipeline:
//   TreasuryVault        — custodian of protocol funds; only the single
//                          authorized emissions controller may withdraw.
//   EmissionsController  — computes each epoch's emission and funds the
//                          distributor exactly once per epoch.
//   MerkleDistributorEpoch — stores one write-once merkle root per epoch
//                          and pays out allocations against valid proofs,
//                          at most once per (epoch, account).
//
// Funds flow one direction: vault -> distributor -> claimants. Metadata
// (funded-epoch set, root map, claimed set) is owned solely by the
// component that writes it.

pub mod controller;
pub mod distributor;
pub mod emission;
pub mod merkle;
pub mod vault;

pub use controller::EmissionsController;
pub use distributor::MerkleDistributorEpoch;
pub use emission::EmissionSchedule;
pub use merkle::{leaf_hash, node_hash, verify_proof, MerkleTree};
pub use vault::TreasuryVault;
