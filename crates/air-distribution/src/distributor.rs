// crates/air-distribution/src/distributor.rs
//
// Per-epoch merkle distributor: commitment store and claim processor.
//
// One write-once merkle root per epoch commits an off-line-computed
// allocation list. Claims submit the (account, amount) leaf plus a
// sibling path; a valid, not-yet-claimed allocation is paid from the
// distributor's ledger balance (funded by the emissions controller) and
// marked claimed. The per-(epoch, account) state machine is one-way:
// unclaimed -> claimed, no reversal.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use air_core::{AccountId, AirError, Hash32, ProtocolEvent};
use air_ledger::TokenLedger;

use crate::merkle::{leaf_hash, verify_proof};

/// The per-epoch merkle distributor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerkleDistributorEpoch {
    /// The distributor's ledger account (holds funded emissions).
    account: AccountId,
    /// Administrative account; may commit roots.
    owner: AccountId,
    /// Epoch id -> committed root. Each key is written exactly once.
    merkle_roots: BTreeMap<u64, Hash32>,
    /// Allocations already paid out.
    claimed: BTreeSet<(u64, AccountId)>,
    /// Observable event log; appended only on committed operations.
    events: Vec<ProtocolEvent>,
}

impl MerkleDistributorEpoch {
    /// Create a distributor with the given ledger account and owner.
    pub fn new(account: AccountId, owner: AccountId) -> Self {
        Self {
            account,
            owner,
            merkle_roots: BTreeMap::new(),
            claimed: BTreeSet::new(),
            events: Vec::new(),
        }
    }

    /// The distributor's ledger account.
    pub fn account(&self) -> AccountId {
        self.account
    }

    /// The committed root for an epoch, if one has been set.
    pub fn merkle_root(&self, epoch_id: u64) -> Option<Hash32> {
        self.merkle_roots.get(&epoch_id).copied()
    }

    /// Whether `(epoch_id, account)` has already been paid.
    pub fn is_claimed(&self, epoch_id: u64, account: &AccountId) -> bool {
        self.claimed.contains(&(epoch_id, *account))
    }

    /// Commit the merkle root for an epoch. Owner-only, write-once.
    ///
    /// The root is an opaque 32-byte commitment; no well-formedness
    /// validation happens here — tree construction is an off-line
    /// concern.
    ///
    /// # Errors
    /// Returns `AirError::NotAuthorized` if `caller` is not the owner.
    /// Returns `AirError::RootAlreadySet` if a root exists for the
    /// epoch, including when the submitted root is identical.
    pub fn set_merkle_root(
        &mut self,
        caller: &AccountId,
        epoch_id: u64,
        root: Hash32,
    ) -> Result<(), AirError> {
        if *caller != self.owner {
            return Err(AirError::NotAuthorized(format!(
                "only the distributor owner may set merkle roots, caller was {}",
                caller
            )));
        }
        if self.merkle_roots.contains_key(&epoch_id) {
            return Err(AirError::RootAlreadySet(epoch_id));
        }
        self.merkle_roots.insert(epoch_id, root);
        self.events
            .push(ProtocolEvent::MerkleRootSet { epoch_id, root });
        Ok(())
    }

    /// Claim an allocation: verify the proof against the epoch's root
    /// and pay `amount` to `account` exactly once.
    ///
    /// Check order: root existence, double-claim, proof validity, then
    /// the ledger transfer. The claimed-mark and event are recorded only
    /// after the transfer commits, so a failed payout (insufficient
    /// distributor balance) leaves the allocation claimable.
    ///
    /// # Errors
    /// Returns `AirError::NotFound` if no root is set for the epoch,
    /// `AirError::AlreadyClaimed` for a repeat claim,
    /// `AirError::InvalidProof` if the sibling path does not recompute
    /// the committed root, or `AirError::InsufficientBalance` from the
    /// ledger transfer.
    pub fn claim(
        &mut self,
        ledger: &mut TokenLedger,
        epoch_id: u64,
        account: &AccountId,
        amount: u64,
        proof: &[Hash32],
    ) -> Result<(), AirError> {
        let root = self.merkle_roots.get(&epoch_id).ok_or_else(|| {
            AirError::NotFound(format!("no merkle root set for epoch {}", epoch_id))
        })?;

        if self.claimed.contains(&(epoch_id, *account)) {
            return Err(AirError::AlreadyClaimed(epoch_id, *account));
        }

        let leaf = leaf_hash(account, amount);
        if !verify_proof(&leaf, proof, root) {
            return Err(AirError::InvalidProof(format!(
                "proof does not verify allocation of {} units for {} against epoch {}",
                amount, account, epoch_id
            )));
        }

        ledger.transfer(&self.account, account, amount)?;

        self.claimed.insert((epoch_id, *account));
        self.events.push(ProtocolEvent::Claimed {
            epoch_id,
            account: *account,
            amount,
        });
        Ok(())
    }

    /// Events emitted so far (oldest first).
    pub fn events(&self) -> &[ProtocolEvent] {
        &self.events
    }

    /// Drain the event log, handing the events to an external indexer.
    pub fn drain_events(&mut self) -> Vec<ProtocolEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkle::MerkleTree;
    use air_core::hash_bytes;

    fn account(seed: u8) -> AccountId {
        AccountId::from_bytes([seed; 32])
    }

    /// Distributor account 1, owner 2.
    fn make_distributor() -> MerkleDistributorEpoch {
        MerkleDistributorEpoch::new(account(1), account(2))
    }

    #[test]
    fn test_set_merkle_root_once() {
        let mut distributor = make_distributor();
        let root = hash_bytes(b"root1");
        distributor.set_merkle_root(&account(2), 1, root).unwrap();
        assert_eq!(distributor.merkle_root(1), Some(root));
    }

    #[test]
    fn test_set_merkle_root_twice_fails() {
        let mut distributor = make_distributor();
        let root = hash_bytes(b"root1");
        distributor.set_merkle_root(&account(2), 1, root).unwrap();

        // Re-setting fails even with the identical root
        assert_eq!(
            distributor.set_merkle_root(&account(2), 1, root),
            Err(AirError::RootAlreadySet(1))
        );
        let other = hash_bytes(b"root2");
        assert_eq!(
            distributor.set_merkle_root(&account(2), 1, other),
            Err(AirError::RootAlreadySet(1))
        );
        assert_eq!(distributor.merkle_root(1), Some(root));
    }

    #[test]
    fn test_set_merkle_root_not_owner() {
        let mut distributor = make_distributor();
        let result = distributor.set_merkle_root(&account(9), 1, hash_bytes(b"root1"));
        assert!(matches!(result, Err(AirError::NotAuthorized(_))));
        assert_eq!(distributor.merkle_root(1), None);
    }

    #[test]
    fn test_roots_per_epoch_are_independent() {
        let mut distributor = make_distributor();
        distributor
            .set_merkle_root(&account(2), 1, hash_bytes(b"root1"))
            .unwrap();
        distributor
            .set_merkle_root(&account(2), 2, hash_bytes(b"root2"))
            .unwrap();
        assert_eq!(distributor.merkle_root(1), Some(hash_bytes(b"root1")));
        assert_eq!(distributor.merkle_root(2), Some(hash_bytes(b"root2")));
    }

    #[test]
    fn test_claim_pays_exactly_once() {
        let allocations = vec![(account(5), 300u64), (account(6), 700u64)];
        let tree = MerkleTree::build(&allocations).unwrap();

        let mut distributor = make_distributor();
        distributor
            .set_merkle_root(&account(2), 1, tree.root())
            .unwrap();
        let mut ledger = TokenLedger::with_genesis(account(1), 1_000);

        let proof = tree.proof_for(&account(5), 300).unwrap();
        distributor
            .claim(&mut ledger, 1, &account(5), 300, &proof)
            .unwrap();
        assert_eq!(ledger.balance_of(&account(5)), 300);
        assert!(distributor.is_claimed(1, &account(5)));

        // Second claim for the same pair fails, balances unchanged
        let result = distributor.claim(&mut ledger, 1, &account(5), 300, &proof);
        assert_eq!(result, Err(AirError::AlreadyClaimed(1, account(5))));
        assert_eq!(ledger.balance_of(&account(5)), 300);

        // Other leaf still claimable
        let proof = tree.proof_for(&account(6), 700).unwrap();
        distributor
            .claim(&mut ledger, 1, &account(6), 700, &proof)
            .unwrap();
        assert_eq!(ledger.balance_of(&account(1)), 0);
    }

    #[test]
    fn test_claim_invalid_proof() {
        let allocations = vec![(account(5), 300u64), (account(6), 700u64)];
        let tree = MerkleTree::build(&allocations).unwrap();

        let mut distributor = make_distributor();
        distributor
            .set_merkle_root(&account(2), 1, tree.root())
            .unwrap();
        let mut ledger = TokenLedger::with_genesis(account(1), 1_000);

        // Valid proof, inflated amount
        let proof = tree.proof_for(&account(5), 300).unwrap();
        let result = distributor.claim(&mut ledger, 1, &account(5), 999, &proof);
        assert!(matches!(result, Err(AirError::InvalidProof(_))));

        // Pair not in the tree at all
        let result = distributor.claim(&mut ledger, 1, &account(9), 300, &proof);
        assert!(matches!(result, Err(AirError::InvalidProof(_))));

        assert_eq!(ledger.balance_of(&account(1)), 1_000);
        assert!(!distributor.is_claimed(1, &account(5)));
    }

    #[test]
    fn test_claim_without_root() {
        let mut distributor = make_distributor();
        let mut ledger = TokenLedger::with_genesis(account(1), 1_000);
        let result = distributor.claim(&mut ledger, 1, &account(5), 300, &[]);
        assert!(matches!(result, Err(AirError::NotFound(_))));
    }

    #[test]
    fn test_failed_payout_leaves_allocation_claimable() {
        let allocations = vec![(account(5), 300u64)];
        let tree = MerkleTree::build(&allocations).unwrap();

        let mut distributor = make_distributor();
        distributor
            .set_merkle_root(&account(2), 1, tree.root())
            .unwrap();

        // Distributor was never funded
        let mut ledger = TokenLedger::new();
        let proof = tree.proof_for(&account(5), 300).unwrap();
        let result = distributor.claim(&mut ledger, 1, &account(5), 300, &proof);
        assert!(matches!(
            result,
            Err(AirError::InsufficientBalance { .. })
        ));
        assert!(!distributor.is_claimed(1, &account(5)));

        // After funding, the same claim succeeds
        let mut funded = TokenLedger::with_genesis(account(1), 300);
        distributor
            .claim(&mut funded, 1, &account(5), 300, &proof)
            .unwrap();
        assert!(distributor.is_claimed(1, &account(5)));
    }

    #[test]
    fn test_same_account_across_epochs() {
        let allocations = vec![(account(5), 300u64), (account(6), 700u64)];
        let tree = MerkleTree::build(&allocations).unwrap();

        let mut distributor = make_distributor();
        distributor
            .set_merkle_root(&account(2), 1, tree.root())
            .unwrap();
        distributor
            .set_merkle_root(&account(2), 2, tree.root())
            .unwrap();
        let mut ledger = TokenLedger::with_genesis(account(1), 1_000);

        let proof = tree.proof_for(&account(5), 300).unwrap();
        distributor
            .claim(&mut ledger, 1, &account(5), 300, &proof)
            .unwrap();
        // The same allocation under a different epoch's root is a
        // distinct idempotency key.
        distributor
            .claim(&mut ledger, 2, &account(5), 300, &proof)
            .unwrap();
        assert_eq!(ledger.balance_of(&account(5)), 600);
    }

    #[test]
    fn test_events_record_committed_operations() {
        let allocations = vec![(account(5), 300u64)];
        let tree = MerkleTree::build(&allocations).unwrap();

        let mut distributor = make_distributor();
        distributor
            .set_merkle_root(&account(2), 1, tree.root())
            .unwrap();
        let mut ledger = TokenLedger::with_genesis(account(1), 300);
        let proof = tree.proof_for(&account(5), 300).unwrap();
        distributor
            .claim(&mut ledger, 1, &account(5), 300, &proof)
            .unwrap();

        assert_eq!(
            distributor.events(),
            &[
                ProtocolEvent::MerkleRootSet {
                    epoch_id: 1,
                    root: tree.root()
                },
                ProtocolEvent::Claimed {
                    epoch_id: 1,
                    account: account(5),
                    amount: 300
                },
            ]
        );
    }
}
