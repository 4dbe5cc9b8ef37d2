// crates/air-distribution/src/merkle.rs
//
// Merkle tree construction and proof verification over (account, amount)
// allocation leaves.
//
// Hashing rules (construction and verification share these functions, so
// the two sides cannot drift):
//   leaf = SHA-256(0x00 || account_bytes || amount_le_bytes)
//   node = SHA-256(0x01 || min(l, r) || max(l, r))
// The pair hash orders siblings byte-wise ascending, so a proof carries
// only the sibling digests with no left/right orientation bits. The
// 0x00/0x01 domain-separation prefixes keep a leaf from being
// reinterpreted as an interior node.

use sha2::{Digest, Sha256};

use air_core::{AccountId, AirError, Hash32};

const LEAF_PREFIX: u8 = 0x00;
const NODE_PREFIX: u8 = 0x01;

/// Hash an `(account, amount)` allocation leaf.
pub fn leaf_hash(account: &AccountId, amount: u64) -> Hash32 {
    let mut hasher = Sha256::new();
    hasher.update([LEAF_PREFIX]);
    hasher.update(account.as_bytes());
    hasher.update(amount.to_le_bytes());
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash an interior node from two child digests, smaller digest first.
pub fn node_hash(left: &Hash32, right: &Hash32) -> Hash32 {
    let (lo, hi) = if left <= right {
        (left, right)
    } else {
        (right, left)
    };
    let mut hasher = Sha256::new();
    hasher.update([NODE_PREFIX]);
    hasher.update(lo);
    hasher.update(hi);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Verify a merkle proof: fold the sibling path over the leaf digest and
/// compare the recomputed root against the expected one.
pub fn verify_proof(leaf: &Hash32, proof: &[Hash32], root: &Hash32) -> bool {
    let mut current = *leaf;
    for sibling in proof {
        current = node_hash(&current, sibling);
    }
    current == *root
}

/// A merkle tree over an epoch's allocation list.
///
/// Built off-line from the full `(account, amount)` list; only the root
/// goes on-ledger. `proof_for` produces the sibling path a claimant
/// submits alongside their allocation.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// levels[0] is the leaf level; the last level holds the single root.
    levels: Vec<Vec<Hash32>>,
    allocations: Vec<(AccountId, u64)>,
}

impl MerkleTree {
    /// Build a tree from an allocation list.
    ///
    /// Odd-length levels promote the lone trailing node unchanged to the
    /// next level.
    ///
    /// # Errors
    /// Returns `AirError::InvalidState` for an empty allocation list —
    /// there is no meaningful root to commit.
    pub fn build(allocations: &[(AccountId, u64)]) -> Result<Self, AirError> {
        if allocations.is_empty() {
            return Err(AirError::InvalidState(
                "cannot build a merkle tree over an empty allocation list".to_string(),
            ));
        }

        let leaves: Vec<Hash32> = allocations
            .iter()
            .map(|(account, amount)| leaf_hash(account, *amount))
            .collect();

        let mut levels = vec![leaves];
        while levels.last().map(|level| level.len()).unwrap_or(0) > 1 {
            let previous = levels.last().map(|level| level.as_slice()).unwrap_or(&[]);
            let mut next = Vec::with_capacity(previous.len().div_ceil(2));
            for pair in previous.chunks(2) {
                match pair {
                    [left, right] => next.push(node_hash(left, right)),
                    [lone] => next.push(*lone),
                    _ => unreachable!("chunks(2) yields 1- or 2-element slices"),
                }
            }
            levels.push(next);
        }

        Ok(Self {
            levels,
            allocations: allocations.to_vec(),
        })
    }

    /// The committed root of the tree.
    pub fn root(&self) -> Hash32 {
        // build() guarantees at least one level with exactly one node.
        self.levels[self.levels.len() - 1][0]
    }

    /// Number of allocation leaves.
    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    /// Whether the tree has no leaves. Always false for a built tree.
    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    /// Produce the sibling path proving `(account, amount)` is a leaf.
    ///
    /// # Errors
    /// Returns `AirError::NotFound` if the exact pair is not in the
    /// allocation list.
    pub fn proof_for(&self, account: &AccountId, amount: u64) -> Result<Vec<Hash32>, AirError> {
        let mut index = self
            .allocations
            .iter()
            .position(|(a, amt)| a == account && *amt == amount)
            .ok_or_else(|| {
                AirError::NotFound(format!(
                    "no allocation of {} units for {} in this tree",
                    amount, account
                ))
            })?;

        let mut proof = Vec::new();
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_index = index ^ 1;
            // A lone trailing node has no sibling at this level; it is
            // promoted unchanged, so the proof skips the level.
            if sibling_index < level.len() {
                proof.push(level[sibling_index]);
            }
            index /= 2;
        }
        Ok(proof)
    }
}
