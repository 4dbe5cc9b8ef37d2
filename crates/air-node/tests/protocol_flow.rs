// crates/air-node/tests/protocol_flow.rs
//
// End-to-end integration tests for the AIR Protocol: deploy the ledger
// and components, wire the permissions, then exercise the funding,
// distribution, staking, and registry flows.
//
// These tests use the public APIs of the underlying library crates
// directly (air-ledger, air-distribution, air-staking, air-registry)
// since the node is a binary crate with no lib.rs.

use air_core::{hash_bytes, AccountId, AirError, Keypair, ProtocolEvent};
use air_distribution::{
    EmissionSchedule, EmissionsController, MerkleDistributorEpoch, MerkleTree, TreasuryVault,
};
use air_ledger::{TokenLedger, BASE_UNITS_PER_AIR};
use air_registry::ReportRegistry;
use air_staking::StakingLedger;

const INITIAL_WEEKLY_EMISSION: u64 = 100_000 * BASE_UNITS_PER_AIR;

/// A deployed protocol instance, wired the way genesis wires it.
struct Deployment {
    owner: AccountId,
    user1: AccountId,
    ledger: TokenLedger,
    vault: TreasuryVault,
    controller: EmissionsController,
    distributor: MerkleDistributorEpoch,
}

/// Deploy the ledger and the core triad, grant the vault capability to
/// the controller, and seed the treasury with 1,000,000 AIR.
fn deploy() -> Deployment {
    let owner = Keypair::generate().account_id();
    let user1 = Keypair::generate().account_id();
    let vault_account = Keypair::generate().account_id();
    let controller_account = Keypair::generate().account_id();
    let distributor_account = Keypair::generate().account_id();

    let mut ledger = TokenLedger::with_genesis(owner, 10_000_000 * BASE_UNITS_PER_AIR);

    let mut vault = TreasuryVault::new(vault_account, owner);
    let controller = EmissionsController::new(
        controller_account,
        distributor_account,
        EmissionSchedule::Fixed(INITIAL_WEEKLY_EMISSION),
    );
    let distributor = MerkleDistributorEpoch::new(distributor_account, owner);

    vault
        .set_emissions_controller(&owner, controller.account())
        .unwrap();
    ledger
        .transfer(&owner, &vault.account(), 1_000_000 * BASE_UNITS_PER_AIR)
        .unwrap();

    Deployment {
        owner,
        user1,
        ledger,
        vault,
        controller,
        distributor,
    }
}

// ---------------------------------------------------------------------------
// Treasury & emissions flow
// ---------------------------------------------------------------------------

#[test]
fn test_fund_epoch_moves_emission_and_emits_event() {
    let mut d = deploy();
    let epoch_id = 1;

    d.controller
        .fund_epoch(&d.vault, &mut d.ledger, epoch_id)
        .unwrap();

    // Treasury balance decreased and distributor increased
    assert_eq!(
        d.ledger.balance_of(&d.distributor.account()),
        INITIAL_WEEKLY_EMISSION
    );
    assert_eq!(
        d.ledger.balance_of(&d.vault.account()),
        1_000_000 * BASE_UNITS_PER_AIR - INITIAL_WEEKLY_EMISSION
    );
    assert_eq!(
        d.controller.events(),
        &[ProtocolEvent::EpochFunded {
            epoch_id,
            amount: INITIAL_WEEKLY_EMISSION
        }]
    );
}

#[test]
fn test_funding_same_epoch_twice_reverts() {
    let mut d = deploy();
    d.controller.fund_epoch(&d.vault, &mut d.ledger, 1).unwrap();

    let result = d.controller.fund_epoch(&d.vault, &mut d.ledger, 1);
    assert_eq!(result, Err(AirError::AlreadyFunded(1)));

    // Balances unchanged by the rejected call
    assert_eq!(
        d.ledger.balance_of(&d.distributor.account()),
        INITIAL_WEEKLY_EMISSION
    );
}

#[test]
fn test_only_emissions_controller_pulls_from_treasury() {
    let mut d = deploy();
    let result = d
        .vault
        .pull_to(&d.user1, &mut d.ledger, &d.user1, 100);
    assert!(matches!(result, Err(AirError::NotAuthorized(_))));

    // The owner itself is not the capability holder either
    let owner = d.owner;
    let result = d.vault.pull_to(&owner, &mut d.ledger, &d.user1, 100);
    assert!(matches!(result, Err(AirError::NotAuthorized(_))));
}

// ---------------------------------------------------------------------------
// Merkle distribution
// ---------------------------------------------------------------------------

#[test]
fn test_owner_sets_merkle_root_once() {
    let mut d = deploy();
    let root = hash_bytes(b"root1");
    let owner = d.owner;

    d.distributor.set_merkle_root(&owner, 1, root).unwrap();
    assert_eq!(d.distributor.merkle_root(1), Some(root));

    let result = d.distributor.set_merkle_root(&owner, 1, root);
    assert_eq!(result, Err(AirError::RootAlreadySet(1)));
}

#[test]
fn test_funded_epoch_pays_proven_claims() {
    let mut d = deploy();
    let owner = d.owner;
    let user2 = Keypair::generate().account_id();

    // Fund epoch 1, commit the allocation tree for it
    d.controller.fund_epoch(&d.vault, &mut d.ledger, 1).unwrap();
    let allocations = vec![
        (d.user1, 60_000 * BASE_UNITS_PER_AIR),
        (user2, 40_000 * BASE_UNITS_PER_AIR),
    ];
    let tree = MerkleTree::build(&allocations).unwrap();
    d.distributor
        .set_merkle_root(&owner, 1, tree.root())
        .unwrap();

    // Both recipients claim their allotted share exactly once
    let proof = tree.proof_for(&d.user1, 60_000 * BASE_UNITS_PER_AIR).unwrap();
    d.distributor
        .claim(&mut d.ledger, 1, &d.user1, 60_000 * BASE_UNITS_PER_AIR, &proof)
        .unwrap();
    let proof2 = tree.proof_for(&user2, 40_000 * BASE_UNITS_PER_AIR).unwrap();
    d.distributor
        .claim(&mut d.ledger, 1, &user2, 40_000 * BASE_UNITS_PER_AIR, &proof2)
        .unwrap();

    assert_eq!(d.ledger.balance_of(&d.user1), 60_000 * BASE_UNITS_PER_AIR);
    assert_eq!(d.ledger.balance_of(&user2), 40_000 * BASE_UNITS_PER_AIR);
    assert_eq!(d.ledger.balance_of(&d.distributor.account()), 0);

    // Double-claim and forged-amount claims are rejected
    let result = d.distributor.claim(
        &mut d.ledger,
        1,
        &d.user1,
        60_000 * BASE_UNITS_PER_AIR,
        &proof,
    );
    assert!(matches!(result, Err(AirError::AlreadyClaimed(1, _))));
    let result = d.distributor.claim(
        &mut d.ledger,
        1,
        &user2,
        99_000 * BASE_UNITS_PER_AIR,
        &proof2,
    );
    assert!(matches!(result, Err(AirError::InvalidProof(_))));
}

// ---------------------------------------------------------------------------
// Staking logic
// ---------------------------------------------------------------------------

#[test]
fn test_eligibility_tracks_minimum_stake() {
    let mut d = deploy();
    let staking_account = Keypair::generate().account_id();
    let mut staking = StakingLedger::new(staking_account, 500 * BASE_UNITS_PER_AIR);

    // Give user1 some tokens and approve the staking ledger
    d.ledger
        .transfer(&d.owner, &d.user1, 1_000 * BASE_UNITS_PER_AIR)
        .unwrap();
    d.ledger
        .approve(&d.user1, &staking_account, 1_000 * BASE_UNITS_PER_AIR);

    staking
        .stake(&mut d.ledger, &d.user1, 400 * BASE_UNITS_PER_AIR)
        .unwrap();
    assert!(!staking.is_eligible(&d.user1));

    staking
        .stake(&mut d.ledger, &d.user1, 100 * BASE_UNITS_PER_AIR)
        .unwrap();
    assert!(staking.is_eligible(&d.user1));
}

#[test]
fn test_unstaking_updates_total_staked() {
    let mut d = deploy();
    let staking_account = Keypair::generate().account_id();
    let mut staking = StakingLedger::new(staking_account, 500 * BASE_UNITS_PER_AIR);

    d.ledger
        .transfer(&d.owner, &d.user1, 1_000 * BASE_UNITS_PER_AIR)
        .unwrap();
    d.ledger
        .approve(&d.user1, &staking_account, 1_000 * BASE_UNITS_PER_AIR);

    let amount = 500 * BASE_UNITS_PER_AIR;
    staking.stake(&mut d.ledger, &d.user1, amount).unwrap();
    staking.unstake(&mut d.ledger, &d.user1, amount).unwrap();
    assert_eq!(staking.total_staked(), 0);
    assert_eq!(d.ledger.balance_of(&d.user1), 1_000 * BASE_UNITS_PER_AIR);
}

// ---------------------------------------------------------------------------
// Report registry
// ---------------------------------------------------------------------------

#[test]
fn test_registry_rejects_duplicate_cids() {
    let d = deploy();
    let mut registry = ReportRegistry::new(d.owner);
    let cid = "QmTest123";

    registry.register_report(&d.user1, cid).unwrap();
    assert_eq!(registry.report_count(), 1);

    let result = registry.register_report(&d.user1, cid);
    assert_eq!(result, Err(AirError::DuplicateCid(cid.to_string())));
    assert_eq!(registry.report_count(), 1);
}
