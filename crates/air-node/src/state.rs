// crates/air-node/src/state.rs
//
// ProtocolState: the wired-up protocol components behind a single lock.
//
// Constructed once at genesis in main.rs, then shared with the epoch
// scheduler (and any future RPC surface) as Arc<RwLock<ProtocolState>>.
// Every state-mutating operation runs to completion under the write
// lock, which gives the protocol its strictly serialized execution
// model: operations are totally ordered, and each either fully commits
// or fully fails.

use std::sync::Arc;

use tokio::sync::RwLock;

use air_core::{AccountId, AirError, Keypair};
use air_distribution::{EmissionSchedule, EmissionsController, MerkleDistributorEpoch, TreasuryVault};
use air_ledger::{TokenLedger, BASE_UNITS_PER_AIR};
use air_registry::ReportRegistry;
use air_staking::StakingLedger;

use crate::config::NodeConfig;

/// The assembled protocol state.
pub struct ProtocolState {
    /// Deployer/admin account (owns the vault and the distributor).
    pub owner: AccountId,
    pub ledger: TokenLedger,
    pub vault: TreasuryVault,
    pub controller: EmissionsController,
    pub distributor: MerkleDistributorEpoch,
    pub staking: StakingLedger,
    pub registry: ReportRegistry,
}

/// Shared handle to the protocol state.
pub type SharedProtocolState = Arc<RwLock<ProtocolState>>;

impl ProtocolState {
    /// Assemble the protocol at genesis from the node configuration.
    ///
    /// Generates fresh component accounts, mints the genesis supply to
    /// the owner, seeds the treasury vault, and grants the vault
    /// capability to the emissions controller.
    pub fn genesis(config: &NodeConfig) -> Result<Self, AirError> {
        let owner = Keypair::generate().account_id();
        let vault_account = Keypair::generate().account_id();
        let controller_account = Keypair::generate().account_id();
        let distributor_account = Keypair::generate().account_id();
        let staking_account = Keypair::generate().account_id();

        let mut ledger = TokenLedger::with_genesis(
            owner,
            config.genesis_supply_air * BASE_UNITS_PER_AIR,
        );

        let mut vault = TreasuryVault::new(vault_account, owner);
        let controller = EmissionsController::new(
            controller_account,
            distributor_account,
            EmissionSchedule::Fixed(config.weekly_emission_air * BASE_UNITS_PER_AIR),
        );
        let distributor = MerkleDistributorEpoch::new(distributor_account, owner);
        let staking = StakingLedger::new(
            staking_account,
            config.minimum_stake_air * BASE_UNITS_PER_AIR,
        );
        let registry = ReportRegistry::new(owner);

        // Grant the single withdrawal capability, then seed the vault.
        vault.set_emissions_controller(&owner, controller.account())?;
        ledger.transfer(
            &owner,
            &vault.account(),
            config.treasury_seed_air * BASE_UNITS_PER_AIR,
        )?;

        Ok(Self {
            owner,
            ledger,
            vault,
            controller,
            distributor,
            staking,
            registry,
        })
    }

    /// Wrap the state in its shared handle.
    pub fn into_shared(self) -> SharedProtocolState {
        Arc::new(RwLock::new(self))
    }
}
