// crates/air-node/src/config.rs
//
// Runtime configuration for the AIR Protocol node.
// Loaded from a TOML file or populated with sensible defaults.

use serde::Deserialize;
use std::fs;

/// Runtime configuration for the node.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    /// Seconds between epoch funding ticks. Production epochs are a
    /// week (604800); development deployments shrink this.
    #[serde(default = "default_epoch_seconds")]
    pub epoch_seconds: u64,

    /// Emission per epoch, in whole AIR.
    #[serde(default = "default_weekly_emission_air")]
    pub weekly_emission_air: u64,

    /// Genesis supply minted to the deployer, in whole AIR.
    #[serde(default = "default_genesis_supply_air")]
    pub genesis_supply_air: u64,

    /// Portion of genesis supply seeded into the treasury vault, in
    /// whole AIR.
    #[serde(default = "default_treasury_seed_air")]
    pub treasury_seed_air: u64,

    /// Minimum stake for eligibility, in whole AIR.
    #[serde(default = "default_minimum_stake_air")]
    pub minimum_stake_air: u64,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_epoch_seconds() -> u64 {
    604_800
}

fn default_weekly_emission_air() -> u64 {
    100_000
}

fn default_genesis_supply_air() -> u64 {
    100_000_000
}

fn default_treasury_seed_air() -> u64 {
    1_000_000
}

fn default_minimum_stake_air() -> u64 {
    500
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            epoch_seconds: default_epoch_seconds(),
            weekly_emission_air: default_weekly_emission_air(),
            genesis_supply_air: default_genesis_supply_air(),
            treasury_seed_air: default_treasury_seed_air(),
            minimum_stake_air: default_minimum_stake_air(),
            log_level: default_log_level(),
        }
    }
}

impl NodeConfig {
    /// Load configuration from a TOML file at the given path.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: NodeConfig = toml::from_str(&contents)?;
        Ok(config)
    }
}
