// crates/air-node/src/main.rs
//
// Binary entrypoint for the AIR Protocol node.
//
// Initializes tracing, parses CLI arguments, loads configuration,
// assembles the protocol state at genesis, and runs the epoch scheduler
// until shutdown.

mod config;
mod scheduler;
mod state;

use clap::Parser;

use config::NodeConfig;
use scheduler::EpochScheduler;
use state::ProtocolState;

/// AIR Protocol node — funds epochs on a schedule and serves the
/// distribution state.
#[derive(Parser, Debug)]
#[command(name = "air-node", version = "0.1.0", about = "AIR Protocol node daemon")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "air.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration from TOML file, falling back to defaults if the
    // file is not found.
    let node_config = match NodeConfig::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!(
                "Could not load config from {}: {}. Using defaults.",
                args.config, e
            );
            NodeConfig::default()
        }
    };

    // Initialize tracing subscriber for structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(node_config.log_level.clone())),
        )
        .init();

    tracing::info!("AIR Protocol node v0.1.0");
    tracing::info!("Epoch length: {}s", node_config.epoch_seconds);
    tracing::info!("Weekly emission: {} AIR", node_config.weekly_emission_air);
    tracing::info!("Treasury seed: {} AIR", node_config.treasury_seed_air);

    let state = ProtocolState::genesis(&node_config)?;
    tracing::info!("Genesis complete, owner {}", state.owner);
    tracing::info!("Treasury vault account {}", state.vault.account());
    tracing::info!("Distributor account {}", state.distributor.account());

    let shared = state.into_shared();
    let mut scheduler = EpochScheduler::new(node_config.epoch_seconds, shared);
    scheduler.run().await?;

    tracing::info!("AIR node shut down gracefully");
    Ok(())
}
