// crates/air-node/src/scheduler.rs
//
// Epoch scheduler for the AIR Protocol node.
//
// Advances the epoch counter on a fixed interval and funds each new
// epoch through the emissions controller. Funding is exactly-once per
// epoch id, so a replayed tick (e.g., after a restart with persisted
// state) surfaces as a benign AlreadyFunded rejection.

use std::time::Duration;

use air_core::AirError;

use crate::state::SharedProtocolState;

/// Scheduler that drives epoch funding on an interval.
pub struct EpochScheduler {
    /// Seconds between funding ticks.
    epoch_seconds: u64,
    /// The epoch to fund on the next tick (1-indexed).
    next_epoch: u64,
    state: SharedProtocolState,
}

impl EpochScheduler {
    /// Create a scheduler over the shared protocol state.
    pub fn new(epoch_seconds: u64, state: SharedProtocolState) -> Self {
        Self {
            epoch_seconds,
            next_epoch: 1,
            state,
        }
    }

    /// Run the scheduler loop until ctrl-c.
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        tracing::info!(
            "Epoch scheduler started (epoch_seconds={})",
            self.epoch_seconds
        );

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Epoch scheduler received shutdown signal");
                    break;
                }
                _ = tokio::time::sleep(Duration::from_secs(self.epoch_seconds)) => {
                    self.tick().await;
                }
            }
        }

        Ok(())
    }

    /// Fund the next epoch and advance the counter.
    ///
    /// The counter only advances once the epoch is known funded; a
    /// transient failure (e.g., an under-seeded treasury) leaves the
    /// epoch unfunded and retried on the next tick.
    pub async fn tick(&mut self) {
        let epoch_id = self.next_epoch;

        let mut guard = self.state.write().await;
        let state = &mut *guard;

        match state
            .controller
            .fund_epoch(&state.vault, &mut state.ledger, epoch_id)
        {
            Ok(amount) => {
                tracing::info!("EpochFunded: epoch {} funded with {} units", epoch_id, amount);
                self.next_epoch += 1;
            }
            Err(AirError::AlreadyFunded(_)) => {
                tracing::debug!("Epoch {} already funded, skipping", epoch_id);
                self.next_epoch += 1;
            }
            Err(e) => {
                tracing::error!("Failed to fund epoch {}: {}", epoch_id, e);
            }
        }
    }
}
