// crates/air-distribution/src/controller.rs
//
// Emissions controller: enforces the issuance schedule and guarantees
// each epoch is funded exactly once.
//
// `fund_epoch` is a pure exactly-once trigger over an external transfer:
// the funded-epoch set is the idempotency key space, and the vault pull
// either fully succeeds (funds moved, epoch marked, event appended) or
// fully fails (no state change at all).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use air_core::{AccountId, AirError, ProtocolEvent};
use air_ledger::TokenLedger;

use crate::emission::EmissionSchedule;
use crate::vault::TreasuryVault;

/// The emissions controller.
///
/// Holds the emission schedule, the account of the distributor it pays,
/// and the insertion-only set of epochs already funded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmissionsController {
    /// The controller's own account — the capability the vault checks.
    account: AccountId,
    /// The distributor account funded each epoch.
    distributor: AccountId,
    /// Per-epoch emission policy. Immutable after construction.
    schedule: EmissionSchedule,
    /// Epochs that have already been funded. Insertion-only.
    funded_epochs: BTreeSet<u64>,
    /// Observable event log; appended only on committed funding.
    events: Vec<ProtocolEvent>,
}

impl EmissionsController {
    /// Create a controller paying `distributor` per `schedule`.
    pub fn new(account: AccountId, distributor: AccountId, schedule: EmissionSchedule) -> Self {
        Self {
            account,
            distributor,
            schedule,
            funded_epochs: BTreeSet::new(),
            events: Vec::new(),
        }
    }

    /// The controller's own account.
    pub fn account(&self) -> AccountId {
        self.account
    }

    /// Whether the given epoch has been funded.
    pub fn is_funded(&self, epoch_id: u64) -> bool {
        self.funded_epochs.contains(&epoch_id)
    }

    /// The emission amount the schedule assigns to an epoch.
    pub fn amount_for_epoch(&self, epoch_id: u64) -> u64 {
        self.schedule.amount_for_epoch(epoch_id)
    }

    /// Fund an epoch: move the scheduled amount from the vault to the
    /// distributor and record the epoch as funded.
    ///
    /// Exactly-once per epoch id: a second call for the same id fails
    /// with `AlreadyFunded` and moves no funds. If the vault pull fails
    /// (authorization, insufficient balance), the epoch stays unfunded
    /// and the call can be retried after the cause is fixed — the
    /// funded-set insert and event append happen only after the
    /// transfer has committed.
    ///
    /// # Errors
    /// Returns `AirError::AlreadyFunded` for a repeat epoch id, or any
    /// error propagated from `TreasuryVault::pull_to`.
    pub fn fund_epoch(
        &mut self,
        vault: &TreasuryVault,
        ledger: &mut TokenLedger,
        epoch_id: u64,
    ) -> Result<u64, AirError> {
        if self.funded_epochs.contains(&epoch_id) {
            return Err(AirError::AlreadyFunded(epoch_id));
        }

        let amount = self.schedule.amount_for_epoch(epoch_id);
        vault.pull_to(&self.account, ledger, &self.distributor, amount)?;

        self.funded_epochs.insert(epoch_id);
        self.events
            .push(ProtocolEvent::EpochFunded { epoch_id, amount });
        Ok(amount)
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
