// crates/air-distribution/src/emission.rs
//
// Emission schedule: the policy function mapping an epoch id to the
// amount issued for that epoch.
//
// The reference deployment uses a fixed weekly emission. A halving
// schedule is provided as the decay-curve variant; swapping schedules
// does not change the exactly-once funding contract, which is keyed on
// the epoch id alone.

use serde::{Deserialize, Serialize};

/// Number of halvings after which the emission is treated as zero.
/// A u64 amount shifted right 64 times underflows to nothing.
const MAX_HALVINGS: u64 = 64;

/// Policy function for per-epoch emission amounts (in base units).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmissionSchedule {
    /// The same amount is issued every epoch.
    Fixed(u64),
    /// The amount halves every `interval_epochs` epochs:
    ///   amount = initial / 2^(epoch_id / interval_epochs)
    Halving { initial: u64, interval_epochs: u64 },
}

impl EmissionSchedule {
    /// Compute the emission amount (in base units) for a given epoch.
    pub fn amount_for_epoch(&self, epoch_id: u64) -> u64 {
        match self {
            EmissionSchedule::Fixed(amount) => *amount,
            EmissionSchedule::Halving {
                initial,
                interval_epochs,
            } => {
                if *interval_epochs == 0 {
                    return *initial;
                }
                let halving_number = epoch_id / interval_epochs;
                if halving_number >= MAX_HALVINGS {
                    return 0;
                }
                initial >> halving_number
            }
        }
    }
}
