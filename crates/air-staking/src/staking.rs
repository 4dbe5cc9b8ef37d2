// crates/air-staking/src/staking.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use air_core::{AccountId, AirError};
use air_ledger::TokenLedger;

/// The staking ledger.
///
/// Stakers pull funds in via a delegated transfer (the staker must have
/// approved the staking account as spender on the Token Ledger) and get
/// them back on unstake. The ledger tracks each staker's net stake and
/// the running total across all stakers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakingLedger {
    /// The staking ledger's own account (holds all staked funds).
    account: AccountId,
    /// Minimum net stake (in base units) for eligibility.
    minimum_stake: u64,
    /// Net stake per staker. Entries are removed when they reach zero.
    stakes: HashMap<AccountId, u64>,
    /// Sum of all net stakes; always equals the stakes map total.
    total_staked: u64,
}

impl StakingLedger {
    /// Create a staking ledger with the given account and eligibility
    /// threshold (in base units).
    pub fn new(account: AccountId, minimum_stake: u64) -> Self {
        Self {
            account,
            minimum_stake,
            stakes: HashMap::new(),
            total_staked: 0,
        }
    }

    /// The staking ledger's own account.
    pub fn account(&self) -> AccountId {
        self.account
    }

    /// The configured eligibility threshold (in base units).
    pub fn minimum_stake(&self) -> u64 {
        self.minimum_stake
    }

    /// Stake `amount` base units from `staker`.
    ///
    /// Pulls the funds through the Token Ledger's delegated transfer, so
    /// the staker must have approved this ledger's account as a spender
    /// first. The pull is all-or-nothing; a failed transfer changes no
    /// stake bookkeeping.
    ///
    /// # Errors
    /// Returns `AirError::InvalidState` for a zero amount, or the
    /// allowance/balance errors propagated from the Token Ledger.
    pub fn stake(
        &mut self,
        ledger: &mut TokenLedger,
        staker: &AccountId,
        amount: u64,
    ) -> Result<(), AirError> {
        if amount == 0 {
            return Err(AirError::InvalidState(
                "cannot stake a zero amount".to_string(),
            ));
        }

        ledger.transfer_from(&self.account, staker, &self.account, amount)?;

        *self.stakes.entry(*staker).or_insert(0) += amount;
        self.total_staked += amount;
        Ok(())
    }

    /// Unstake `amount` base units back to `staker`.
    ///
    /// # Errors
    /// Returns `AirError::InsufficientBalance` if the staker's net stake
    /// is below `amount`. No state changes on failure.
    pub fn unstake(
        &mut self,
        ledger: &mut TokenLedger,
        staker: &AccountId,
        amount: u64,
    ) -> Result<(), AirError> {
        let staked = self.balance_staked(staker);
        if amount > staked {
            return Err(AirError::InsufficientBalance {
                requested: amount,
                available: staked,
            });
        }

        ledger.transfer(&self.account, staker, amount)?;

        if staked == amount {
            self.stakes.remove(staker);
        } else {
            self.stakes.insert(*staker, staked - amount);
        }
        self.total_staked -= amount;
        Ok(())
    }

    /// The net stake of an account (0 for accounts that never staked).
    pub fn balance_staked(&self, staker: &AccountId) -> u64 {
        self.stakes.get(staker).copied().unwrap_or(0)
    }

    /// Sum of all net stakes.
    pub fn total_staked(&self) -> u64 {
        self.total_staked
    }

    /// Whether an account's net stake meets the minimum threshold.
    pub fn is_eligible(&self, staker: &AccountId) -> bool {
        self.balance_staked(staker) >= self.minimum_stake
    }
}
