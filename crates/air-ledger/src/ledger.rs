// crates/air-ledger/src/ledger.rs
//
// The $AIR token ledger: account balances and delegated-transfer
// allowances.
//
// Transfers are atomic and all-or-nothing: a transfer that exceeds the
// sender's balance (or the spender's allowance) fails with no state
// change. Components own their metadata (funded epochs, merkle roots,
// claim flags) themselves; the ledger owns only balances and allowances.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use air_core::{AccountId, AirError};

/// The global $AIR token ledger.
///
/// Maps accounts to balances (in base units) and `(owner, spender)`
/// pairs to delegated-transfer allowances.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenLedger {
    balances: HashMap<AccountId, u64>,
    allowances: HashMap<(AccountId, AccountId), u64>,
    total_supply: u64,
}

impl TokenLedger {
    /// Create an empty ledger with zero supply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger with the full genesis supply minted to one account.
    pub fn with_genesis(account: AccountId, supply: u64) -> Self {
        let mut balances = HashMap::new();
        balances.insert(account, supply);
        Self {
            balances,
            allowances: HashMap::new(),
            total_supply: supply,
        }
    }

    /// Total minted supply (in base units).
    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// Get the balance of an account (0 for unknown accounts).
    pub fn balance_of(&self, account: &AccountId) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Transfer `amount` base units from `from` to `to`.
    ///
    /// Zero-amount transfers and transfers to self succeed.
    ///
    /// # Errors
    /// Returns `AirError::InsufficientBalance` if `from` holds less than
    /// `amount`. No state changes on failure.
    pub fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u64,
    ) -> Result<(), AirError> {
        let from_balance = self.balance_of(from);
        if amount > from_balance {
            return Err(AirError::InsufficientBalance {
                requested: amount,
                available: from_balance,
            });
        }

        self.balances.insert(*from, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.insert(*to, to_balance + amount);
        Ok(())
    }

    /// Approve `spender` to move up to `amount` base units from `owner`.
    ///
    /// Overwrites any previous approval for the same pair.
    pub fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: u64) {
        self.allowances.insert((*owner, *spender), amount);
    }

    /// Get the remaining allowance for a `(owner, spender)` pair.
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u64 {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    /// Delegated transfer: `spender` moves `amount` from `owner` to `to`.
    ///
    /// The allowance is checked and decremented before balances move;
    /// the whole call fails with no state change if either the allowance
    /// or the owner's balance is insufficient.
    ///
    /// # Errors
    /// Returns `AirError::InsufficientAllowance` if the pair's allowance
    /// is below `amount`, or `AirError::InsufficientBalance` if `owner`
    /// holds less than `amount`.
    pub fn transfer_from(
        &mut self,
        spender: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        amount: u64,
    ) -> Result<(), AirError> {
        let approved = self.allowance(owner, spender);
        if amount > approved {
            return Err(AirError::InsufficientAllowance {
                requested: amount,
                approved,
            });
        }

        // Check the balance before decrementing the allowance so a
        // balance failure leaves the approval intact.
        let owner_balance = self.balance_of(owner);
        if amount > owner_balance {
            return Err(AirError::InsufficientBalance {
                requested: amount,
                available: owner_balance,
            });
        }

        self.allowances.insert((*owner, *spender), approved - amount);
        self.balances.insert(*owner, owner_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.insert(*to, to_balance + amount);
        Ok(())
    }
}
