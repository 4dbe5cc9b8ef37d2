// crates/air-distribution/src/vault.rs
//
// Treasury vault for the AIR Protocol.
//
// The vault is the sole custodian of protocol funds, held on the Token
// Ledger under its own account. Outbound transfers are gated by a single
// capability: only the account registered once as the emissions
// controller may call `pull_to`. Every other caller is rejected with an
// authorization error regardless of amount or destination.

use serde::{Deserialize, Serialize};

use air_core::{AccountId, AirError};
use air_ledger::TokenLedger;

/// The protocol treasury vault.
///
/// Holds its balance on the Token Ledger under `account`. The owner
/// assigns the emissions-controller capability exactly once; after that
/// the assignment is permanent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasuryVault {
    /// The vault's own ledger account (holds the custodied funds).
    account: AccountId,
    /// Administrative account; may assign the emissions controller.
    owner: AccountId,
    /// The single account authorized to withdraw. Unset until the owner
    /// assigns it; assignable exactly once.
    emissions_controller: Option<AccountId>,
}

impl TreasuryVault {
    /// Create a new vault with the given ledger account and owner.
    pub fn new(account: AccountId, owner: AccountId) -> Self {
        Self {
            account,
            owner,
            emissions_controller: None,
        }
    }

    /// The vault's ledger account.
    pub fn account(&self) -> AccountId {
        self.account
    }

    /// The currently assigned emissions controller, if any.
    pub fn emissions_controller(&self) -> Option<AccountId> {
        self.emissions_controller
    }

    /// Assign the emissions-controller capability. Owner-only, one-time.
    ///
    /// # Errors
    /// Returns `AirError::NotAuthorized` if `caller` is not the owner.
    /// Returns `AirError::InvalidState` if a controller is already set.
    pub fn set_emissions_controller(
        &mut self,
        caller: &AccountId,
        controller: AccountId,
    ) -> Result<(), AirError> {
        if *caller != self.owner {
            return Err(AirError::NotAuthorized(format!(
                "only the vault owner may assign the emissions controller, caller was {}",
                caller
            )));
        }
        if self.emissions_controller.is_some() {
            return Err(AirError::InvalidState(
                "emissions controller is already set".to_string(),
            ));
        }
        self.emissions_controller = Some(controller);
        Ok(())
    }

    /// Withdraw `amount` base units from the vault to `recipient`.
    ///
    /// Authorization is checked before anything else: only the assigned
    /// emissions controller may pull, and an unset controller rejects
    /// every caller. The underlying ledger transfer is all-or-nothing,
    /// so an insufficient vault balance fails the whole call with no
    /// state change.
    ///
    /// # Errors
    /// Returns `AirError::NotAuthorized` for any caller other than the
    /// assigned controller, or `AirError::InsufficientBalance` from the
    /// ledger transfer.
    pub fn pull_to(
        &self,
        caller: &AccountId,
        ledger: &mut TokenLedger,
        recipient: &AccountId,
        amount: u64,
    ) -> Result<(), AirError> {
        match self.emissions_controller {
            Some(controller) if *caller == controller => {}
            _ => {
                return Err(AirError::NotAuthorized(format!(
                    "caller {} is not the emissions controller",
                    caller
                )));
            }
        }
        ledger.transfer(&self.account, recipient, amount)
    }
}
