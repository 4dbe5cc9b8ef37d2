// crates/air-ledger/src/lib.rs
//
// air-ledger: the $AIR fungible token ledger.
//
// The ledger is the single global source of truth for fund custody:
// every protocol component (treasury vault, distributor, staking ledger)
// holds its funds as a balance on this ledger under its own account.
//
// All monetary values are tracked in base units (the smallest unit of
// $AIR). 1 AIR = 1,000,000,000 base units (10^9).

pub mod ledger;
pub mod token;

pub use ledger::TokenLedger;
pub use token::{Air, BASE_UNITS_PER_AIR, MAX_SUPPLY_UNITS};
