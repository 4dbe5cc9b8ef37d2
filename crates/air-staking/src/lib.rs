// crates/air-staking/src/lib.rs
//
// air-staking: stake/unstake bookkeeping and the minimum-stake
// eligibility check for the AIR Protocol.
//
// Staked funds are held on the Token Ledger under the staking ledger's
// own account; the per-staker net-stake map and the running total are
// owned here. Eligibility is a pure threshold check:
// `balance_staked(account) >= minimum_stake`.

pub mod staking;

pub use staking::StakingLedger;
