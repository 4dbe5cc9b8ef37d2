// crates/air-ledger/src/token.rs
//
// $AIR token type and supply constants.
//
// The smallest unit of $AIR is the base unit. 1 AIR = 10^9 base units.
// All internal accounting uses base units to avoid floating-point
// precision issues in economic calculations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Number of base units in one AIR. 1 AIR = 10^9 base units.
pub const BASE_UNITS_PER_AIR: u64 = 1_000_000_000;

/// Maximum supply of $AIR in base units. 1,000,000,000 AIR * 10^9 units/AIR.
pub const MAX_SUPPLY_UNITS: u64 = 1_000_000_000 * BASE_UNITS_PER_AIR;

/// An $AIR token amount.
///
/// Wraps an amount in base units (the smallest denomination).
/// All arithmetic is performed in integer base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Air {
    /// Amount in base units (1 AIR = 10^9 units).
    pub units: u64,
}

impl Air {
    /// Create an Air amount from a whole-AIR value.
    pub fn from_air(amount: u64) -> Self {
        Self {
            units: amount * BASE_UNITS_PER_AIR,
        }
    }

    /// Create an Air amount from a base-unit value.
    pub fn from_units(units: u64) -> Self {
        Self { units }
    }

    /// Returns zero AIR.
    pub fn zero() -> Self {
        Self { units: 0 }
    }
}

impl Add for Air {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            units: self.units + rhs.units,
        }
    }
}

impl Sub for Air {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            units: self.units.saturating_sub(rhs.units),
        }
    }
}

impl fmt::Display for Air {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.units / BASE_UNITS_PER_AIR;
        let frac = self.units % BASE_UNITS_PER_AIR;
        if frac == 0 {
            write!(f, "{} AIR", whole)
        } else {
            // Display up to 9 decimal places, trimming trailing zeros
            let frac_str = format!("{:09}", frac);
            let trimmed = frac_str.trim_end_matches('0');
            write!(f, "{}.{} AIR", whole, trimmed)
        }
    }
}
