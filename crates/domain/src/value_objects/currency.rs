//! Coin purse in gold, silver, and copper.
//!
//! 1 gold = 10 silver = 100 copper. Spending converts through copper and
//! renormalizes, so the purse makes change on its own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Copper per silver piece.
const COPPER_PER_SILVER: u32 = 10;
/// Copper per gold piece.
const COPPER_PER_GOLD: u32 = 100;

/// A non-negative amount of coinage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purse {
    #[serde(default)]
    pub gold: u32,
    #[serde(default)]
    pub silver: u32,
    #[serde(default)]
    pub copper: u32,
}

impl Purse {
    pub fn new(gold: u32, silver: u32, copper: u32) -> Self {
        Self {
            gold,
            silver,
            copper,
        }
    }

    /// Builds a normalized purse from raw copper.
    pub fn from_copper(total: u32) -> Self {
        Self {
            gold: total / COPPER_PER_GOLD,
            silver: (total % COPPER_PER_GOLD) / COPPER_PER_SILVER,
            copper: total % COPPER_PER_SILVER,
        }
    }

    /// Everything converted down to copper.
    pub fn total_copper(&self) -> u32 {
        self.gold * COPPER_PER_GOLD + self.silver * COPPER_PER_SILVER + self.copper
    }

    pub fn is_empty(&self) -> bool {
        self.total_copper() == 0
    }

    /// Adds the given coinage without renormalizing existing denominations.
    pub fn earn(&mut self, amount: Purse) {
        self.gold += amount.gold;
        self.silver += amount.silver;
        self.copper += amount.copper;
    }

    /// Pays `cost` out of the purse, making change as needed.
    ///
    /// The purse is left normalized on success and untouched on failure.
    pub fn spend(&mut self, cost: Purse) -> Result<(), DomainError> {
        let have = self.total_copper();
        let need = cost.total_copper();
        if need > have {
            return Err(DomainError::constraint(format!(
                "Cannot afford {}: purse holds {}",
                cost, self
            )));
        }
        *self = Purse::from_copper(have - need);
        Ok(())
    }
}

impl fmt::Display for Purse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}g {}s {}c", self.gold, self.silver, self.copper)
    }
}
