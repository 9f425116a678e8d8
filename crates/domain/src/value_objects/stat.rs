//! The six core stats and the block that holds a character's scores.
//!
//! Stats live in the -2..=+5 band when entered by hand; rolled arrays may
//! exceed it. A slot that was never assigned reads as 0 in every derivation,
//! which is what lets a half-built character flow through the math without
//! special cases.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One of the six core stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stat {
    #[serde(rename = "STR")]
    Strength,
    #[serde(rename = "DEX")]
    Dexterity,
    #[serde(rename = "CON")]
    Constitution,
    #[serde(rename = "INT")]
    Intelligence,
    #[serde(rename = "WIS")]
    Wisdom,
    #[serde(rename = "CHA")]
    Charisma,
}

impl Stat {
    /// All six stats in sheet order.
    pub const ALL: [Stat; 6] = [
        Stat::Strength,
        Stat::Dexterity,
        Stat::Constitution,
        Stat::Intelligence,
        Stat::Wisdom,
        Stat::Charisma,
    ];

    /// Three-letter sheet abbreviation.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Stat::Strength => "STR",
            Stat::Dexterity => "DEX",
            Stat::Constitution => "CON",
            Stat::Intelligence => "INT",
            Stat::Wisdom => "WIS",
            Stat::Charisma => "CHA",
        }
    }

    /// Full display name.
    pub fn name(&self) -> &'static str {
        match self {
            Stat::Strength => "Strength",
            Stat::Dexterity => "Dexterity",
            Stat::Constitution => "Constitution",
            Stat::Intelligence => "Intelligence",
            Stat::Wisdom => "Wisdom",
            Stat::Charisma => "Charisma",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Stat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "STR" | "STRENGTH" => Ok(Stat::Strength),
            "DEX" | "DEXTERITY" => Ok(Stat::Dexterity),
            "CON" | "CONSTITUTION" => Ok(Stat::Constitution),
            "INT" | "INTELLIGENCE" => Ok(Stat::Intelligence),
            "WIS" | "WISDOM" => Ok(Stat::Wisdom),
            "CHA" | "CHARISMA" => Ok(Stat::Charisma),
            _ => Err(DomainError::parse(format!("Unknown stat: {}", s))),
        }
    }
}

/// The inclusive band allowed for manually entered stat values.
pub const MANUAL_RANGE: std::ops::RangeInclusive<i32> = -2..=5;

/// The rolled stat arrays the creation wizard accepts as-is, in any
/// assignment order. Array values may sit outside [`MANUAL_RANGE`].
pub const STANDARD_ARRAYS: [[i32; 6]; 3] = [
    [2, 2, 1, 1, 0, 0],
    [3, 2, 2, 1, 0, -1],
    [4, 3, 1, 0, -1, -2],
];

/// A character's six stat slots.
///
/// Slots start unassigned; [`StatBlock::score`] reads an unassigned slot
/// as 0 so derivations never branch on missing values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    #[serde(rename = "STR", default, skip_serializing_if = "Option::is_none")]
    strength: Option<i32>,
    #[serde(rename = "DEX", default, skip_serializing_if = "Option::is_none")]
    dexterity: Option<i32>,
    #[serde(rename = "CON", default, skip_serializing_if = "Option::is_none")]
    constitution: Option<i32>,
    #[serde(rename = "INT", default, skip_serializing_if = "Option::is_none")]
    intelligence: Option<i32>,
    #[serde(rename = "WIS", default, skip_serializing_if = "Option::is_none")]
    wisdom: Option<i32>,
    #[serde(rename = "CHA", default, skip_serializing_if = "Option::is_none")]
    charisma: Option<i32>,
}

impl StatBlock {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, stat: Stat) -> &Option<i32> {
        match stat {
            Stat::Strength => &self.strength,
            Stat::Dexterity => &self.dexterity,
            Stat::Constitution => &self.constitution,
            Stat::Intelligence => &self.intelligence,
            Stat::Wisdom => &self.wisdom,
            Stat::Charisma => &self.charisma,
        }
    }

    fn slot_mut(&mut self, stat: Stat) -> &mut Option<i32> {
        match stat {
            Stat::Strength => &mut self.strength,
            Stat::Dexterity => &mut self.dexterity,
            Stat::Constitution => &mut self.constitution,
            Stat::Intelligence => &mut self.intelligence,
            Stat::Wisdom => &mut self.wisdom,
            Stat::Charisma => &mut self.charisma,
        }
    }

    /// The assigned value, if any.
    pub fn get(&self, stat: Stat) -> Option<i32> {
        *self.slot(stat)
    }

    /// The value used in derivations; unassigned slots read as 0.
    pub fn score(&self, stat: Stat) -> i32 {
        self.slot(stat).unwrap_or(0)
    }

    pub fn set(&mut self, stat: Stat, value: i32) {
        *self.slot_mut(stat) = Some(value);
    }

    pub fn clear(&mut self, stat: Stat) {
        *self.slot_mut(stat) = None;
    }

    /// Bumps an assigned slot by `delta`; an unassigned slot starts from 0.
    pub fn adjust(&mut self, stat: Stat, delta: i32) {
        let slot = self.slot_mut(stat);
        *slot = Some(slot.unwrap_or(0) + delta);
    }

    /// True once all six slots are assigned.
    pub fn is_complete(&self) -> bool {
        Stat::ALL.iter().all(|stat| self.get(*stat).is_some())
    }

    /// How many slots currently hold a value.
    pub fn assigned_count(&self) -> usize {
        Stat::ALL.iter().filter(|stat| self.get(**stat).is_some()).count()
    }

    /// Assigned values outside the manual-entry band, if any.
    pub fn out_of_manual_range(&self) -> Vec<(Stat, i32)> {
        Stat::ALL
            .iter()
            .filter_map(|stat| self.get(*stat).map(|value| (*stat, value)))
            .filter(|(_, value)| !MANUAL_RANGE.contains(value))
            .collect()
    }

    /// True when the six assigned scores are a permutation of one of the
    /// [`STANDARD_ARRAYS`]. Incomplete blocks never match.
    pub fn matches_standard_array(&self) -> bool {
        if !self.is_complete() {
            return false;
        }
        let mut scores: Vec<i32> = Stat::ALL.iter().map(|stat| self.score(*stat)).collect();
        scores.sort_unstable();
        STANDARD_ARRAYS.iter().any(|array| {
            let mut sorted = *array;
            sorted.sort_unstable();
            scores == sorted
        })
    }
}
