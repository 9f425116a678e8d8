//! The fixed twelve-skill list and training tiers.
//!
//! Skills are a closed vocabulary resolved by identity, never by name
//! fragments. Catalog files refer to them by display name; [`SkillId`]
//! serializes that way so the JSON stays readable at the table.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;
use crate::value_objects::Stat;

/// One of the twelve skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkillId {
    ArmsAndAthletics,
    ForceAndBreaking,
    StealthAndThievery,
    AcrobaticsAndBalance,
    EnduranceAndSurvival,
    GritAndRecovery,
    ArcanaAndLore,
    CraftAndTinkering,
    PerceptionAndInsight,
    WildsAndMedicine,
    PresenceAndPerformance,
    GuileAndIntrigue,
}

impl SkillId {
    /// All twelve skills in sheet order.
    pub const ALL: [SkillId; 12] = [
        SkillId::ArmsAndAthletics,
        SkillId::ForceAndBreaking,
        SkillId::StealthAndThievery,
        SkillId::AcrobaticsAndBalance,
        SkillId::EnduranceAndSurvival,
        SkillId::GritAndRecovery,
        SkillId::ArcanaAndLore,
        SkillId::CraftAndTinkering,
        SkillId::PerceptionAndInsight,
        SkillId::WildsAndMedicine,
        SkillId::PresenceAndPerformance,
        SkillId::GuileAndIntrigue,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SkillId::ArmsAndAthletics => "Arms & Athletics",
            SkillId::ForceAndBreaking => "Force & Breaking",
            SkillId::StealthAndThievery => "Stealth & Thievery",
            SkillId::AcrobaticsAndBalance => "Acrobatics & Balance",
            SkillId::EnduranceAndSurvival => "Endurance & Survival",
            SkillId::GritAndRecovery => "Grit & Recovery",
            SkillId::ArcanaAndLore => "Arcana & Lore",
            SkillId::CraftAndTinkering => "Craft & Tinkering",
            SkillId::PerceptionAndInsight => "Perception & Insight",
            SkillId::WildsAndMedicine => "Wilds & Medicine",
            SkillId::PresenceAndPerformance => "Presence & Performance",
            SkillId::GuileAndIntrigue => "Guile & Intrigue",
        }
    }

    /// The stat a check with this skill rolls against.
    pub fn governing_stat(&self) -> Stat {
        match self {
            SkillId::ArmsAndAthletics | SkillId::ForceAndBreaking => Stat::Strength,
            SkillId::StealthAndThievery | SkillId::AcrobaticsAndBalance => Stat::Dexterity,
            SkillId::EnduranceAndSurvival | SkillId::GritAndRecovery => Stat::Constitution,
            SkillId::ArcanaAndLore | SkillId::CraftAndTinkering => Stat::Intelligence,
            SkillId::PerceptionAndInsight | SkillId::WildsAndMedicine => Stat::Wisdom,
            SkillId::PresenceAndPerformance | SkillId::GuileAndIntrigue => Stat::Charisma,
        }
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SkillId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillId::ALL
            .iter()
            .find(|skill| skill.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| DomainError::parse(format!("Unknown skill: {}", s)))
    }
}

impl Serialize for SkillId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for SkillId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(|err: DomainError| D::Error::custom(err.to_string()))
    }
}

/// How trained a character is in a skill, from stacked training sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingTier {
    Untrained,
    Trained,
    Expert,
}

impl TrainingTier {
    /// Maps a source count to a tier: 0, 1, 2-or-more.
    pub fn from_sources(count: u8) -> Self {
        match count {
            0 => TrainingTier::Untrained,
            1 => TrainingTier::Trained,
            _ => TrainingTier::Expert,
        }
    }

    /// Sides of the training die added to checks, if any.
    pub fn die(&self) -> Option<u8> {
        match self {
            TrainingTier::Untrained => None,
            TrainingTier::Trained => Some(4),
            TrainingTier::Expert => Some(6),
        }
    }

    /// Sheet label for the training die column.
    pub fn die_label(&self) -> &'static str {
        match self {
            TrainingTier::Untrained => "-",
            TrainingTier::Trained => "d4",
            TrainingTier::Expert => "d6",
        }
    }
}
