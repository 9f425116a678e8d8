//! Archetypes: the half-classes characters pair into a class.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::Talent;
use crate::value_objects::{SkillId, Stat};

/// The combat role an archetype fills.
///
/// Role drives the pool math: hit die, stamina, mana, and luck all key off
/// which roles a character's archetype pair covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Warrior,
    Spellcaster,
    Specialist,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::Warrior => "Warrior",
            Role::Spellcaster => "Spellcaster",
            Role::Specialist => "Specialist",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An archetype catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Archetype {
    pub id: String,
    pub name: String,
    pub description: String,
    pub role: Role,
    /// Sheet-order stat emphasis; the first entry is the casting stat for
    /// spellcasters.
    #[serde(default)]
    pub primary_stats: Vec<Stat>,
    /// Skills this archetype trains.
    #[serde(default)]
    pub trained_skills: Vec<SkillId>,
    /// The talent list this archetype offers.
    #[serde(default)]
    pub talents: Vec<Talent>,
}

impl Archetype {
    /// The stat spellcasting keys off, for spellcaster archetypes.
    pub fn casting_stat(&self) -> Option<Stat> {
        match self.role {
            Role::Spellcaster => self.primary_stats.first().copied(),
            _ => None,
        }
    }

    pub fn talent(&self, name: &str) -> Option<&Talent> {
        self.talents.iter().find(|talent| talent.name == name)
    }

    pub fn trains_skill(&self, skill: SkillId) -> bool {
        self.trained_skills.contains(&skill)
    }
}
