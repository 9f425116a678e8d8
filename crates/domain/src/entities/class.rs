//! Classes: named archetype pairings and their synergy feats.
//!
//! A class is keyed by its two component archetypes. Pairing the same
//! archetype twice makes a Pure class; two different archetypes make a
//! Hybrid. Synergy feats come online at fixed levels and may auto-grant
//! a talent.

use serde::{Deserialize, Serialize};

use crate::value_objects::Modifier;

/// A class feature unlocked at a fixed level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynergyFeat {
    pub name: String,
    /// Character level at which the feat comes online.
    pub level: u8,
    pub description: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Talent auto-granted (cost "Free") when the feat comes online.
    #[serde(default)]
    pub grant_talent: Option<String>,
}

impl SynergyFeat {
    pub fn new(name: impl Into<String>, level: u8, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            description: description.into(),
            modifiers: Vec::new(),
            grant_talent: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn granting(mut self, talent_name: impl Into<String>) -> Self {
        self.grant_talent = Some(talent_name.into());
        self
    }

    /// True once a character of `level` has the feat active.
    pub fn is_online(&self, level: u8) -> bool {
        self.level <= level
    }
}

/// A class catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDef {
    pub id: String,
    pub name: String,
    /// The two component archetype ids; order does not matter.
    pub components: [String; 2],
    #[serde(default)]
    pub synergy_feats: Vec<SynergyFeat>,
}

impl ClassDef {
    /// True when this class is a Pure pairing (same archetype twice).
    pub fn is_pure(&self) -> bool {
        self.components[0] == self.components[1]
    }

    /// Order-insensitive pairing match.
    pub fn matches_pair(&self, a: &str, b: &str) -> bool {
        (self.components[0] == a && self.components[1] == b)
            || (self.components[0] == b && self.components[1] == a)
    }

    /// Synergy feats active at `level`, in catalog order.
    pub fn online_synergy_feats(&self, level: u8) -> impl Iterator<Item = &SynergyFeat> {
        self.synergy_feats.iter().filter(move |feat| feat.is_online(level))
    }
}
