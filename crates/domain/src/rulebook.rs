//! The loaded rules catalogs, resolved against by every derivation.
//!
//! A [`Rulebook`] is assembled by a rules-data adapter (one per locale)
//! and treated as immutable reference data from then on. All lookups are
//! by id or name; a miss is never a panic, it is either the data-not-ready
//! no-op (missing character selections) or a loud integrity error at the
//! caller's discretion.

use serde::{Deserialize, Serialize};

use crate::entities::{
    Ancestry, Archetype, Background, ClassDef, Item, MonsterChassis, MonsterFamily, Talent,
};

/// The full catalog set for one locale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rulebook {
    #[serde(default)]
    pub ancestries: Vec<Ancestry>,
    #[serde(default)]
    pub backgrounds: Vec<Background>,
    #[serde(default)]
    pub archetypes: Vec<Archetype>,
    #[serde(default)]
    pub classes: Vec<ClassDef>,
    /// Talents offered outside any archetype list.
    #[serde(default)]
    pub talents: Vec<Talent>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub chassis: Vec<MonsterChassis>,
    #[serde(default)]
    pub families: Vec<MonsterFamily>,
}

impl Rulebook {
    pub fn ancestry(&self, id: &str) -> Option<&Ancestry> {
        self.ancestries.iter().find(|ancestry| ancestry.id == id)
    }

    pub fn background(&self, id: &str) -> Option<&Background> {
        self.backgrounds.iter().find(|background| background.id == id)
    }

    pub fn archetype(&self, id: &str) -> Option<&Archetype> {
        self.archetypes.iter().find(|archetype| archetype.id == id)
    }

    /// The class for an archetype pairing, order-insensitive.
    pub fn class_for_pair(&self, a: &str, b: &str) -> Option<&ClassDef> {
        self.classes.iter().find(|class| class.matches_pair(a, b))
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Looks a talent up by name: the general list first, then every
    /// archetype's list.
    pub fn talent(&self, name: &str) -> Option<&Talent> {
        self.talents
            .iter()
            .find(|talent| talent.name == name)
            .or_else(|| {
                self.archetypes
                    .iter()
                    .find_map(|archetype| archetype.talent(name))
            })
    }
}
