//! Inventory items.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::Purse;

/// Broad item categories; the defense math branches on these, never on
/// name fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Melee,
    Ranged,
    Armor,
    Shield,
    Gear,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemKind::Melee => "Melee",
            ItemKind::Ranged => "Ranged",
            ItemKind::Armor => "Armor",
            ItemKind::Shield => "Shield",
            ItemKind::Gear => "Gear",
        };
        write!(f, "{}", name)
    }
}

/// Mechanical item traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemTag {
    /// Grants +1 parry while carried.
    Guard,
    TwoHanded,
    Light,
    Thrown,
}

/// An item, both as a catalog entry and as an owned inventory line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
    /// Armor score contribution; armor and shields only.
    #[serde(default)]
    pub armor_score: Option<i32>,
    #[serde(default)]
    pub tags: Vec<ItemTag>,
    /// Carry slots consumed.
    #[serde(default = "default_bulk")]
    pub bulk: u8,
    #[serde(default)]
    pub price: Purse,
}

fn default_bulk() -> u8 {
    1
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            kind,
            armor_score: None,
            tags: Vec::new(),
            bulk: 1,
            price: Purse::default(),
        }
    }

    pub fn melee(name: impl Into<String>) -> Self {
        Self::new(name, ItemKind::Melee)
    }

    pub fn armor(name: impl Into<String>, armor_score: i32) -> Self {
        let mut item = Self::new(name, ItemKind::Armor);
        item.armor_score = Some(armor_score);
        item
    }

    pub fn shield(name: impl Into<String>) -> Self {
        Self::new(name, ItemKind::Shield)
    }

    pub fn with_tags(mut self, tags: Vec<ItemTag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_price(mut self, price: Purse) -> Self {
        self.price = price;
        self
    }

    pub fn with_bulk(mut self, bulk: u8) -> Self {
        self.bulk = bulk;
        self
    }

    pub fn has_tag(&self, tag: ItemTag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn is_shield(&self) -> bool {
        self.kind == ItemKind::Shield
    }

    pub fn is_melee(&self) -> bool {
        self.kind == ItemKind::Melee
    }
}
