//! Monster chassis and family catalogs.
//!
//! Loaded and carried for the table tools that build encounters on top of
//! this engine; no encounter math lives here.

use serde::{Deserialize, Serialize};

use crate::entities::Role;

/// One level row of a chassis table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChassisRow {
    pub level: u8,
    pub hp: i32,
    pub armor_score: i32,
    pub attack: i32,
    #[serde(default)]
    pub damage_die: Option<DamageDie>,
}

/// A damage die expression, e.g. 2d6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageDie {
    pub count: u8,
    pub sides: u8,
}

/// Level-indexed base statistics for monsters of one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonsterChassis {
    pub role: Role,
    #[serde(default)]
    pub rows: Vec<ChassisRow>,
}

impl MonsterChassis {
    pub fn row_for_level(&self, level: u8) -> Option<&ChassisRow> {
        self.rows.iter().find(|row| row.level == level)
    }
}

/// A themed monster family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonsterFamily {
    pub name: String,
    pub role: Role,
    pub description: String,
    #[serde(default)]
    pub traits: Vec<String>,
}
