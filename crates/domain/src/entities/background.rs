//! Backgrounds: pre-adventure life, one trained skill, starting gear.

use serde::{Deserialize, Serialize};

use crate::value_objects::SkillId;

/// One line of a background's starting-gear package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GearGrant {
    /// An item looked up in the item catalog by name.
    Item { name: String },
    /// Coinage added to the purse.
    Coin {
        #[serde(default)]
        gold: u32,
        #[serde(default)]
        silver: u32,
        #[serde(default)]
        copper: u32,
    },
}

impl GearGrant {
    pub fn item(name: impl Into<String>) -> Self {
        Self::Item { name: name.into() }
    }

    pub fn coin(gold: u32, silver: u32, copper: u32) -> Self {
        Self::Coin {
            gold,
            silver,
            copper,
        }
    }
}

/// A background catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    pub id: String,
    pub name: String,
    pub description: String,
    /// The one skill this background trains.
    pub skill: SkillId,
    #[serde(default)]
    pub gear: Vec<GearGrant>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gear_grant_json_shapes() {
        let item = GearGrant::item("Lockpicks");
        let coin = GearGrant::coin(2, 0, 5);
        assert_eq!(
            serde_json::to_value(&item).ok(),
            Some(serde_json::json!({ "type": "item", "name": "Lockpicks" }))
        );
        assert_eq!(
            serde_json::to_value(&coin).ok(),
            Some(serde_json::json!({ "type": "coin", "gold": 2, "silver": 0, "copper": 5 }))
        );
    }

    #[test]
    fn test_background_skill_round_trips() {
        let background = Background {
            id: "street_rat".to_string(),
            name: "Street Rat".to_string(),
            description: "Raised by alleys.".to_string(),
            skill: SkillId::StealthAndThievery,
            gear: vec![GearGrant::item("Lockpicks")],
        };
        let json = serde_json::to_string(&background).ok();
        let back: Option<Background> = json.as_deref().and_then(|j| serde_json::from_str(j).ok());
        assert_eq!(back.map(|b| b.skill), Some(SkillId::StealthAndThievery));
    }
}
