//! Mechanical modifiers carried by ancestry feats, boons, talents, and
//! synergy feats.
//!
//! Every effect a catalog entry can have on the derivation math is one of
//! these variants. The derivation passes match on the variant they care
//! about and ignore the rest, so a talent can mix pool bonuses, training,
//! and armor effects freely.

use serde::{Deserialize, Serialize};

use crate::value_objects::{DefenseKind, SkillId, Stat};

/// A derived resource pool a flat bonus can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolKind {
    Hp,
    Mp,
    Sta,
    Luck,
    Slots,
}

/// One mechanical effect.
///
/// Serialized with a `type` tag so catalog JSON stays explicit about what
/// each entry does:
///
/// ```json
/// { "type": "pool_bonus", "pool": "hp", "amount": 4 }
/// { "type": "skill_training", "skill": "Stealth & Thievery" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Modifier {
    /// Flat bonus to a derived pool.
    PoolBonus { pool: PoolKind, amount: i32 },
    /// Stamina additionally gains the named stat's value.
    StatLinkedStamina { stat: Stat },
    /// One training rank toward a defense lane's reaction die.
    DefenseTraining { defense: DefenseKind },
    /// Flat bonus to a defense lane's static value.
    DefenseBonus { defense: DefenseKind, amount: i32 },
    /// Flat bonus to armor score.
    ArmorBonus { amount: i32 },
    /// One training source for a fixed skill.
    SkillTraining { skill: SkillId },
    /// One training source for the skill chosen on the owning talent.
    ChosenSkillTraining,
    /// Armor score reads `stat`, capped at 3, instead of 0 while no
    /// armor is worn.
    UnarmoredDefense { stat: Stat },
    /// Shield bonus becomes +2 instead of +1 while a shield is carried.
    TowerShieldMastery,
}

impl Modifier {
    pub fn pool_bonus(pool: PoolKind, amount: i32) -> Self {
        Self::PoolBonus { pool, amount }
    }

    pub fn stat_linked_stamina(stat: Stat) -> Self {
        Self::StatLinkedStamina { stat }
    }

    pub fn defense_training(defense: DefenseKind) -> Self {
        Self::DefenseTraining { defense }
    }

    pub fn defense_bonus(defense: DefenseKind, amount: i32) -> Self {
        Self::DefenseBonus { defense, amount }
    }

    pub fn armor_bonus(amount: i32) -> Self {
        Self::ArmorBonus { amount }
    }

    pub fn skill_training(skill: SkillId) -> Self {
        Self::SkillTraining { skill }
    }

    pub fn unarmored_defense(stat: Stat) -> Self {
        Self::UnarmoredDefense { stat }
    }
}
