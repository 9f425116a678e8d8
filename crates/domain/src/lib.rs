//! Core domain model for the Mythforge character engine.
//!
//! Pure rules math over plain data: no IO, no clocks, no randomness of
//! its own. Dice rolls come in through closures and persistence lives
//! behind ports in the engine crate.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;
pub mod rulebook;
pub mod rules;
pub mod value_objects;

pub use aggregates::{
    Character, Defenses, DerivedPools, TalentSelectionOutcome, Vitals, MAX_LEVEL,
};

pub use entities::{
    Ancestry, AncestryBoon, AncestryFeat, Archetype, Background, ChassisRow, ChoiceKind,
    ClassDef, CreationSlot, DamageDie, FeatChoice, GearGrant, Item, ItemKind, ItemTag,
    KnownTalent, MonsterChassis, MonsterFamily, Role, SynergyFeat, Talent, TalentFlags,
    TalentSource,
};

pub use error::DomainError;

pub use ids::CharacterId;

pub use rulebook::Rulebook;

pub use rules::{
    armor_score, hit_die_for_pair, pending_synergy_grant, recompute_all, recompute_defenses,
    recompute_pools, resolve_synergy_grant, skill_check_profile, skill_ratings,
    valid_talent_options, HpRoll, LevelUpReport, LevelUpSession, LevelUpState, SkillCheckProfile,
    SkillRating, SynergyGrant, TalentDecision,
};

pub use value_objects::{
    Condition, DefenseDie, DefenseKind, DefenseScore, Modifier, PoolKind, Purse, SkillId, Stat,
    StatBlock, TrainingTier, MANUAL_RANGE, STANDARD_ARRAYS,
};
