//! Value objects: small immutable types with no identity of their own.

mod condition;
mod currency;
mod defense;
mod modifier;
mod skill;
mod stat;

pub use condition::Condition;
pub use currency::Purse;
pub use defense::{DefenseDie, DefenseKind, DefenseScore};
pub use modifier::{Modifier, PoolKind};
pub use skill::{SkillId, TrainingTier};
pub use stat::{Stat, StatBlock, MANUAL_RANGE, STANDARD_ARRAYS};
