//! Aggregate roots.

mod character;

pub use character::{
    Character, Defenses, DerivedPools, TalentSelectionOutcome, Vitals, MAX_LEVEL,
};
