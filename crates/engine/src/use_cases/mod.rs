//! Use cases - player-facing flows orchestrated over the ports.
//!
//! Each module owns one flow family and its error type. Rules math stays
//! in the domain crate; these modules load, validate, derive, and save.

pub mod advancement;
pub mod creation;
pub mod roster;

pub use advancement::{Advancement, AdvancementError, LevelUpOutlook};
pub use creation::{CharacterCreation, CreationError};
pub use roster::{Roster, RosterError, VitalsDelta};
