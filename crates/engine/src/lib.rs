//! Mythforge engine library.
//!
//! Everything around the rules domain: persistence and rules-data
//! adapters, the ports they implement, and the use cases that drive a
//! character from blank draft to leveled veteran.
//!
//! ## Structure
//!
//! - `infrastructure/` - ports plus the JSON file, in-memory, and rules
//!   data adapters
//! - `use_cases/` - creation, advancement, and roster flows
//! - `telemetry` - tracing bootstrap for embedding binaries

pub mod infrastructure;
pub mod telemetry;
pub mod use_cases;

/// Test fixtures: sample rules data, character builders, JSON loaders.
#[cfg(test)]
pub mod test_fixtures;

pub use infrastructure::content::{FileRulesData, DEFAULT_LOCALE};
pub use infrastructure::persistence::{InMemoryCharacterStore, JsonFileCharacterStore};
pub use infrastructure::ports::{
    CharacterStore, CharacterSummary, ContentError, RulesDataProvider, StoreError,
};
pub use infrastructure::settings::EngineSettings;
pub use use_cases::{
    Advancement, AdvancementError, CharacterCreation, CreationError, LevelUpOutlook, Roster,
    RosterError, VitalsDelta,
};
