//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine; everything else is
//! concrete types. Ports exist for:
//! - Character persistence (JSON files today, could swap for a database)
//! - Rules data (file catalogs today, could swap for bundled or remote)

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use mythforge_domain::{Character, CharacterId, Rulebook};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Corrupt record at {path}: {reason}")]
    Corrupt { path: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Missing catalog '{catalog}' for locale '{locale}'")]
    MissingCatalog { locale: String, catalog: &'static str },
    #[error("Invalid catalog '{catalog}': {reason}")]
    Invalid { catalog: &'static str, reason: String },
}

// =============================================================================
// Infrastructure Types
// =============================================================================

/// One row of the roster listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSummary {
    pub id: CharacterId,
    pub name: String,
    pub level: u8,
    pub class_name: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CharacterSummary {
    /// Builds a summary row from a stored character.
    ///
    /// Returns `None` for records that were never assigned an id; those
    /// cannot be addressed and have no business in a listing.
    pub fn of(character: &Character) -> Option<Self> {
        Some(Self {
            id: character.id()?,
            name: character.name().to_string(),
            level: character.level(),
            class_name: character.class_name().map(str::to_string),
            updated_at: character.updated_at(),
        })
    }
}

// =============================================================================
// Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterStore: Send + Sync {
    /// Persists the character, assigning an id on first save and
    /// stamping timestamps. Returns the id the record lives under.
    async fn save(&self, character: &Character) -> Result<CharacterId, StoreError>;
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, StoreError>;
    async fn list(&self) -> Result<Vec<CharacterSummary>, StoreError>;
    /// Returns whether a record existed.
    async fn delete(&self, id: CharacterId) -> Result<bool, StoreError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RulesDataProvider: Send + Sync {
    /// The rulebook for a locale. Implementations cache internally; the
    /// returned `Arc` is shared, never a per-call deep copy.
    async fn rulebook(&self, locale: &str) -> Result<Arc<Rulebook>, ContentError>;
}
