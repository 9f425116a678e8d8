//! Character creation errors.

use mythforge_domain::DomainError;

use crate::infrastructure::ports::{ContentError, StoreError};

/// Errors that can occur while validating or finishing a draft.
#[derive(Debug, thiserror::Error)]
pub enum CreationError {
    #[error("Draft is missing {0}")]
    MissingSelection(&'static str),

    #[error("Stat line is not a legal creation spread: {0}")]
    StatsNotLegal(String),

    #[error("Unknown {entity}: '{name}'")]
    UnknownSelection { entity: &'static str, name: String },

    #[error("'{name}' is not offered to this archetype slot")]
    TalentNotAvailable { name: String },

    #[error("'{name}' needs a recorded selection")]
    SelectionRequired { name: String },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Rules data error: {0}")]
    Content(#[from] ContentError),
}
