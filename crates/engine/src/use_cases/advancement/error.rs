//! Level-up orchestration errors.

use mythforge_domain::{CharacterId, DomainError};

use crate::infrastructure::ports::{ContentError, StoreError};

/// Errors that can occur while collecting or applying a level-up.
#[derive(Debug, thiserror::Error)]
pub enum AdvancementError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("No level-up session in progress for {0}")]
    NoSession(CharacterId),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Rules data error: {0}")]
    Content(#[from] ContentError),
}
