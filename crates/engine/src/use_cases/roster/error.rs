//! Roster operation errors.

use mythforge_domain::CharacterId;

use crate::infrastructure::ports::StoreError;

/// Errors that can occur during roster operations.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
