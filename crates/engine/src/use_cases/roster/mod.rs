//! Roster upkeep: the thin store surface plus table-time conveniences.
//!
//! Damage, healing, and conditions go through the aggregate so every
//! adjustment lands clamped, then the record is saved back.

mod error;

pub use error::RosterError;

use std::sync::Arc;

use mythforge_domain::{Character, CharacterId, Condition, Vitals};

use crate::infrastructure::ports::{CharacterStore, CharacterSummary};

/// Per-pool deltas for one vitals adjustment. Unset pools stay zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VitalsDelta {
    pub hp: i32,
    pub mp: i32,
    pub sta: i32,
    pub luck: i32,
}

impl VitalsDelta {
    pub fn hp(amount: i32) -> Self {
        Self {
            hp: amount,
            ..Self::default()
        }
    }
}

/// Container for roster operations.
pub struct Roster {
    store: Arc<dyn CharacterStore>,
}

impl Roster {
    pub fn new(store: Arc<dyn CharacterStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<CharacterSummary>, RosterError> {
        Ok(self.store.list().await?)
    }

    pub async fn load(&self, id: CharacterId) -> Result<Character, RosterError> {
        self.store
            .get(id)
            .await?
            .ok_or(RosterError::CharacterNotFound(id))
    }

    pub async fn save(&self, character: &Character) -> Result<CharacterId, RosterError> {
        Ok(self.store.save(character).await?)
    }

    pub async fn delete(&self, id: CharacterId) -> Result<bool, RosterError> {
        let deleted = self.store.delete(id).await?;
        if deleted {
            tracing::info!(character_id = %id, "Character deleted");
        }
        Ok(deleted)
    }

    /// Applies clamped deltas to the current vitals and saves.
    pub async fn adjust_vitals(
        &self,
        id: CharacterId,
        delta: VitalsDelta,
    ) -> Result<Vitals, RosterError> {
        let mut character = self.load(id).await?;
        if delta.hp != 0 {
            character.adjust_hp(delta.hp);
        }
        if delta.mp != 0 {
            character.adjust_mp(delta.mp);
        }
        if delta.sta != 0 {
            character.adjust_sta(delta.sta);
        }
        if delta.luck != 0 {
            character.adjust_luck(delta.luck);
        }
        self.store.save(&character).await?;
        tracing::debug!(
            character_id = %id,
            hp = character.vitals().hp,
            mp = character.vitals().mp,
            sta = character.vitals().sta,
            luck = character.vitals().luck,
            "Vitals adjusted"
        );
        Ok(*character.vitals())
    }

    /// Turns a condition on or off. Saves only when something changed;
    /// returns whether it did.
    pub async fn set_condition(
        &self,
        id: CharacterId,
        condition: Condition,
        active: bool,
    ) -> Result<bool, RosterError> {
        let mut character = self.load(id).await?;
        let changed = if active {
            character.apply_condition(condition)
        } else {
            character.clear_condition(condition)
        };
        if changed {
            self.store.save(&character).await?;
            tracing::debug!(character_id = %id, condition = %condition, active, "Condition updated");
        }
        Ok(changed)
    }
}
