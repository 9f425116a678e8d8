//! In-memory character persistence.
//!
//! Same contract as the file store, backed by a `DashMap`. Used by
//! tests and by embedding callers that manage their own persistence.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use mythforge_domain::{Character, CharacterId};

use crate::infrastructure::ports::{CharacterStore, CharacterSummary, StoreError};

#[derive(Default)]
pub struct InMemoryCharacterStore {
    records: DashMap<CharacterId, Character>,
}

impl InMemoryCharacterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl CharacterStore for InMemoryCharacterStore {
    async fn save(&self, character: &Character) -> Result<CharacterId, StoreError> {
        let id = character.id().unwrap_or_else(CharacterId::new);
        let mut record = character.clone();
        record.mark_saved(id, Utc::now());
        self.records.insert(id, record);
        Ok(id)
    }

    async fn get(&self, id: CharacterId) -> Result<Option<Character>, StoreError> {
        Ok(self.records.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<CharacterSummary>, StoreError> {
        let mut summaries: Vec<CharacterSummary> = self
            .records
            .iter()
            .filter_map(|entry| CharacterSummary::of(entry.value()))
            .collect();
        summaries.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.id.to_uuid().cmp(&b.id.to_uuid()))
        });
        Ok(summaries)
    }

    async fn delete(&self, id: CharacterId) -> Result<bool, StoreError> {
        Ok(self.records.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trips_and_deletes() {
        let store = InMemoryCharacterStore::new();
        let id = store.save(&Character::new("Brennic")).await.unwrap();
        assert_eq!(store.len(), 1);

        let stored = store.get(id).await.unwrap().unwrap();
        assert_eq!(stored.name(), "Brennic");
        assert_eq!(stored.id(), Some(id));

        assert!(store.delete(id).await.unwrap());
        assert!(store.is_empty());
        assert!(!store.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn listing_matches_the_file_store_ordering() {
        let store = InMemoryCharacterStore::new();
        store.save(&Character::new("Wren")).await.unwrap();
        store.save(&Character::new("Ash")).await.unwrap();

        let names: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Ash", "Wren"]);
    }
}
