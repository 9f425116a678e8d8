//! JSON-file character persistence.
//!
//! One pretty-printed file per character under the store root, named
//! `<uuid>.json`. Writes land in a temp file and rename into place, so
//! a crash mid-write never leaves a half-written sheet behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;

use mythforge_domain::{Character, CharacterId};

use crate::infrastructure::ports::{CharacterStore, CharacterSummary, StoreError};

pub struct JsonFileCharacterStore {
    root: PathBuf,
}

impl JsonFileCharacterStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: CharacterId) -> PathBuf {
        self.root.join(format!("{}.json", id))
    }

    async fn read_record(&self, path: &Path) -> Result<Character, StoreError> {
        let raw = fs::read_to_string(path).await?;
        serde_json::from_str(&raw).map_err(|err| StoreError::Corrupt {
            path: path.display().to_string(),
            reason: err.to_string(),
        })
    }
}

#[async_trait]
impl CharacterStore for JsonFileCharacterStore {
    async fn save(&self, character: &Character) -> Result<CharacterId, StoreError> {
        let id = character.id().unwrap_or_else(CharacterId::new);
        let mut record = character.clone();
        record.mark_saved(id, Utc::now());

        let json = serde_json::to_string_pretty(&record)?;
        let path = self.path_for(id);
        let tmp = self.root.join(format!(".{}.json.tmp", id));
        fs::write(&tmp, json.as_bytes()).await?;
        fs::rename(&tmp, &path).await?;

        tracing::debug!(character_id = %id, path = %path.display(), "Saved character");
        Ok(id)
    }

    async fn get(&self, id: CharacterId) -> Result<Option<Character>, StoreError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        self.read_record(&path).await.map(Some)
    }

    async fn list(&self) -> Result<Vec<CharacterSummary>, StoreError> {
        let mut summaries = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            // A bad file costs one warning, not the whole roster.
            match self.read_record(&path).await {
                Ok(character) => {
                    if let Some(summary) = CharacterSummary::of(&character) {
                        summaries.push(summary);
                    } else {
                        tracing::warn!(
                            path = %path.display(),
                            "Skipping roster entry with no character id"
                        );
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "Skipping unreadable roster entry"
                    );
                }
            }
        }
        summaries.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.id.to_uuid().cmp(&b.id.to_uuid()))
        });
        Ok(summaries)
    }

    async fn delete(&self, id: CharacterId) -> Result<bool, StoreError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).await?;
        tracing::debug!(character_id = %id, "Deleted character");
        Ok(true)
    }
}
