//! File-backed rules data.
//!
//! Catalogs live under `<root>/<locale>/` as one JSON file per table:
//! `ancestries.json`, `backgrounds.json`, `archetypes.json`,
//! `classes.json`, `talents.json`, `items.json`, `monsters.json`.
//! A locale loads once, cross-references are checked, and the built
//! [`Rulebook`] is cached and shared.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::fs;

use mythforge_domain::{
    Ancestry, Archetype, Background, ClassDef, GearGrant, Item, MonsterChassis, MonsterFamily,
    Rulebook, Talent,
};

use crate::infrastructure::ports::{ContentError, RulesDataProvider};

/// The locale every install ships and every lookup can fall back to.
pub const DEFAULT_LOCALE: &str = "en";

/// Wire shape of `monsters.json`: two tables in one file.
#[derive(Debug, Default, Deserialize)]
struct MonsterCatalog {
    #[serde(default)]
    chassis: Vec<MonsterChassis>,
    #[serde(default)]
    families: Vec<MonsterFamily>,
}

pub struct FileRulesData {
    root: PathBuf,
    cache: DashMap<String, Arc<Rulebook>>,
}

impl FileRulesData {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: DashMap::new(),
        }
    }

    /// Locales already loaded and cached.
    pub fn cached_locales(&self) -> Vec<String> {
        self.cache.iter().map(|entry| entry.key().clone()).collect()
    }

    fn resolve_locale(&self, locale: &str) -> String {
        if self.root.join(locale).is_dir() {
            locale.to_string()
        } else {
            tracing::warn!(
                locale,
                fallback = DEFAULT_LOCALE,
                "Unknown rules locale, falling back"
            );
            DEFAULT_LOCALE.to_string()
        }
    }

    async fn read_catalog<T: DeserializeOwned>(
        &self,
        locale: &str,
        catalog: &'static str,
    ) -> Result<T, ContentError> {
        let path = self.root.join(locale).join(format!("{}.json", catalog));
        if !path.exists() {
            return Err(ContentError::MissingCatalog {
                locale: locale.to_string(),
                catalog,
            });
        }
        let raw = fs::read_to_string(&path).await?;
        serde_json::from_str(&raw).map_err(|err| {
            tracing::error!(
                catalog,
                locale,
                path = %path.display(),
                error = %err,
                "Catalog failed to parse"
            );
            ContentError::Json(err)
        })
    }

    async fn load_locale(&self, locale: &str) -> Result<Rulebook, ContentError> {
        let ancestries: Vec<Ancestry> = self.read_catalog(locale, "ancestries").await?;
        let backgrounds: Vec<Background> = self.read_catalog(locale, "backgrounds").await?;
        let archetypes: Vec<Archetype> = self.read_catalog(locale, "archetypes").await?;
        let classes: Vec<ClassDef> = self.read_catalog(locale, "classes").await?;
        let talents: Vec<Talent> = self.read_catalog(locale, "talents").await?;
        let items: Vec<Item> = self.read_catalog(locale, "items").await?;
        let monsters: MonsterCatalog = self.read_catalog(locale, "monsters").await?;

        let rulebook = Rulebook {
            ancestries,
            backgrounds,
            archetypes,
            classes,
            talents,
            items,
            chassis: monsters.chassis,
            families: monsters.families,
        };
        validate(&rulebook)?;

        tracing::info!(
            locale,
            ancestries = rulebook.ancestries.len(),
            archetypes = rulebook.archetypes.len(),
            classes = rulebook.classes.len(),
            talents = rulebook.talents.len(),
            items = rulebook.items.len(),
            "Loaded rules data"
        );
        Ok(rulebook)
    }
}

/// Cross-reference validation: broken links between catalogs are
/// integrity errors and must fail at load, not at the table.
fn validate(rulebook: &Rulebook) -> Result<(), ContentError> {
    for class in &rulebook.classes {
        for component in &class.components {
            if rulebook.archetype(component).is_none() {
                return Err(ContentError::Invalid {
                    catalog: "classes",
                    reason: format!(
                        "class '{}' references unknown archetype '{}'",
                        class.id, component
                    ),
                });
            }
        }
        for feat in &class.synergy_feats {
            if let Some(talent) = &feat.grant_talent {
                if rulebook.talent(talent).is_none() {
                    return Err(ContentError::Invalid {
                        catalog: "classes",
                        reason: format!(
                            "synergy feat '{}' grants unknown talent '{}'",
                            feat.name, talent
                        ),
                    });
                }
            }
        }
    }

    for background in &rulebook.backgrounds {
        for gear in &background.gear {
            if let GearGrant::Item { name } = gear {
                if rulebook.item(name).is_none() {
                    return Err(ContentError::Invalid {
                        catalog: "backgrounds",
                        reason: format!(
                            "background '{}' grants unknown item '{}'",
                            background.id, name
                        ),
                    });
                }
            }
        }
    }

    Ok(())
}

#[async_trait]
impl RulesDataProvider for FileRulesData {
    async fn rulebook(&self, locale: &str) -> Result<Arc<Rulebook>, ContentError> {
        let locale = self.resolve_locale(locale);
        if let Some(cached) = self.cache.get(locale.as_str()) {
            return Ok(cached.clone());
        }
        let rulebook = Arc::new(self.load_locale(&locale).await?);
        self.cache.insert(locale, rulebook.clone());
        Ok(rulebook)
    }
}
