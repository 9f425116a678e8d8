//! The character creation wizard.
//!
//! Each step validates on its own so a UI can gate pages independently;
//! `finish` re-runs every gate, grants the background package, derives
//! the sheet, and performs the first save. The draft itself is edited
//! through the aggregate's methods between steps.

mod error;

pub use error::CreationError;

use std::str::FromStr;
use std::sync::Arc;

use mythforge_domain::{
    recompute_all, Character, CharacterId, ChoiceKind, CreationSlot, FeatChoice, GearGrant, Purse,
    Rulebook, SkillId, Stat,
};

use crate::infrastructure::content::DEFAULT_LOCALE;
use crate::infrastructure::ports::{CharacterStore, RulesDataProvider};

/// Container for the creation wizard's operations.
pub struct CharacterCreation {
    store: Arc<dyn CharacterStore>,
    rules: Arc<dyn RulesDataProvider>,
    locale: String,
}

impl CharacterCreation {
    pub fn new(store: Arc<dyn CharacterStore>, rules: Arc<dyn RulesDataProvider>) -> Self {
        Self {
            store,
            rules,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Opens the wizard with a blank level-1 draft.
    pub fn start(&self, name: &str) -> Character {
        let name = if name.trim().is_empty() {
            "New Character"
        } else {
            name
        };
        tracing::debug!(name, "Started character creation");
        Character::new(name)
    }

    /// The stat step: all six assigned, and either every value inside
    /// the manual band or the whole line matching a standard array.
    pub fn validate_stats(&self, character: &Character) -> Result<(), CreationError> {
        let stats = character.stats();
        if !stats.is_complete() {
            return Err(CreationError::StatsNotLegal(format!(
                "{} of 6 stats assigned",
                stats.assigned_count()
            )));
        }
        if stats.matches_standard_array() {
            return Ok(());
        }
        let outliers = stats.out_of_manual_range();
        if !outliers.is_empty() {
            let listed = outliers
                .iter()
                .map(|(stat, value)| format!("{} {:+}", stat.abbreviation(), value))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(CreationError::StatsNotLegal(format!(
                "outside the manual band: {}",
                listed
            )));
        }
        Ok(())
    }

    /// The origin step: ancestry, heritage feat (plus its selection when
    /// one is called for), versatile boon, and background.
    pub async fn validate_origin(&self, character: &Character) -> Result<(), CreationError> {
        let rulebook = self.rules.rulebook(&self.locale).await?;

        let ancestry_id = character
            .ancestry_id()
            .ok_or(CreationError::MissingSelection("an ancestry"))?;
        let ancestry =
            rulebook
                .ancestry(ancestry_id)
                .ok_or_else(|| CreationError::UnknownSelection {
                    entity: "ancestry",
                    name: ancestry_id.to_string(),
                })?;

        let feat_name = character
            .ancestry_feat()
            .ok_or(CreationError::MissingSelection("a heritage feat"))?;
        let feat = ancestry
            .feat(feat_name)
            .ok_or_else(|| CreationError::UnknownSelection {
                entity: "heritage feat",
                name: feat_name.to_string(),
            })?;
        match &feat.choice {
            FeatChoice::None => {}
            FeatChoice::Skill => {
                let choice = character.ancestry_choice().ok_or_else(|| {
                    CreationError::SelectionRequired {
                        name: feat.name.clone(),
                    }
                })?;
                SkillId::from_str(choice).map_err(|_| CreationError::UnknownSelection {
                    entity: "skill",
                    name: choice.to_string(),
                })?;
            }
            FeatChoice::Element { options } => {
                let choice = character.ancestry_choice().ok_or_else(|| {
                    CreationError::SelectionRequired {
                        name: feat.name.clone(),
                    }
                })?;
                if !options.iter().any(|option| option == choice) {
                    return Err(CreationError::UnknownSelection {
                        entity: "element",
                        name: choice.to_string(),
                    });
                }
            }
        }

        let boon_name = character
            .boon()
            .ok_or(CreationError::MissingSelection("a versatile boon"))?;
        if ancestry.boon(boon_name).is_none() {
            return Err(CreationError::UnknownSelection {
                entity: "boon",
                name: boon_name.to_string(),
            });
        }

        let background_id = character
            .background_id()
            .ok_or(CreationError::MissingSelection("a background"))?;
        if rulebook.background(background_id).is_none() {
            return Err(CreationError::UnknownSelection {
                entity: "background",
                name: background_id.to_string(),
            });
        }

        Ok(())
    }

    /// The class step: the archetype pair resolves to a class, both
    /// creation picks are filled from the right lists, and the cached
    /// class columns are refreshed on the draft.
    pub async fn validate_class(&self, character: &mut Character) -> Result<(), CreationError> {
        let rulebook = self.rules.rulebook(&self.locale).await?;

        let (first_id, second_id) = character
            .archetype_pair()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .ok_or(CreationError::MissingSelection("an archetype pair"))?;
        for id in [&first_id, &second_id] {
            if rulebook.archetype(id).is_none() {
                return Err(CreationError::UnknownSelection {
                    entity: "archetype",
                    name: id.to_string(),
                });
            }
        }
        if rulebook.class_for_pair(&first_id, &second_id).is_none() {
            return Err(CreationError::UnknownSelection {
                entity: "class pairing",
                name: format!("{} + {}", first_id, second_id),
            });
        }

        self.check_creation_picks(character, &rulebook, &first_id, &second_id)?;

        character.refresh_class(&rulebook);
        Ok(())
    }

    /// Both slots filled, each pick drawn from its slot's archetype list,
    /// selections recorded where the talent calls for one.
    fn check_creation_picks(
        &self,
        character: &Character,
        rulebook: &Rulebook,
        first_id: &str,
        second_id: &str,
    ) -> Result<(), CreationError> {
        for slot in [CreationSlot::First, CreationSlot::Second] {
            let archetype_id = match slot {
                CreationSlot::First => first_id,
                CreationSlot::Second => second_id,
            };
            let owned = character
                .talents()
                .iter()
                .find(|talent| talent.source.is_creation_slot(slot))
                .ok_or(match slot {
                    CreationSlot::First => {
                        CreationError::MissingSelection("the first creation talent")
                    }
                    CreationSlot::Second => {
                        CreationError::MissingSelection("the second creation talent")
                    }
                })?;

            // Resolution can only miss here when the draft was edited
            // against different rules data than it is validated with.
            let archetype = rulebook.archetype(archetype_id).ok_or_else(|| {
                CreationError::UnknownSelection {
                    entity: "archetype",
                    name: archetype_id.to_string(),
                }
            })?;
            let catalog =
                archetype
                    .talent(&owned.name)
                    .ok_or_else(|| CreationError::TalentNotAvailable {
                        name: owned.name.clone(),
                    })?;

            match catalog.flags.requires_choice {
                None => {}
                Some(kind) => {
                    let choice =
                        owned
                            .choice
                            .as_deref()
                            .ok_or_else(|| CreationError::SelectionRequired {
                                name: owned.name.clone(),
                            })?;
                    match kind {
                        ChoiceKind::Skill => {
                            SkillId::from_str(choice).map_err(|_| {
                                CreationError::UnknownSelection {
                                    entity: "skill",
                                    name: choice.to_string(),
                                }
                            })?;
                        }
                        ChoiceKind::Stat => {
                            Stat::from_str(choice).map_err(|_| {
                                CreationError::UnknownSelection {
                                    entity: "stat",
                                    name: choice.to_string(),
                                }
                            })?;
                        }
                        ChoiceKind::Property => {}
                    }
                }
            }
        }
        Ok(())
    }

    /// Runs every gate, grants the background package, derives the sheet,
    /// rests the character to full, and saves.
    pub async fn finish(&self, mut character: Character) -> Result<CharacterId, CreationError> {
        self.validate_stats(&character)?;
        self.validate_origin(&character).await?;
        self.validate_class(&mut character).await?;

        let rulebook = self.rules.rulebook(&self.locale).await?;
        if let Some(background_id) = character.background_id().map(str::to_string) {
            if let Some(background) = rulebook.background(&background_id) {
                for grant in background.gear.clone() {
                    match grant {
                        GearGrant::Item { name } => match rulebook.item(&name) {
                            Some(item) => character.add_item(item.clone()),
                            None => {
                                tracing::debug!(item = %name, "Skipped unknown background item")
                            }
                        },
                        GearGrant::Coin {
                            gold,
                            silver,
                            copper,
                        } => {
                            character.purse_mut().earn(Purse::new(gold, silver, copper));
                        }
                    }
                }
            }
        }

        recompute_all(&mut character, &rulebook);
        character.refill_vitals();

        let id = self.store.save(&character).await?;
        tracing::info!(
            character_id = %id,
            name = %character.name(),
            class = character.class_name().unwrap_or("unresolved"),
            "Character creation finished"
        );
        Ok(id)
    }
}
