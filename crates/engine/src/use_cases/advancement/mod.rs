//! Level-up orchestration.
//!
//! A level-up collects several decisions across calls, so in-flight
//! sessions live here keyed by character id until they are applied or
//! cancelled. The character itself is only loaded, mutated, and saved
//! inside `apply`; everything before that works on the session.

mod error;

pub use error::AdvancementError;

use std::sync::Arc;

use dashmap::DashMap;
use rand::Rng;

use mythforge_domain::{
    Character, CharacterId, DomainError, HpRoll, LevelUpReport, LevelUpSession, LevelUpState,
    Stat, TalentDecision,
};

use crate::infrastructure::content::DEFAULT_LOCALE;
use crate::infrastructure::ports::{CharacterStore, RulesDataProvider};

/// A session snapshot for the caller to present between steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUpOutlook {
    pub next_level: u8,
    pub hit_die: u8,
    /// True when this level also grants a +1 stat boost.
    pub milestone: bool,
    /// Talent names on the level's menu.
    pub options: Vec<String>,
}

/// Container for level-up and experience operations.
pub struct Advancement {
    store: Arc<dyn CharacterStore>,
    rules: Arc<dyn RulesDataProvider>,
    locale: String,
    sessions: DashMap<CharacterId, LevelUpSession>,
}

impl Advancement {
    pub fn new(store: Arc<dyn CharacterStore>, rules: Arc<dyn RulesDataProvider>) -> Self {
        Self {
            store,
            rules,
            locale: DEFAULT_LOCALE.to_string(),
            sessions: DashMap::new(),
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    async fn load(&self, id: CharacterId) -> Result<Character, AdvancementError> {
        self.store
            .get(id)
            .await?
            .ok_or(AdvancementError::CharacterNotFound(id))
    }

    /// Opens (or restarts) a session for the character's next level.
    ///
    /// Returns `Ok(None)` while the archetype pair is unchosen or unknown
    /// to the rulebook; nothing can be offered yet, and that is not an
    /// error. The level cap, by contrast, is a real constraint.
    pub async fn start(&self, id: CharacterId) -> Result<Option<LevelUpOutlook>, AdvancementError> {
        let character = self.load(id).await?;
        let rulebook = self.rules.rulebook(&self.locale).await?;

        let pair_resolves = character
            .archetype_pair()
            .is_some_and(|(a, b)| rulebook.archetype(a).is_some() && rulebook.archetype(b).is_some());
        if !pair_resolves {
            tracing::debug!(character_id = %id, "Level-up unavailable until the archetype pair resolves");
            return Ok(None);
        }

        let session = LevelUpSession::begin(&character, &rulebook)?;
        let outlook = LevelUpOutlook {
            next_level: session.next_level(),
            hit_die: session.hit_die(),
            milestone: session.is_milestone(),
            options: session.eligible_talents().map(str::to_string).collect(),
        };
        if self.sessions.insert(id, session).is_some() {
            tracing::debug!(character_id = %id, "Restarted an in-flight level-up session");
        }
        tracing::info!(
            character_id = %id,
            next_level = outlook.next_level,
            milestone = outlook.milestone,
            "Level-up session opened"
        );
        Ok(Some(outlook))
    }

    /// Rolls the level's hit points with a real die. Single-shot.
    pub fn roll_hp(&self, id: CharacterId) -> Result<HpRoll, AdvancementError> {
        let mut session = self
            .sessions
            .get_mut(&id)
            .ok_or(AdvancementError::NoSession(id))?;
        let roll = session.roll_hp(|die| rand::thread_rng().gen_range(1..=die))?;
        tracing::debug!(
            character_id = %id,
            die = roll.die,
            face = roll.face,
            gained = roll.gained,
            "Rolled level-up hit points"
        );
        Ok(roll)
    }

    /// Picks the level's talent by name from the session's menu.
    pub async fn choose_talent(
        &self,
        id: CharacterId,
        name: &str,
    ) -> Result<TalentDecision, AdvancementError> {
        let rulebook = self.rules.rulebook(&self.locale).await?;
        let talent = rulebook.talent(name).ok_or_else(|| {
            DomainError::validation(format!("'{}' is not on the level-up menu", name))
        })?;
        let mut session = self
            .sessions
            .get_mut(&id)
            .ok_or(AdvancementError::NoSession(id))?;
        Ok(session.choose_talent(talent)?)
    }

    /// Supplies the selection a choice-bearing pick is waiting on.
    pub fn resolve_choice(&self, id: CharacterId, selection: &str) -> Result<(), AdvancementError> {
        let mut session = self
            .sessions
            .get_mut(&id)
            .ok_or(AdvancementError::NoSession(id))?;
        Ok(session.resolve_choice(selection)?)
    }

    /// Records the milestone +1 stat boost.
    pub fn choose_stat_boost(&self, id: CharacterId, stat: Stat) -> Result<(), AdvancementError> {
        let mut session = self
            .sessions
            .get_mut(&id)
            .ok_or(AdvancementError::NoSession(id))?;
        Ok(session.choose_stat_boost(stat)?)
    }

    /// Where the session stands.
    pub fn state(&self, id: CharacterId) -> Result<LevelUpState, AdvancementError> {
        self.sessions
            .get(&id)
            .map(|session| session.state())
            .ok_or(AdvancementError::NoSession(id))
    }

    /// Applies a ready session to the character and saves.
    ///
    /// A session that fails to apply is discarded; the character is
    /// untouched and a fresh `start` reflects whatever changed under it.
    pub async fn apply(&self, id: CharacterId) -> Result<LevelUpReport, AdvancementError> {
        let session = match self
            .sessions
            .remove_if(&id, |_, session| session.state() == LevelUpState::Ready)
        {
            Some((_, session)) => session,
            None if self.sessions.contains_key(&id) => {
                return Err(DomainError::invalid_state_transition(
                    "Level-up is still collecting decisions",
                )
                .into());
            }
            None => return Err(AdvancementError::NoSession(id)),
        };

        let mut character = self.load(id).await?;
        let rulebook = self.rules.rulebook(&self.locale).await?;
        let report = match session.apply(&mut character, &rulebook) {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(
                    character_id = %id,
                    error = %e,
                    "Level-up could not be applied; session discarded"
                );
                return Err(e.into());
            }
        };
        self.store.save(&character).await?;

        tracing::info!(
            character_id = %id,
            new_level = report.new_level,
            hp_gained = report.hp_gained,
            talent = %report.talent_added,
            "Level-up applied"
        );
        Ok(report)
    }

    /// Drops an in-flight session. The character was never touched.
    pub fn cancel(&self, id: CharacterId) -> bool {
        let dropped = self.sessions.remove(&id).is_some();
        if dropped {
            tracing::debug!(character_id = %id, "Level-up session cancelled");
        }
        dropped
    }

    /// Adds experience and saves; totals floor at zero.
    pub async fn award_xp(&self, id: CharacterId, amount: i32) -> Result<i32, AdvancementError> {
        let mut character = self.load(id).await?;
        let total = character.award_xp(amount);
        self.store.save(&character).await?;
        tracing::debug!(character_id = %id, amount, total, "Experience awarded");
        Ok(total)
    }
}
