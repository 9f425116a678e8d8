//! The derivation engine: pure rules math over a character and a rulebook.
//!
//! Every pass here is idempotent. Derived values are rebuilt from their
//! baselines and every active source on each call, so running a recompute
//! twice in a row always lands on the same numbers. Missing rules data is
//! the data-not-ready case and makes a pass a silent no-op; broken
//! cross-references inside the data are integrity errors and fail loudly.

pub mod defenses;
pub mod level_up;
pub mod pools;
pub mod skills;
pub mod talents;

pub use defenses::{armor_score, recompute_defenses};
pub use level_up::{HpRoll, LevelUpReport, LevelUpSession, LevelUpState, TalentDecision};
pub use pools::{hit_die_for_pair, recompute_pools};
pub use skills::{skill_check_profile, skill_ratings, SkillCheckProfile, SkillRating};
pub use talents::{
    pending_synergy_grant, resolve_synergy_grant, valid_talent_options, SynergyGrant,
};

use crate::aggregates::Character;
use crate::entities::Archetype;
use crate::rulebook::Rulebook;
use crate::value_objects::Modifier;

/// Runs every stored derivation in order: pools, then defenses, then a
/// vitals clamp so a shrunken maximum pulls its current value down.
///
/// Skill ratings are derived on demand by [`skill_ratings`] and never
/// stored on the character.
pub fn recompute_all(character: &mut Character, rulebook: &Rulebook) {
    pools::recompute_pools(character, rulebook);
    defenses::recompute_defenses(character, rulebook);
    character.clamp_vitals();
}

/// The character's archetype pair resolved against the rulebook.
///
/// `None` is the data-not-ready case: either slot unchosen, or an id the
/// rulebook does not know.
pub(crate) fn resolved_pair<'a>(
    character: &Character,
    rulebook: &'a Rulebook,
) -> Option<(&'a Archetype, &'a Archetype)> {
    let (a, b) = character.archetype_pair()?;
    Some((rulebook.archetype(a)?, rulebook.archetype(b)?))
}

/// One modifier with the selection recorded on its source, if any.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ActiveModifier<'a> {
    pub modifier: &'a Modifier,
    /// The owning source's recorded choice (talent choice, ancestry feat
    /// selection). Resolves `Modifier::ChosenSkillTraining`.
    pub choice: Option<&'a str>,
}

/// Collects every active modifier in derivation order: ancestry (selected
/// feat, then selected boon), owned talents, then the class's online
/// synergy feats.
///
/// Sources the character has not selected simply contribute nothing; this
/// helper never fails.
pub(crate) fn modifier_sources<'a>(
    character: &'a Character,
    rulebook: &'a Rulebook,
) -> Vec<ActiveModifier<'a>> {
    let mut out = Vec::new();

    if let Some(ancestry) = character.ancestry_id().and_then(|id| rulebook.ancestry(id)) {
        if let Some(feat) = character.ancestry_feat().and_then(|name| ancestry.feat(name)) {
            for modifier in &feat.modifiers {
                out.push(ActiveModifier {
                    modifier,
                    choice: character.ancestry_choice(),
                });
            }
        }
        if let Some(boon) = character.boon().and_then(|name| ancestry.boon(name)) {
            for modifier in &boon.modifiers {
                out.push(ActiveModifier {
                    modifier,
                    choice: None,
                });
            }
        }
    }

    for talent in character.talents() {
        for modifier in &talent.modifiers {
            out.push(ActiveModifier {
                modifier,
                choice: talent.choice.as_deref(),
            });
        }
    }

    if let Some((a, b)) = character.archetype_pair() {
        if let Some(class) = rulebook.class_for_pair(a, b) {
            for feat in class.online_synergy_feats(character.level()) {
                for modifier in &feat.modifiers {
                    out.push(ActiveModifier {
                        modifier,
                        choice: None,
                    });
                }
            }
        }
    }

    out
}
