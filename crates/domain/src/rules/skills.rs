//! Skill training aggregation over origins, talents, and synergy feats.

use std::str::FromStr;

use crate::aggregates::Character;
use crate::rulebook::Rulebook;
use crate::value_objects::{Modifier, SkillId, Stat, TrainingTier};

use super::modifier_sources;

/// One row of the skill table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillRating {
    pub skill: SkillId,
    /// How many distinct sources train the skill. Duplicates are legal
    /// and meaningful: two sources lift the tier to expert.
    pub sources: u8,
    pub tier: TrainingTier,
}

impl SkillRating {
    pub fn governing_stat(&self) -> Stat {
        self.skill.governing_stat()
    }

    pub fn die_label(&self) -> &'static str {
        self.tier.die_label()
    }
}

/// What a check with one skill rolls: `d20 + stat_mod + training die`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillCheckProfile {
    pub skill: SkillId,
    pub stat: Stat,
    pub stat_mod: i32,
    pub tier: TrainingTier,
}

impl SkillCheckProfile {
    pub fn die(&self) -> Option<u8> {
        self.tier.die()
    }
}

/// All twelve skills in sheet order with their training counts.
///
/// A fresh aggregation on every call. Unselected origins and ids the
/// rulebook does not know contribute nothing.
pub fn skill_ratings(character: &Character, rulebook: &Rulebook) -> Vec<SkillRating> {
    let mut counts = [0u8; SkillId::ALL.len()];
    let mut bump = |skill: SkillId| {
        if let Some(i) = SkillId::ALL.iter().position(|s| *s == skill) {
            counts[i] = counts[i].saturating_add(1);
        }
    };

    if let Some(background) = character
        .background_id()
        .and_then(|id| rulebook.background(id))
    {
        bump(background.skill);
    }

    if let Some((first, second)) = character.archetype_pair() {
        let mut ids = vec![first];
        // A pure pair names the same archetype twice; it trains once.
        if second != first {
            ids.push(second);
        }
        for id in ids {
            if let Some(archetype) = rulebook.archetype(id) {
                for skill in &archetype.trained_skills {
                    bump(*skill);
                }
            }
        }
    }

    for source in modifier_sources(character, rulebook) {
        match source.modifier {
            Modifier::SkillTraining { skill } => bump(*skill),
            Modifier::ChosenSkillTraining => {
                if let Some(skill) = source.choice.and_then(|name| SkillId::from_str(name).ok()) {
                    bump(skill);
                }
            }
            _ => {}
        }
    }

    SkillId::ALL
        .iter()
        .zip(counts)
        .map(|(skill, sources)| SkillRating {
            skill: *skill,
            sources,
            tier: TrainingTier::from_sources(sources),
        })
        .collect()
}

/// The check profile for a single skill.
pub fn skill_check_profile(
    character: &Character,
    rulebook: &Rulebook,
    skill: SkillId,
) -> SkillCheckProfile {
    let tier = skill_ratings(character, rulebook)
        .into_iter()
        .find(|rating| rating.skill == skill)
        .map(|rating| rating.tier)
        .unwrap_or(TrainingTier::Untrained);
    let stat = skill.governing_stat();
    SkillCheckProfile {
        skill,
        stat,
        stat_mod: character.stats().score(stat),
        tier,
    }
}
