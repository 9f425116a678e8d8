//! Talents: the purchasable abilities archetypes offer.
//!
//! Catalog talents live in rules data; a character owns [`KnownTalent`]
//! copies taken at grant time, so later catalog edits never rewrite a
//! saved sheet.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::Modifier;

/// What a choice-bearing talent binds to when taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceKind {
    /// One of the twelve skills.
    Skill,
    /// One of the six stats.
    Stat,
    /// A freeform property (damage type, terrain, and the like).
    Property,
}

/// Selection behavior flags on a catalog talent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalentFlags {
    /// May be taken more than once.
    #[serde(default)]
    pub repeatable: bool,
    /// Requires a recorded selection when taken.
    #[serde(default)]
    pub requires_choice: Option<ChoiceKind>,
}

/// A talent as it appears in an archetype's catalog.
///
/// Simple data struct with public fields; any combination of fields is a
/// valid talent, so there is no invariant to guard behind accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Talent {
    /// Display name; also the identity used for duplicate detection.
    pub name: String,
    pub description: String,
    /// Display cost tag (e.g. "2 sp"); synergy grants use "Free".
    pub cost: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub flags: TalentFlags,
}

impl Talent {
    pub fn new(name: impl Into<String>, description: impl Into<String>, cost: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            cost: cost.into(),
            modifiers: Vec::new(),
            flags: TalentFlags::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn repeatable(mut self) -> Self {
        self.flags.repeatable = true;
        self
    }

    pub fn with_choice(mut self, kind: ChoiceKind) -> Self {
        self.flags.requires_choice = Some(kind);
        self
    }
}

/// Which of the two creation picks a talent fills.
///
/// A Pure class draws both picks from its single archetype list; a Hybrid
/// ties the first pick to archetype A and the second to archetype B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationSlot {
    First,
    Second,
}

impl CreationSlot {
    pub fn other(self) -> Self {
        match self {
            CreationSlot::First => CreationSlot::Second,
            CreationSlot::Second => CreationSlot::First,
        }
    }
}

/// Where an owned talent came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TalentSource {
    /// Picked during character creation.
    Creation { slot: CreationSlot },
    /// Picked from an archetype list at level-up.
    Archetype { archetype_id: String },
    /// Auto-granted by a class synergy feat.
    Synergy { feat: String },
}

impl TalentSource {
    /// True when this talent was granted by the named synergy feat.
    pub fn is_synergy_for(&self, feat_name: &str) -> bool {
        matches!(self, TalentSource::Synergy { feat } if feat == feat_name)
    }

    /// True for creation picks in the given slot.
    pub fn is_creation_slot(&self, target: CreationSlot) -> bool {
        matches!(self, TalentSource::Creation { slot } if *slot == target)
    }
}

impl fmt::Display for TalentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TalentSource::Creation { .. } => write!(f, "Creation"),
            TalentSource::Archetype { archetype_id } => write!(f, "Archetype: {}", archetype_id),
            TalentSource::Synergy { feat } => write!(f, "Synergy: {}", feat),
        }
    }
}

/// A talent instance owned by a character.
///
/// A plain data copy of the catalog entry it was taken from, plus the
/// grant source and any recorded selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownTalent {
    pub name: String,
    pub source: TalentSource,
    pub cost: String,
    /// The recorded selection for choice-bearing talents.
    #[serde(default)]
    pub choice: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub flags: TalentFlags,
}

impl KnownTalent {
    /// Copies a catalog talent into an owned instance.
    pub fn from_catalog(talent: &Talent, source: TalentSource, choice: Option<String>) -> Self {
        Self {
            name: talent.name.clone(),
            source,
            cost: talent.cost.clone(),
            choice,
            modifiers: talent.modifiers.clone(),
            flags: talent.flags,
        }
    }

    /// Copies a catalog talent as a free synergy grant.
    pub fn synergy_grant(talent: &Talent, feat_name: &str, choice: Option<String>) -> Self {
        Self {
            name: talent.name.clone(),
            source: TalentSource::Synergy {
                feat: feat_name.to_string(),
            },
            cost: "Free".to_string(),
            choice,
            modifiers: talent.modifiers.clone(),
            flags: talent.flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{PoolKind, SkillId};

    #[test]
    fn test_known_talent_copies_catalog_data() {
        let talent = Talent::new("Iron Hide", "Thick skin.", "2 sp")
            .with_modifiers(vec![Modifier::pool_bonus(PoolKind::Hp, 2)]);
        let known = KnownTalent::from_catalog(
            &talent,
            TalentSource::Creation {
                slot: CreationSlot::First,
            },
            None,
        );
        assert_eq!(known.name, "Iron Hide");
        assert_eq!(known.cost, "2 sp");
        assert_eq!(known.modifiers, talent.modifiers);
    }

    #[test]
    fn test_synergy_grant_is_free_and_tagged() {
        let talent = Talent::new("Spell Parry", "Deflect with will.", "3 sp");
        let known = KnownTalent::synergy_grant(&talent, "Arcane Guard", None);
        assert_eq!(known.cost, "Free");
        assert!(known.source.is_synergy_for("Arcane Guard"));
        assert!(!known.source.is_synergy_for("Other Feat"));
        assert_eq!(known.source.to_string(), "Synergy: Arcane Guard");
    }

    #[test]
    fn test_choice_flag_round_trips() {
        let talent = Talent::new("Skill Focus", "Pick a skill.", "1 sp")
            .with_choice(ChoiceKind::Skill)
            .with_modifiers(vec![Modifier::ChosenSkillTraining]);
        let json = serde_json::to_string(&talent).ok();
        let back: Option<Talent> = json.as_deref().and_then(|j| serde_json::from_str(j).ok());
        assert_eq!(back.as_ref().map(|t| t.flags.requires_choice), Some(Some(ChoiceKind::Skill)));
        let known = KnownTalent::from_catalog(
            &talent,
            TalentSource::Creation {
                slot: CreationSlot::Second,
            },
            Some(SkillId::ArcanaAndLore.name().to_string()),
        );
        assert_eq!(known.choice.as_deref(), Some("Arcana & Lore"));
    }
}
