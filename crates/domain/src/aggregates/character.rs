//! The Character aggregate.
//!
//! One explicit aggregate owns everything about a character: selections,
//! owned talents and gear, derived pools, and play-time state. Fields are
//! `pub(crate)` so the rules modules can derive into them directly; outside
//! the crate all writes go through the mutation methods below, which is
//! what keeps the engine-owned fields (derived pools, defenses, `base_hp`)
//! out of callers' hands.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entities::{CreationSlot, Item, KnownTalent, Talent, TalentSource};
use crate::ids::CharacterId;
use crate::rulebook::Rulebook;
use crate::value_objects::{Condition, DefenseScore, Purse, StatBlock};

/// Engine-owned resource maxima, rewritten on every recompute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedPools {
    pub max_hp: i32,
    pub max_mp: i32,
    pub max_sta: i32,
    pub max_luck: i32,
    pub slots: i32,
}

/// Engine-owned defense block.
///
/// Dodge always exists; parry and block only while the matching equipment
/// is carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Defenses {
    pub dodge: DefenseScore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parry: Option<DefenseScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<DefenseScore>,
}

/// Player-adjusted current values, clamped into `0..=max` by the aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    pub hp: i32,
    pub mp: i32,
    pub sta: i32,
    pub luck: i32,
    pub xp: i32,
}

/// Result of a creation talent pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TalentSelectionOutcome {
    /// The slot was empty and now holds the talent.
    Selected,
    /// The slot held a different talent, which was replaced.
    Replaced { previous: String },
    /// The other slot already holds this talent and it is not repeatable.
    DuplicateRejected { name: String },
}

/// The maximum level a character can reach.
pub const MAX_LEVEL: u8 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    // Identity
    pub(crate) id: Option<CharacterId>,
    pub(crate) name: String,
    pub(crate) level: u8,
    pub(crate) notes: String,

    // Origin selections
    pub(crate) ancestry_id: Option<String>,
    pub(crate) ancestry_feat: Option<String>,
    pub(crate) ancestry_choice: Option<String>,
    pub(crate) boon: Option<String>,
    pub(crate) background_id: Option<String>,

    // Class selections
    pub(crate) archetype_a: Option<String>,
    pub(crate) archetype_b: Option<String>,
    pub(crate) class_id: Option<String>,
    pub(crate) class_name: Option<String>,

    // Stats
    pub(crate) stats: StatBlock,

    // Owned content
    pub(crate) talents: Vec<KnownTalent>,
    pub(crate) inventory: Vec<Item>,
    pub(crate) purse: Purse,

    // Engine-owned derivations
    pub(crate) derived: DerivedPools,
    pub(crate) defenses: Defenses,
    pub(crate) armor_score: i32,

    // Play-time state
    pub(crate) vitals: Vitals,
    pub(crate) conditions: BTreeSet<Condition>,

    // Frozen accumulator: level-1 HP plus every applied level-up roll.
    // Later CON edits never rewrite rolls already banked.
    pub(crate) base_hp: i32,

    // Stamped by the store adapter on save
    pub(crate) created_at: Option<DateTime<Utc>>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

impl Character {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Create a blank level-1 character with the given name.
    ///
    /// # Example
    ///
    /// ```
    /// use mythforge_domain::aggregates::Character;
    ///
    /// let character = Character::new("Brennic");
    /// assert_eq!(character.name(), "Brennic");
    /// assert_eq!(character.level(), 1);
    /// assert!(character.id().is_none());
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            level: 1,
            notes: String::new(),
            ancestry_id: None,
            ancestry_feat: None,
            ancestry_choice: None,
            boon: None,
            background_id: None,
            archetype_a: None,
            archetype_b: None,
            class_id: None,
            class_name: None,
            stats: StatBlock::default(),
            talents: Vec::new(),
            inventory: Vec::new(),
            purse: Purse::default(),
            derived: DerivedPools::default(),
            defenses: Defenses::default(),
            armor_score: 0,
            vitals: Vitals::default(),
            conditions: BTreeSet::new(),
            base_hp: 0,
            created_at: None,
            updated_at: None,
        }
    }

    // =========================================================================
    // Accessors (read-only)
    // =========================================================================

    #[inline]
    pub fn id(&self) -> Option<CharacterId> {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn ancestry_id(&self) -> Option<&str> {
        self.ancestry_id.as_deref()
    }

    pub fn ancestry_feat(&self) -> Option<&str> {
        self.ancestry_feat.as_deref()
    }

    pub fn ancestry_choice(&self) -> Option<&str> {
        self.ancestry_choice.as_deref()
    }

    pub fn boon(&self) -> Option<&str> {
        self.boon.as_deref()
    }

    pub fn background_id(&self) -> Option<&str> {
        self.background_id.as_deref()
    }

    /// Both archetype ids, once both have been chosen.
    pub fn archetype_pair(&self) -> Option<(&str, &str)> {
        match (&self.archetype_a, &self.archetype_b) {
            (Some(a), Some(b)) => Some((a.as_str(), b.as_str())),
            _ => None,
        }
    }

    pub fn archetype_a(&self) -> Option<&str> {
        self.archetype_a.as_deref()
    }

    pub fn archetype_b(&self) -> Option<&str> {
        self.archetype_b.as_deref()
    }

    /// True when both archetype slots hold the same archetype.
    pub fn is_pure(&self) -> bool {
        matches!(self.archetype_pair(), Some((a, b)) if a == b)
    }

    pub fn class_id(&self) -> Option<&str> {
        self.class_id.as_deref()
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    #[inline]
    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut StatBlock {
        &mut self.stats
    }

    pub fn talents(&self) -> &[KnownTalent] {
        &self.talents
    }

    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    pub fn purse(&self) -> &Purse {
        &self.purse
    }

    pub fn purse_mut(&mut self) -> &mut Purse {
        &mut self.purse
    }

    #[inline]
    pub fn derived(&self) -> &DerivedPools {
        &self.derived
    }

    #[inline]
    pub fn defenses(&self) -> &Defenses {
        &self.defenses
    }

    #[inline]
    pub fn armor_score(&self) -> i32 {
        self.armor_score
    }

    #[inline]
    pub fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    pub fn conditions(&self) -> &BTreeSet<Condition> {
        &self.conditions
    }

    #[inline]
    pub fn base_hp(&self) -> i32 {
        self.base_hp
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Stamps persistence metadata. Store adapters call this on save:
    /// the id sticks for good, `created_at` is set once, `updated_at`
    /// moves every time.
    pub fn mark_saved(&mut self, id: CharacterId, now: DateTime<Utc>) {
        self.id = Some(id);
        if self.created_at.is_none() {
            self.created_at = Some(now);
        }
        self.updated_at = Some(now);
    }

    pub fn has_talent(&self, name: &str) -> bool {
        self.talents.iter().any(|talent| talent.name == name)
    }

    /// Slots currently consumed by carried gear.
    pub fn slots_used(&self) -> i32 {
        self.inventory.iter().map(|item| i32::from(item.bulk)).sum()
    }

    // =========================================================================
    // Builder methods (used by adapters and tests)
    // =========================================================================

    pub fn with_id(mut self, id: CharacterId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level.clamp(1, MAX_LEVEL);
        self
    }

    pub fn with_stats(mut self, stats: StatBlock) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_archetypes(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.archetype_a = Some(a.into());
        self.archetype_b = Some(b.into());
        self
    }

    pub fn with_ancestry(mut self, ancestry_id: impl Into<String>) -> Self {
        self.ancestry_id = Some(ancestry_id.into());
        self
    }

    pub fn with_background(mut self, background_id: impl Into<String>) -> Self {
        self.background_id = Some(background_id.into());
        self
    }

    pub fn with_base_hp(mut self, base_hp: i32) -> Self {
        self.base_hp = base_hp;
        self
    }

    // =========================================================================
    // Selections (wizard-facing mutations)
    // =========================================================================

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Selecting an ancestry clears any feat, feat choice, and boon taken
    /// under the previous one.
    pub fn select_ancestry(&mut self, ancestry_id: impl Into<String>) {
        let ancestry_id = ancestry_id.into();
        if self.ancestry_id.as_deref() != Some(ancestry_id.as_str()) {
            self.ancestry_feat = None;
            self.ancestry_choice = None;
            self.boon = None;
        }
        self.ancestry_id = Some(ancestry_id);
    }

    /// Selecting a feat clears the recorded choice from the previous feat.
    pub fn select_ancestry_feat(&mut self, feat_name: impl Into<String>) {
        let feat_name = feat_name.into();
        if self.ancestry_feat.as_deref() != Some(feat_name.as_str()) {
            self.ancestry_choice = None;
        }
        self.ancestry_feat = Some(feat_name);
    }

    pub fn record_ancestry_choice(&mut self, choice: impl Into<String>) {
        self.ancestry_choice = Some(choice.into());
    }

    pub fn select_boon(&mut self, boon_name: impl Into<String>) {
        self.boon = Some(boon_name.into());
    }

    pub fn select_background(&mut self, background_id: impl Into<String>) {
        self.background_id = Some(background_id.into());
    }

    /// Sets the archetype pair. Changing the pair drops creation talent
    /// picks (they belonged to the old lists) and the cached class.
    pub fn select_archetypes(&mut self, a: impl Into<String>, b: impl Into<String>) {
        let a = a.into();
        let b = b.into();
        let unchanged =
            self.archetype_a.as_deref() == Some(a.as_str()) && self.archetype_b.as_deref() == Some(b.as_str());
        if !unchanged {
            self.talents
                .retain(|talent| !matches!(talent.source, TalentSource::Creation { .. }));
            self.class_id = None;
            self.class_name = None;
        }
        self.archetype_a = Some(a);
        self.archetype_b = Some(b);
    }

    /// Refreshes the cached class id and name from the pairing lookup.
    ///
    /// Leaves the cache empty when the pair is incomplete or unknown to
    /// the rulebook.
    pub fn refresh_class(&mut self, rulebook: &Rulebook) {
        let class = self
            .archetype_pair()
            .and_then(|(a, b)| rulebook.class_for_pair(a, b));
        self.class_id = class.map(|c| c.id.clone());
        self.class_name = class.map(|c| c.name.clone());
    }

    // =========================================================================
    // Talents
    // =========================================================================

    /// Sets or replaces a creation talent pick.
    ///
    /// The two creation picks are ordinary owned talents whose source
    /// records the slot they fill, which caps them at two. A duplicate of
    /// the other slot's pick is rejected unless the talent is repeatable.
    /// `choice` records the selection for choice-bearing talents.
    pub fn select_creation_talent(
        &mut self,
        slot: CreationSlot,
        talent: &Talent,
        choice: Option<String>,
    ) -> TalentSelectionOutcome {
        let duplicate_in_other_slot = self
            .talents
            .iter()
            .any(|t| t.source.is_creation_slot(slot.other()) && t.name == talent.name);
        if duplicate_in_other_slot && !talent.flags.repeatable {
            return TalentSelectionOutcome::DuplicateRejected {
                name: talent.name.clone(),
            };
        }

        let incoming = KnownTalent::from_catalog(talent, TalentSource::Creation { slot }, choice);
        let existing = self
            .talents
            .iter()
            .position(|t| t.source.is_creation_slot(slot));
        match existing {
            Some(index) => {
                let previous = self.talents[index].name.clone();
                self.talents[index] = incoming;
                if previous == talent.name {
                    TalentSelectionOutcome::Selected
                } else {
                    TalentSelectionOutcome::Replaced { previous }
                }
            }
            None => {
                self.talents.push(incoming);
                TalentSelectionOutcome::Selected
            }
        }
    }

    /// Appends an owned talent.
    pub fn grant_talent(&mut self, talent: KnownTalent) {
        self.talents.push(talent);
    }

    /// Removes the first owned talent with the given name.
    pub fn remove_talent(&mut self, name: &str) -> Option<KnownTalent> {
        let index = self.talents.iter().position(|talent| talent.name == name)?;
        Some(self.talents.remove(index))
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    /// Removes the first carried item with the given name.
    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        let index = self.inventory.iter().position(|item| item.name == name)?;
        Some(self.inventory.remove(index))
    }

    // =========================================================================
    // Conditions
    // =========================================================================

    /// Returns false when the condition was already active.
    pub fn apply_condition(&mut self, condition: Condition) -> bool {
        self.conditions.insert(condition)
    }

    /// Returns false when the condition was not active.
    pub fn clear_condition(&mut self, condition: Condition) -> bool {
        self.conditions.remove(&condition)
    }

    // =========================================================================
    // Vitals
    // =========================================================================

    /// Adjusts current HP by `delta`, clamped into `0..=max_hp`.
    pub fn adjust_hp(&mut self, delta: i32) -> i32 {
        self.vitals.hp = (self.vitals.hp + delta).clamp(0, self.derived.max_hp);
        self.vitals.hp
    }

    /// Adjusts current MP by `delta`, clamped into `0..=max_mp`.
    pub fn adjust_mp(&mut self, delta: i32) -> i32 {
        self.vitals.mp = (self.vitals.mp + delta).clamp(0, self.derived.max_mp);
        self.vitals.mp
    }

    /// Adjusts current stamina by `delta`, clamped into `0..=max_sta`.
    pub fn adjust_sta(&mut self, delta: i32) -> i32 {
        self.vitals.sta = (self.vitals.sta + delta).clamp(0, self.derived.max_sta);
        self.vitals.sta
    }

    /// Adjusts current luck by `delta`, clamped into `0..=max_luck`.
    pub fn adjust_luck(&mut self, delta: i32) -> i32 {
        self.vitals.luck = (self.vitals.luck + delta).clamp(0, self.derived.max_luck);
        self.vitals.luck
    }

    /// Adds experience; totals never drop below zero.
    pub fn award_xp(&mut self, amount: i32) -> i32 {
        self.vitals.xp = (self.vitals.xp + amount).max(0);
        self.vitals.xp
    }

    /// Sets every current vital to its derived maximum.
    pub fn refill_vitals(&mut self) {
        self.vitals.hp = self.derived.max_hp;
        self.vitals.mp = self.derived.max_mp;
        self.vitals.sta = self.derived.max_sta;
        self.vitals.luck = self.derived.max_luck;
    }

    /// Clamps stored vitals into their derived ranges.
    ///
    /// Called after a recompute so a shrunken maximum pulls the current
    /// value down with it.
    pub(crate) fn clamp_vitals(&mut self) {
        self.vitals.hp = self.vitals.hp.clamp(0, self.derived.max_hp);
        self.vitals.mp = self.vitals.mp.clamp(0, self.derived.max_mp);
        self.vitals.sta = self.vitals.sta.clamp(0, self.derived.max_sta);
        self.vitals.luck = self.vitals.luck.clamp(0, self.derived.max_luck);
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

/// Intermediate format for serialization that matches the wire format.
///
/// Every field is defaulted on read so partial or older files still load;
/// unknown fields are ignored.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CharacterWireFormat {
    #[serde(default)]
    id: Option<CharacterId>,
    #[serde(default)]
    name: String,
    #[serde(default = "default_level")]
    level: u8,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    ancestry_id: Option<String>,
    #[serde(default)]
    ancestry_feat: Option<String>,
    #[serde(default)]
    ancestry_choice: Option<String>,
    #[serde(default)]
    boon: Option<String>,
    #[serde(default)]
    background_id: Option<String>,
    #[serde(default)]
    archetype_a: Option<String>,
    #[serde(default)]
    archetype_b: Option<String>,
    #[serde(default)]
    class_id: Option<String>,
    #[serde(default)]
    class_name: Option<String>,
    #[serde(default)]
    stats: StatBlock,
    #[serde(default)]
    talents: Vec<KnownTalent>,
    #[serde(default)]
    inventory: Vec<Item>,
    #[serde(default)]
    purse: Purse,
    #[serde(default)]
    derived: DerivedPools,
    #[serde(default)]
    defenses: Defenses,
    #[serde(default)]
    armor_score: i32,
    #[serde(default)]
    vitals: Vitals,
    #[serde(default)]
    active_conditions: BTreeSet<Condition>,
    #[serde(default)]
    base_hp: i32,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

fn default_level() -> u8 {
    1
}

impl Serialize for Character {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wire = CharacterWireFormat {
            id: self.id,
            name: self.name.clone(),
            level: self.level,
            notes: self.notes.clone(),
            ancestry_id: self.ancestry_id.clone(),
            ancestry_feat: self.ancestry_feat.clone(),
            ancestry_choice: self.ancestry_choice.clone(),
            boon: self.boon.clone(),
            background_id: self.background_id.clone(),
            archetype_a: self.archetype_a.clone(),
            archetype_b: self.archetype_b.clone(),
            class_id: self.class_id.clone(),
            class_name: self.class_name.clone(),
            stats: self.stats.clone(),
            talents: self.talents.clone(),
            inventory: self.inventory.clone(),
            purse: self.purse,
            derived: self.derived,
            defenses: self.defenses,
            armor_score: self.armor_score,
            vitals: self.vitals,
            active_conditions: self.conditions.clone(),
            base_hp: self.base_hp,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Character {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = CharacterWireFormat::deserialize(deserializer)?;
        Ok(Character {
            id: wire.id,
            name: wire.name,
            level: wire.level.clamp(1, MAX_LEVEL),
            notes: wire.notes,
            ancestry_id: wire.ancestry_id,
            ancestry_feat: wire.ancestry_feat,
            ancestry_choice: wire.ancestry_choice,
            boon: wire.boon,
            background_id: wire.background_id,
            archetype_a: wire.archetype_a,
            archetype_b: wire.archetype_b,
            class_id: wire.class_id,
            class_name: wire.class_name,
            stats: wire.stats,
            talents: wire.talents,
            inventory: wire.inventory,
            purse: wire.purse,
            derived: wire.derived,
            defenses: wire.defenses,
            armor_score: wire.armor_score,
            vitals: wire.vitals,
            conditions: wire.active_conditions,
            base_hp: wire.base_hp,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
