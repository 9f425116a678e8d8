//! Fixture loading and prebuilt rules data for engine tests.
//!
//! `sample_rulebook` is built programmatically so the nested catalog
//! structures are correct by construction; JSON fixtures under
//! `test_data/` cover the paths that read real files.

use std::path::PathBuf;

use mythforge_domain::{
    Ancestry, AncestryBoon, AncestryFeat, Archetype, Background, ChassisRow, ChoiceKind, ClassDef,
    FeatChoice, GearGrant, Item, ItemTag, MonsterChassis, MonsterFamily, Modifier, PoolKind,
    Purse, Role, Rulebook, SkillId, Stat, SynergyFeat, Talent,
};

// =============================================================================
// Fixture Loading
// =============================================================================

/// Loads a JSON fixture from the `test_data/` directory.
///
/// # Panics
///
/// Panics if the fixture file cannot be read or parsed.
pub fn load_fixture<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(path);
    let content = std::fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!("Failed to read fixture '{}': {}", fixture_path.display(), e)
    });
    serde_json::from_str(&content).unwrap_or_else(|e| {
        panic!("Failed to parse fixture '{}': {}", fixture_path.display(), e)
    })
}

/// Absolute path to a directory under `test_data/`.
pub fn test_data_dir(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(path)
}

// =============================================================================
// Rules Data
// =============================================================================

/// A compact but complete rulebook: four archetypes covering all three
/// roles, two classes with synergy feats (one granting a choice-bearing
/// talent), and enough items to exercise every defense branch.
pub fn sample_rulebook() -> Rulebook {
    Rulebook {
        ancestries: vec![
            Ancestry {
                id: "wildkin".to_string(),
                name: "Wildkin".to_string(),
                description: "Born under open sky.".to_string(),
                feats: vec![AncestryFeat::new("Keen Senses", "Little escapes you.")
                    .with_modifiers(vec![Modifier::skill_training(SkillId::PerceptionAndInsight)])],
                boons: vec![
                    AncestryBoon::new(
                        "Stout",
                        "Hard to put down.",
                        vec![Modifier::pool_bonus(PoolKind::Hp, 2)],
                    ),
                    AncestryBoon::new(
                        "Attuned",
                        "Magic answers easily.",
                        vec![Modifier::pool_bonus(PoolKind::Mp, 2)],
                    ),
                ],
            },
            Ancestry {
                id: "emberborn".to_string(),
                name: "Emberborn".to_string(),
                description: "Ash in the blood.".to_string(),
                feats: vec![AncestryFeat::new("Cinder Veins", "Heat runs shallow.")
                    .with_choice(FeatChoice::Element {
                        options: vec!["Fire".to_string(), "Ash".to_string()],
                    })],
                boons: vec![AncestryBoon::new(
                    "Tireless",
                    "Slow to flag.",
                    vec![Modifier::pool_bonus(PoolKind::Sta, 2)],
                )],
            },
        ],
        backgrounds: vec![
            Background {
                id: "poacher".to_string(),
                name: "Poacher".to_string(),
                description: "You hunted where you should not.".to_string(),
                skill: SkillId::WildsAndMedicine,
                gear: vec![GearGrant::item("Hunting Knife"), GearGrant::coin(0, 5, 0)],
            },
            Background {
                id: "archivist".to_string(),
                name: "Archivist".to_string(),
                description: "Dust, ink, and patience.".to_string(),
                skill: SkillId::ArcanaAndLore,
                gear: vec![GearGrant::item("Traveler's Pack"), GearGrant::coin(1, 0, 0)],
            },
        ],
        archetypes: vec![
            Archetype {
                id: "vanguard".to_string(),
                name: "Vanguard".to_string(),
                description: "First into the breach.".to_string(),
                role: Role::Warrior,
                primary_stats: vec![Stat::Strength, Stat::Constitution],
                trained_skills: vec![SkillId::ArmsAndAthletics],
                talents: vec![
                    Talent::new("Shield Wall", "Hold the line.", "2 sp"),
                    Talent::new("Sunder", "Break what blocks you.", "1 sp"),
                    Talent::new("Ironhide", "Skin like scale.", "2 sp")
                        .with_modifiers(vec![Modifier::armor_bonus(1)]),
                ],
            },
            Archetype {
                id: "sentinel".to_string(),
                name: "Sentinel".to_string(),
                description: "Nothing gets past.".to_string(),
                role: Role::Warrior,
                primary_stats: vec![Stat::Constitution, Stat::Wisdom],
                trained_skills: vec![SkillId::PerceptionAndInsight],
                talents: vec![Talent::new("Warden's Eye", "Always watching.", "1 sp")
                    .with_modifiers(vec![Modifier::skill_training(
                        SkillId::PerceptionAndInsight,
                    )])],
            },
            Archetype {
                id: "elementalist".to_string(),
                name: "Elementalist".to_string(),
                description: "Bends raw elements.".to_string(),
                role: Role::Spellcaster,
                primary_stats: vec![Stat::Intelligence, Stat::Wisdom],
                trained_skills: vec![SkillId::ArcanaAndLore],
                talents: vec![
                    Talent::new("Ember Bolt", "A dart of flame.", "1 sp"),
                    Talent::new("Attuned Mind", "Deeper reserves.", "2 sp")
                        .with_modifiers(vec![Modifier::pool_bonus(PoolKind::Mp, 2)]),
                    Talent::new("Scholar's Focus", "Study one field deeply.", "1 sp")
                        .with_choice(ChoiceKind::Skill)
                        .with_modifiers(vec![Modifier::ChosenSkillTraining]),
                ],
            },
            Archetype {
                id: "shadow".to_string(),
                name: "Shadow".to_string(),
                description: "Unseen until it matters.".to_string(),
                role: Role::Specialist,
                primary_stats: vec![Stat::Dexterity, Stat::Charisma],
                trained_skills: vec![SkillId::StealthAndThievery],
                talents: vec![
                    Talent::new("Low Blow", "Fight to win.", "1 sp"),
                    Talent::new("Versed", "Pick up another trade.", "1 sp")
                        .repeatable()
                        .with_choice(ChoiceKind::Skill)
                        .with_modifiers(vec![Modifier::ChosenSkillTraining]),
                ],
            },
        ],
        classes: vec![
            ClassDef {
                id: "juggernaut".to_string(),
                name: "Juggernaut".to_string(),
                components: ["vanguard".to_string(), "sentinel".to_string()],
                synergy_feats: vec![
                    SynergyFeat::new("Bulwark", 2, "An unmoving wall.").granting("Riposte"),
                    SynergyFeat::new("Unbreakable", 5, "Past the point of pain.")
                        .with_modifiers(vec![Modifier::pool_bonus(PoolKind::Hp, 4)]),
                ],
            },
            ClassDef {
                id: "spellblade".to_string(),
                name: "Spellblade".to_string(),
                components: ["vanguard".to_string(), "elementalist".to_string()],
                synergy_feats: vec![
                    SynergyFeat::new("Edge Ward", 1, "Steel answers spell.").with_modifiers(vec![
                        Modifier::defense_bonus(mythforge_domain::DefenseKind::Parry, 1),
                    ]),
                    SynergyFeat::new("Runed Edge", 3, "The blade remembers an element.")
                        .granting("Elemental Brand"),
                ],
            },
        ],
        talents: vec![
            Talent::new("Riposte", "Answer in steel.", "2 sp"),
            Talent::new("Elemental Brand", "Bind an element to your strikes.", "2 sp")
                .with_choice(ChoiceKind::Property),
        ],
        items: vec![
            Item::melee("Longsword").with_tags(vec![ItemTag::Guard]),
            Item::melee("Hunting Knife")
                .with_tags(vec![ItemTag::Light])
                .with_price(Purse::new(0, 2, 0)),
            Item::shield("Round Shield"),
            Item::armor("Quilted Jack", 1),
            Item::armor("Chain Hauberk", 3).with_bulk(2),
            Item::new("Traveler's Pack", mythforge_domain::ItemKind::Gear),
        ],
        chassis: vec![MonsterChassis {
            role: Role::Warrior,
            rows: vec![
                ChassisRow {
                    level: 1,
                    hp: 10,
                    armor_score: 2,
                    attack: 3,
                    damage_die: None,
                },
                ChassisRow {
                    level: 2,
                    hp: 16,
                    armor_score: 2,
                    attack: 4,
                    damage_die: None,
                },
            ],
        }],
        families: vec![MonsterFamily {
            name: "Dire Beasts".to_string(),
            role: Role::Warrior,
            description: "Too big, too angry.".to_string(),
            traits: vec!["Keen scent".to_string()],
        }],
    }
}

// =============================================================================
// Character Builders
// =============================================================================

/// Prebuilt characters consistent with [`sample_rulebook`].
pub mod characters {
    use mythforge_domain::{recompute_all, Character, CreationSlot, StatBlock};

    use super::*;

    fn warrior_stats() -> StatBlock {
        let mut stats = StatBlock::new();
        stats.set(Stat::Strength, 2);
        stats.set(Stat::Dexterity, 1);
        stats.set(Stat::Constitution, 2);
        stats.set(Stat::Intelligence, 0);
        stats.set(Stat::Wisdom, 1);
        stats.set(Stat::Charisma, 0);
        stats
    }

    /// A bare draft fresh out of the wizard's first step.
    pub fn draft(name: &str) -> Character {
        Character::new(name)
    }

    /// A juggernaut (vanguard + sentinel) at `level`, fully derived and
    /// rested. Hit die 10, CON +2.
    pub fn warrior_at(level: u8) -> Character {
        let book = sample_rulebook();
        let mut character = Character::new("Grum")
            .with_archetypes("vanguard", "sentinel")
            .with_ancestry("wildkin")
            .with_background("poacher")
            .with_stats(warrior_stats())
            .with_level(level);
        character.select_ancestry_feat("Keen Senses");
        character.select_boon("Stout");
        if level > 1 {
            // Seed the frozen accumulator as if each level rolled a 4.
            character = character.with_base_hp(12 + 6 * i32::from(level - 1));
        }
        let vanguard = book.archetype("vanguard").unwrap();
        character.select_creation_talent(
            CreationSlot::First,
            vanguard.talent("Shield Wall").unwrap(),
            None,
        );
        character.refresh_class(&book);
        recompute_all(&mut character, &book);
        character.refill_vitals();
        character
    }

    /// A spellblade (vanguard + elementalist) at `level`. Hit die 8.
    pub fn spellblade_at(level: u8) -> Character {
        let book = sample_rulebook();
        let mut stats = StatBlock::new();
        stats.set(Stat::Strength, 2);
        stats.set(Stat::Dexterity, 0);
        stats.set(Stat::Constitution, 1);
        stats.set(Stat::Intelligence, 2);
        stats.set(Stat::Wisdom, 1);
        stats.set(Stat::Charisma, 0);
        let mut character = Character::new("Isolde")
            .with_archetypes("vanguard", "elementalist")
            .with_ancestry("wildkin")
            .with_background("archivist")
            .with_stats(stats)
            .with_level(level);
        character.select_ancestry_feat("Keen Senses");
        character.select_boon("Attuned");
        if level > 1 {
            character = character.with_base_hp(9 + 5 * i32::from(level - 1));
        }
        character.refresh_class(&book);
        recompute_all(&mut character, &book);
        character.refill_vitals();
        character
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_rulebook_cross_references_hold() {
        let book = sample_rulebook();
        for class in &book.classes {
            for component in &class.components {
                assert!(book.archetype(component).is_some(), "{component}");
            }
            for feat in &class.synergy_feats {
                if let Some(talent) = &feat.grant_talent {
                    assert!(book.talent(talent).is_some(), "{talent}");
                }
            }
        }
        for background in &book.backgrounds {
            for gear in &background.gear {
                if let GearGrant::Item { name } = gear {
                    assert!(book.item(name).is_some(), "{name}");
                }
            }
        }
    }

    #[test]
    fn warrior_builder_is_derived_and_rested() {
        let character = characters::warrior_at(1);
        assert_eq!(character.class_name(), Some("Juggernaut"));
        // 10 (die) + 2 (CON) + 2 (Stout)
        assert_eq!(character.derived().max_hp, 14);
        assert_eq!(character.vitals().hp, 14);
    }

    #[test]
    fn leveled_warrior_keeps_the_seeded_accumulator() {
        let character = characters::warrior_at(3);
        assert_eq!(character.base_hp(), 24);
        assert_eq!(character.derived().max_hp, 26);
    }
}
