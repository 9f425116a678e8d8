//! Defense derivation: dodge, parry, block, and armor score.

use crate::aggregates::{Character, Defenses};
use crate::rulebook::Rulebook;
use crate::value_objects::{DefenseDie, DefenseKind, DefenseScore, Modifier, Stat};

use super::{modifier_sources, resolved_pair, ActiveModifier};

/// Derives the defense block and armor score onto the character.
///
/// Dodge always exists. Parry needs a melee weapon in inventory, block
/// needs a shield. With the archetype pair unresolved the stat-driven
/// defenses reset to their empty baseline rather than keeping stale
/// numbers; armor score is item-driven and is computed regardless.
pub fn recompute_defenses(character: &mut Character, rulebook: &Rulebook) {
    let armor = armor_score(character, rulebook);

    if resolved_pair(character, rulebook).is_none() {
        character.defenses = Defenses::default();
        character.armor_score = armor;
        return;
    }

    let sources = modifier_sources(character, rulebook);
    let mut ranks = [0u8; 3];
    let mut flat = [0i32; 3];
    for source in &sources {
        match source.modifier {
            Modifier::DefenseTraining { defense } => {
                ranks[lane(*defense)] = ranks[lane(*defense)].saturating_add(1);
            }
            Modifier::DefenseBonus { defense, amount } => {
                flat[lane(*defense)] += amount;
            }
            _ => {}
        }
    }

    let stats = character.stats();
    let dodge = DefenseScore::new(
        stats.score(Stat::Dexterity) + flat[lane(DefenseKind::Dodge)],
        DefenseDie::from_ranks(ranks[lane(DefenseKind::Dodge)]),
    );

    let has_melee = character.inventory().iter().any(|item| item.is_melee());
    let guard_bonus = if character
        .inventory()
        .iter()
        .any(|item| item.has_tag(crate::entities::ItemTag::Guard))
    {
        1
    } else {
        0
    };
    let parry = has_melee.then(|| {
        DefenseScore::new(
            stats.score(Stat::Strength).max(stats.score(Stat::Dexterity))
                + guard_bonus
                + flat[lane(DefenseKind::Parry)],
            DefenseDie::from_ranks(ranks[lane(DefenseKind::Parry)]),
        )
    });

    let has_shield = character.inventory().iter().any(|item| item.is_shield());
    let block = has_shield.then(|| {
        DefenseScore::new(
            stats.score(Stat::Constitution) + flat[lane(DefenseKind::Block)],
            DefenseDie::from_ranks(ranks[lane(DefenseKind::Block)]),
        )
    });

    character.defenses = Defenses { dodge, parry, block };
    character.armor_score = armor;
}

fn lane(defense: DefenseKind) -> usize {
    match defense {
        DefenseKind::Dodge => 0,
        DefenseKind::Parry => 1,
        DefenseKind::Block => 2,
    }
}

/// Armor score: best worn armor (or an unarmored-defense stat), shield
/// bonus, and flat bonuses from the modifier stack. Floored at 0.
pub fn armor_score(character: &Character, rulebook: &Rulebook) -> i32 {
    let sources = modifier_sources(character, rulebook);

    let best_armor = character
        .inventory()
        .iter()
        .filter(|item| item.kind == crate::entities::ItemKind::Armor)
        .filter_map(|item| item.armor_score)
        .max();

    // Natural armor from an unarmored-defense stat caps at 3; worn armor
    // does not.
    let base = match best_armor {
        Some(score) => score,
        None => unarmored_stat(&sources)
            .map(|stat| character.stats().score(stat).clamp(0, 3))
            .unwrap_or(0),
    };

    let has_shield = character.inventory().iter().any(|item| item.is_shield());
    let tower_mastery = sources
        .iter()
        .any(|source| matches!(source.modifier, Modifier::TowerShieldMastery));
    let shield_bonus = match (has_shield, tower_mastery) {
        (true, true) => 2,
        (true, false) => 1,
        (false, _) => 0,
    };

    let flat: i32 = sources
        .iter()
        .filter_map(|source| match source.modifier {
            Modifier::ArmorBonus { amount } => Some(amount),
            _ => None,
        })
        .sum();

    (base + shield_bonus + flat).max(0)
}

fn unarmored_stat(sources: &[ActiveModifier<'_>]) -> Option<Stat> {
    sources.iter().find_map(|source| match source.modifier {
        Modifier::UnarmoredDefense { stat } => Some(*stat),
        _ => None,
    })
}
