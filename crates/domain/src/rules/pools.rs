//! Resource pool derivation: HP, MP, stamina, luck, and carry slots.
//!
//! The pass rebuilds every pool from its role-based baseline, applies the
//! modifier stack, clamps, and writes the result. Current vitals are never
//! touched here; initialization to maxima is an explicit step at wizard
//! finish or on a full rest.

use crate::aggregates::{Character, DerivedPools};
use crate::entities::{Archetype, Role};
use crate::rulebook::Rulebook;
use crate::value_objects::{Modifier, PoolKind, Stat};

/// Hit die for an archetype pairing: d10 for a full warrior, d6 for a
/// full spellcaster, d8 otherwise.
pub fn hit_die_for_pair(a: &Archetype, b: &Archetype) -> u8 {
    if a.role == Role::Warrior && b.role == Role::Warrior {
        10
    } else if a.role == Role::Spellcaster && b.role == Role::Spellcaster {
        6
    } else {
        8
    }
}

/// Derives the five resource pools and the frozen HP accumulator.
///
/// A silent no-op while the archetype pair is unchosen or unknown to the
/// rulebook.
pub fn recompute_pools(character: &mut Character, rulebook: &Rulebook) {
    let Some((a, b)) = super::resolved_pair(character, rulebook) else {
        return;
    };

    let stats = character.stats();
    let level = i32::from(character.level());
    let hit_die = hit_die_for_pair(a, b);
    let con = stats.score(Stat::Constitution);

    let full_warrior = a.role == Role::Warrior && b.role == Role::Warrior;
    let has_warrior = a.role == Role::Warrior || b.role == Role::Warrior;
    let full_caster = a.role == Role::Spellcaster && b.role == Role::Spellcaster;
    let has_caster = a.role == Role::Spellcaster || b.role == Role::Spellcaster;
    let full_specialist = a.role == Role::Specialist && b.role == Role::Specialist;
    let has_specialist = a.role == Role::Specialist || b.role == Role::Specialist;

    // The frozen accumulator: recomputed freely at level 1 so stat edits
    // during creation flow through, untouched afterwards. A record that
    // reaches level 2+ with no accumulator (old saves) falls back once.
    let base_hp = if character.level() == 1 || character.base_hp() == 0 {
        (i32::from(hit_die) + con).max(1)
    } else {
        character.base_hp()
    };
    let mut hp = base_hp;

    let mut mp = if has_caster {
        let cast_mod = [a, b]
            .iter()
            .filter(|archetype| archetype.role == Role::Spellcaster)
            .filter_map(|archetype| archetype.casting_stat())
            .map(|stat| stats.score(stat))
            .max()
            .unwrap_or_else(|| {
                stats
                    .score(Stat::Intelligence)
                    .max(stats.score(Stat::Wisdom))
                    .max(stats.score(Stat::Charisma))
            });
        if full_caster {
            (level + 1) * 2 + cast_mod
        } else {
            (level + 1) + cast_mod
        }
    } else {
        0
    };

    let mut sta = if has_warrior {
        let mut trio = [
            stats.score(Stat::Strength),
            stats.score(Stat::Dexterity),
            stats.score(Stat::Constitution),
        ];
        trio.sort_unstable();
        if full_warrior {
            (trio[1] + trio[2]).max(1)
        } else {
            trio[2].max(1)
        }
    } else {
        0
    };

    let cha = stats.score(Stat::Charisma);
    let mut luck = if full_specialist {
        (cha * 2).max(1)
    } else if has_specialist {
        cha.max(1)
    } else {
        1
    };

    let mut slots = 8 + stats.score(Stat::Strength) + con;

    for source in super::modifier_sources(character, rulebook) {
        match source.modifier {
            Modifier::PoolBonus { pool, amount } => match pool {
                PoolKind::Hp => hp += amount,
                PoolKind::Mp => mp += amount,
                PoolKind::Sta => sta += amount,
                PoolKind::Luck => luck += amount,
                PoolKind::Slots => slots += amount,
            },
            Modifier::StatLinkedStamina { stat } => {
                sta += character.stats().score(*stat);
            }
            _ => {}
        }
    }

    character.base_hp = base_hp;
    character.derived = DerivedPools {
        max_hp: hp.max(1),
        max_mp: mp.max(0),
        max_sta: sta.max(0),
        max_luck: luck.max(1),
        slots: slots.max(8),
    };
}
