//! The level-up state machine.
//!
//! A [`LevelUpSession`] collects every decision a level demands before
//! any of them touches the character. Applying is all-or-nothing:
//! dropping a session part-way leaves the sheet exactly as it was.

use crate::aggregates::{Character, MAX_LEVEL};
use crate::entities::{ChoiceKind, KnownTalent, SynergyFeat, Talent, TalentSource};
use crate::error::DomainError;
use crate::rulebook::Rulebook;
use crate::value_objects::{SkillId, Stat};

use super::pools::hit_die_for_pair;
use super::talents::{pending_synergy_grant_at, resolve_synergy_grant, SynergyGrant};
use super::{recompute_all, resolved_pair, valid_talent_options};

/// Milestone levels award a permanent +1 to one stat.
const MILESTONE_LEVELS: [u8; 2] = [5, 10];

/// Where a session stands. Applying consumes the session, so the
/// terminal "applied" state is the returned [`LevelUpReport`] rather
/// than an observable variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelUpState {
    /// Decisions are still missing.
    Collecting,
    /// Every required decision is in; `apply` may run.
    Ready,
}

/// The recorded hit-point roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HpRoll {
    pub die: u8,
    pub face: u8,
    pub con: i32,
    /// `max(1, face + con)`: every level grants at least one hit point.
    pub gained: i32,
}

/// Outcome of picking the level's talent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TalentDecision {
    Accepted,
    /// The pick is parked until `resolve_choice` supplies the selection.
    ChoiceRequired { kind: ChoiceKind },
}

/// What `apply` did, for the caller to present.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelUpReport {
    pub new_level: u8,
    pub hp_gained: i32,
    pub talent_added: String,
    pub stat_boosted: Option<Stat>,
    /// A synergy grant the new level triggered, if any. A
    /// `ChoiceRequired` here was not applied and is the caller's to
    /// resolve.
    pub synergy: Option<SynergyGrant>,
}

#[derive(Debug, Clone)]
struct EligibleTalent {
    name: String,
    archetype_id: String,
}

#[derive(Debug, Clone)]
struct TalentPick {
    talent: Talent,
    archetype_id: String,
    choice: Option<String>,
}

/// Collects one level's worth of decisions, then applies them atomically.
///
/// The session snapshots everything it needs from the character at
/// `begin`, so the character stays untouched (and free for reads) until
/// `apply`.
#[derive(Debug, Clone)]
pub struct LevelUpSession {
    next_level: u8,
    hit_die: u8,
    con: i32,
    milestone: bool,
    eligible: Vec<EligibleTalent>,
    hp: Option<HpRoll>,
    pick: Option<TalentPick>,
    stat_boost: Option<Stat>,
}

impl LevelUpSession {
    /// Opens a session for the character's next level.
    ///
    /// Fails at the level cap and while the archetype pair is unchosen
    /// or unknown to the rulebook.
    pub fn begin(character: &Character, rulebook: &Rulebook) -> Result<Self, DomainError> {
        if character.level() >= MAX_LEVEL {
            return Err(DomainError::constraint(format!(
                "Already at the level cap of {}",
                MAX_LEVEL
            )));
        }
        let (first, second) = resolved_pair(character, rulebook).ok_or_else(|| {
            DomainError::constraint("Both archetypes must be chosen before levelling up")
        })?;

        let eligible = valid_talent_options(character, rulebook)
            .into_iter()
            .map(|talent| EligibleTalent {
                name: talent.name.clone(),
                archetype_id: if first.talents.iter().any(|t| t.name == talent.name) {
                    first.id.clone()
                } else {
                    second.id.clone()
                },
            })
            .collect();

        let next_level = character.level() + 1;
        Ok(Self {
            next_level,
            hit_die: hit_die_for_pair(first, second),
            con: character.stats().score(Stat::Constitution),
            milestone: MILESTONE_LEVELS.contains(&next_level),
            eligible,
            hp: None,
            pick: None,
            stat_boost: None,
        })
    }

    pub fn next_level(&self) -> u8 {
        self.next_level
    }

    pub fn hit_die(&self) -> u8 {
        self.hit_die
    }

    /// True when this level awards a stat boost.
    pub fn is_milestone(&self) -> bool {
        self.milestone
    }

    /// Names of the talents this session will accept.
    pub fn eligible_talents(&self) -> impl Iterator<Item = &str> {
        self.eligible.iter().map(|entry| entry.name.as_str())
    }

    pub fn hp_roll(&self) -> Option<HpRoll> {
        self.hp
    }

    /// Rolls the level's hit points. Single-shot.
    ///
    /// The closure receives the hit die and returns the face rolled;
    /// out-of-range faces are clamped onto the die.
    pub fn roll_hp(
        &mut self,
        roll: impl FnOnce(u8) -> u8,
    ) -> Result<HpRoll, DomainError> {
        if self.hp.is_some() {
            return Err(DomainError::invalid_state_transition(
                "Hit points were already rolled for this level-up",
            ));
        }
        let face = roll(self.hit_die).clamp(1, self.hit_die);
        let rolled = HpRoll {
            die: self.hit_die,
            face,
            con: self.con,
            gained: (i32::from(face) + self.con).max(1),
        };
        self.hp = Some(rolled);
        Ok(rolled)
    }

    /// Picks the level's talent. Re-picking before apply replaces the
    /// previous pick, dropping any selection recorded for it.
    pub fn choose_talent(&mut self, talent: &Talent) -> Result<TalentDecision, DomainError> {
        let entry = self
            .eligible
            .iter()
            .find(|eligible| eligible.name == talent.name)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "'{}' is not an eligible pick for this level-up",
                    talent.name
                ))
            })?;

        let archetype_id = entry.archetype_id.clone();
        let decision = match talent.flags.requires_choice {
            Some(kind) => TalentDecision::ChoiceRequired { kind },
            None => TalentDecision::Accepted,
        };
        self.pick = Some(TalentPick {
            talent: talent.clone(),
            archetype_id,
            choice: None,
        });
        Ok(decision)
    }

    /// Supplies the selection a parked choice-bearing pick is waiting on.
    pub fn resolve_choice(&mut self, selection: impl Into<String>) -> Result<(), DomainError> {
        let pick = self.pick.as_mut().ok_or_else(|| {
            DomainError::invalid_state_transition("No talent has been picked yet")
        })?;
        let selection = selection.into();
        match pick.talent.flags.requires_choice {
            None => {
                return Err(DomainError::invalid_state_transition(
                    "The picked talent needs no selection",
                ))
            }
            Some(ChoiceKind::Skill) => {
                selection.parse::<SkillId>()?;
            }
            Some(ChoiceKind::Stat) => {
                selection.parse::<Stat>()?;
            }
            Some(ChoiceKind::Property) => {}
        }
        pick.choice = Some(selection);
        Ok(())
    }

    /// Records the milestone stat boost. Rejected on non-milestone levels.
    pub fn choose_stat_boost(&mut self, stat: Stat) -> Result<(), DomainError> {
        if !self.milestone {
            return Err(DomainError::constraint(
                "Stat boosts are awarded at levels 5 and 10 only",
            ));
        }
        self.stat_boost = Some(stat);
        Ok(())
    }

    pub fn state(&self) -> LevelUpState {
        let pick_done = self.pick.as_ref().is_some_and(|pick| {
            pick.talent.flags.requires_choice.is_none() || pick.choice.is_some()
        });
        let boost_done = !self.milestone || self.stat_boost.is_some();
        if self.hp.is_some() && pick_done && boost_done {
            LevelUpState::Ready
        } else {
            LevelUpState::Collecting
        }
    }

    /// Applies the collected level atomically and consumes the session.
    ///
    /// Order: level, hit points into the frozen accumulator, the chosen
    /// talent, the milestone boost, any synergy grant the new level
    /// triggers, then a full recompute. Anything that can fail is
    /// checked before the first mutation.
    pub fn apply(
        self,
        character: &mut Character,
        rulebook: &Rulebook,
    ) -> Result<LevelUpReport, DomainError> {
        if self.state() != LevelUpState::Ready {
            return Err(DomainError::invalid_state_transition(
                "Level-up is still collecting decisions",
            ));
        }
        if character.level() + 1 != self.next_level {
            return Err(DomainError::constraint(
                "Character level changed since the level-up began",
            ));
        }
        let (Some(hp), Some(pick)) = (self.hp, self.pick) else {
            return Err(DomainError::invalid_state_transition(
                "Level-up is still collecting decisions",
            ));
        };

        let pending: Option<SynergyFeat> =
            pending_synergy_grant_at(character, rulebook, self.next_level).cloned();
        if let Some(name) = pending.as_ref().and_then(|feat| feat.grant_talent.as_deref()) {
            if rulebook.talent(name).is_none() {
                return Err(DomainError::not_found("Talent", name));
            }
        }

        character.level = self.next_level;
        character.base_hp += hp.gained;
        character.grant_talent(KnownTalent::from_catalog(
            &pick.talent,
            TalentSource::Archetype {
                archetype_id: pick.archetype_id,
            },
            pick.choice,
        ));
        if let Some(stat) = self.stat_boost {
            character.stats_mut().adjust(stat, 1);
        }

        let synergy = match &pending {
            Some(feat) => Some(resolve_synergy_grant(character, rulebook, feat, None)?),
            None => None,
        };

        recompute_all(character, rulebook);

        Ok(LevelUpReport {
            new_level: self.next_level,
            hp_gained: hp.gained,
            talent_added: pick.talent.name,
            stat_boosted: self.stat_boost,
            synergy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Archetype, ClassDef, Role};
    use crate::value_objects::StatBlock;

    fn archetype(id: &str, role: Role, talents: Vec<Talent>) -> Archetype {
        Archetype {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            role,
            primary_stats: vec![Stat::Strength, Stat::Constitution],
            trained_skills: vec![],
            talents,
        }
    }

    fn rulebook() -> Rulebook {
        Rulebook {
            archetypes: vec![
                archetype(
                    "vanguard",
                    Role::Warrior,
                    vec![
                        Talent::new("Shield Wall", "Hold the line.", "1 sp"),
                        Talent::new("Adaptable Training", "Pick a skill.", "1 sp")
                            .with_choice(ChoiceKind::Skill),
                    ],
                ),
                archetype(
                    "sentinel",
                    Role::Warrior,
                    vec![Talent::new("Watchful Eye", "Always alert.", "1 sp")],
                ),
            ],
            classes: vec![ClassDef {
                id: "juggernaut".to_string(),
                name: "Juggernaut".to_string(),
                components: ["vanguard".to_string(), "sentinel".to_string()],
                synergy_feats: vec![
                    SynergyFeat::new("Bulwark", 2, "Nothing gets past.").granting("Riposte")
                ],
            }],
            talents: vec![Talent::new("Riposte", "Answer in steel.", "2 sp")],
            ..Rulebook::default()
        }
    }

    fn warrior(level: u8) -> Character {
        let mut stats = StatBlock::new();
        stats.set(Stat::Strength, 2);
        stats.set(Stat::Dexterity, 1);
        stats.set(Stat::Constitution, 2);
        stats.set(Stat::Intelligence, 0);
        stats.set(Stat::Wisdom, 0);
        stats.set(Stat::Charisma, 0);
        let mut character = Character::new("Test")
            .with_archetypes("vanguard", "sentinel")
            .with_stats(stats)
            .with_level(level);
        if level > 1 {
            // Seed the frozen accumulator the way earlier levels would have.
            character = character.with_base_hp(12 + 6 * i32::from(level - 1));
        }
        recompute_all(&mut character, &rulebook());
        character
    }

    fn shield_wall() -> Talent {
        Talent::new("Shield Wall", "Hold the line.", "1 sp")
    }

    mod begin {
        use super::*;

        #[test]
        fn captures_die_con_and_milestone() {
            let session = LevelUpSession::begin(&warrior(4), &rulebook()).unwrap();
            assert_eq!(session.next_level(), 5);
            assert_eq!(session.hit_die(), 10);
            assert!(session.is_milestone());

            let session = LevelUpSession::begin(&warrior(1), &rulebook()).unwrap();
            assert!(!session.is_milestone());
        }

        #[test]
        fn rejects_the_level_cap() {
            let capped = warrior(MAX_LEVEL);
            let err = LevelUpSession::begin(&capped, &rulebook()).unwrap_err();
            assert!(matches!(err, DomainError::Constraint(_)));
        }

        #[test]
        fn rejects_an_unresolved_pair() {
            let drifter = Character::new("Drifter");
            assert!(LevelUpSession::begin(&drifter, &rulebook()).is_err());
        }

        #[test]
        fn snapshots_eligible_talents() {
            let session = LevelUpSession::begin(&warrior(1), &rulebook()).unwrap();
            let names: Vec<_> = session.eligible_talents().collect();
            assert_eq!(names, vec!["Shield Wall", "Adaptable Training", "Watchful Eye"]);
        }
    }

    mod collecting {
        use super::*;

        #[test]
        fn hp_roll_is_single_shot_and_floored() {
            let mut session = LevelUpSession::begin(&warrior(1), &rulebook()).unwrap();
            let roll = session.roll_hp(|_| 1).unwrap();
            assert_eq!(roll.gained, 3);

            let err = session.roll_hp(|_| 10).unwrap_err();
            assert!(matches!(err, DomainError::InvalidStateTransition(_)));
        }

        #[test]
        fn negative_con_still_gains_one() {
            let mut character = warrior(1);
            character.stats_mut().set(Stat::Constitution, -2);
            let mut session = LevelUpSession::begin(&character, &rulebook()).unwrap();
            let roll = session.roll_hp(|_| 1).unwrap();
            assert_eq!(roll.face, 1);
            assert_eq!(roll.gained, 1);
        }

        #[test]
        fn out_of_range_faces_clamp_onto_the_die() {
            let mut session = LevelUpSession::begin(&warrior(1), &rulebook()).unwrap();
            let roll = session.roll_hp(|_| 99).unwrap();
            assert_eq!(roll.face, 10);
        }

        #[test]
        fn ineligible_talent_is_rejected() {
            let mut session = LevelUpSession::begin(&warrior(1), &rulebook()).unwrap();
            let offlist = Talent::new("Riposte", "Answer in steel.", "2 sp");
            assert!(session.choose_talent(&offlist).is_err());
        }

        #[test]
        fn choice_bearing_pick_parks_until_resolved() {
            let mut session = LevelUpSession::begin(&warrior(1), &rulebook()).unwrap();
            session.roll_hp(|die| die).unwrap();

            let pick = Talent::new("Adaptable Training", "Pick a skill.", "1 sp")
                .with_choice(ChoiceKind::Skill);
            let decision = session.choose_talent(&pick).unwrap();
            assert_eq!(
                decision,
                TalentDecision::ChoiceRequired {
                    kind: ChoiceKind::Skill
                }
            );
            assert_eq!(session.state(), LevelUpState::Collecting);

            // A selection that is not a skill is refused.
            assert!(session.resolve_choice("Juggling").is_err());

            session.resolve_choice("Arcana & Lore").unwrap();
            assert_eq!(session.state(), LevelUpState::Ready);
        }

        #[test]
        fn repicking_replaces_the_parked_talent() {
            let mut session = LevelUpSession::begin(&warrior(1), &rulebook()).unwrap();
            session.roll_hp(|die| die).unwrap();

            let choosy = Talent::new("Adaptable Training", "Pick a skill.", "1 sp")
                .with_choice(ChoiceKind::Skill);
            session.choose_talent(&choosy).unwrap();
            assert_eq!(session.state(), LevelUpState::Collecting);

            session.choose_talent(&shield_wall()).unwrap();
            assert_eq!(session.state(), LevelUpState::Ready);
        }

        #[test]
        fn stat_boost_only_on_milestones() {
            let mut session = LevelUpSession::begin(&warrior(1), &rulebook()).unwrap();
            assert!(session.choose_stat_boost(Stat::Strength).is_err());

            let mut session = LevelUpSession::begin(&warrior(4), &rulebook()).unwrap();
            session.roll_hp(|die| die).unwrap();
            session.choose_talent(&shield_wall()).unwrap();
            assert_eq!(session.state(), LevelUpState::Collecting);

            session.choose_stat_boost(Stat::Strength).unwrap();
            assert_eq!(session.state(), LevelUpState::Ready);
        }
    }

    mod apply {
        use super::*;

        #[test]
        fn applies_level_hp_and_talent_then_recomputes() {
            let book = rulebook();
            let mut character = warrior(1);
            assert_eq!(character.derived().max_hp, 12);

            let mut session = LevelUpSession::begin(&character, &book).unwrap();
            session.roll_hp(|_| 7).unwrap();
            session.choose_talent(&shield_wall()).unwrap();
            let report = session.apply(&mut character, &book).unwrap();

            assert_eq!(report.new_level, 2);
            assert_eq!(report.hp_gained, 9);
            assert_eq!(report.talent_added, "Shield Wall");
            assert_eq!(character.level(), 2);
            assert_eq!(character.derived().max_hp, 21);
            let owned = character
                .talents()
                .iter()
                .find(|t| t.name == "Shield Wall")
                .unwrap();
            assert_eq!(
                owned.source,
                TalentSource::Archetype {
                    archetype_id: "vanguard".to_string()
                }
            );
        }

        #[test]
        fn current_vitals_are_not_refilled() {
            let book = rulebook();
            let mut character = warrior(1);
            character.refill_vitals();
            character.adjust_hp(-5);
            assert_eq!(character.vitals().hp, 7);

            let mut session = LevelUpSession::begin(&character, &book).unwrap();
            session.roll_hp(|_| 4).unwrap();
            session.choose_talent(&shield_wall()).unwrap();
            session.apply(&mut character, &book).unwrap();

            assert_eq!(character.vitals().hp, 7);
            assert_eq!(character.derived().max_hp, 18);
        }

        #[test]
        fn milestone_boost_lands_on_the_stat() {
            let book = rulebook();
            let mut character = warrior(4);
            let mut session = LevelUpSession::begin(&character, &book).unwrap();
            session.roll_hp(|_| 5).unwrap();
            session.choose_talent(&shield_wall()).unwrap();
            session.choose_stat_boost(Stat::Constitution).unwrap();
            let report = session.apply(&mut character, &book).unwrap();

            assert_eq!(report.stat_boosted, Some(Stat::Constitution));
            assert_eq!(character.stats().score(Stat::Constitution), 3);
            // The frozen accumulator ignores the raised CON; only the
            // fresh roll used the old snapshot.
            assert_eq!(report.hp_gained, 7);
        }

        #[test]
        fn synergy_grant_fires_when_the_new_level_brings_it_online() {
            let book = rulebook();
            let mut character = warrior(1);
            let mut session = LevelUpSession::begin(&character, &book).unwrap();
            session.roll_hp(|_| 3).unwrap();
            session.choose_talent(&shield_wall()).unwrap();
            let report = session.apply(&mut character, &book).unwrap();

            assert_eq!(
                report.synergy,
                Some(SynergyGrant::Granted {
                    feat: "Bulwark".to_string(),
                    talent: "Riposte".to_string(),
                })
            );
            assert!(character.has_talent("Riposte"));
        }

        #[test]
        fn apply_before_ready_is_refused() {
            let book = rulebook();
            let mut character = warrior(1);
            let session = LevelUpSession::begin(&character, &book).unwrap();
            let err = session.apply(&mut character, &book).unwrap_err();
            assert!(matches!(err, DomainError::InvalidStateTransition(_)));
            assert_eq!(character.level(), 1);
        }

        #[test]
        fn broken_grant_reference_leaves_the_character_untouched() {
            let mut book = rulebook();
            book.talents.clear();
            let mut character = warrior(1);
            let before_hp = character.derived().max_hp;

            let mut session = LevelUpSession::begin(&character, &book).unwrap();
            session.roll_hp(|_| 6).unwrap();
            session.choose_talent(&shield_wall()).unwrap();
            let err = session.apply(&mut character, &book).unwrap_err();

            assert!(matches!(err, DomainError::NotFound { .. }));
            assert_eq!(character.level(), 1);
            assert_eq!(character.derived().max_hp, before_hp);
            assert!(!character.has_talent("Shield Wall"));
        }

        #[test]
        fn abandoned_session_changes_nothing() {
            let book = rulebook();
            let mut character = warrior(1);
            let snapshot = character.clone();
            {
                let mut session = LevelUpSession::begin(&character, &book).unwrap();
                session.roll_hp(|_| 9).unwrap();
                session.choose_talent(&shield_wall()).unwrap();
            }
            recompute_all(&mut character, &book);
            assert_eq!(character, snapshot);
        }
    }
}
