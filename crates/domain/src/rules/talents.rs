//! Talent eligibility and synergy-feat grants.

use crate::aggregates::Character;
use crate::entities::{ChoiceKind, KnownTalent, SynergyFeat, Talent};
use crate::error::DomainError;
use crate::rulebook::Rulebook;

use super::resolved_pair;

/// Outcome of resolving a synergy feat's talent grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynergyGrant {
    /// The talent was appended to the character.
    Granted { feat: String, talent: String },
    /// The talent needs a selection before it can be granted; the
    /// character was not touched.
    ChoiceRequired {
        feat: String,
        talent: String,
        kind: ChoiceKind,
    },
}

/// Talents the character may pick right now.
///
/// The union of both archetypes' lists (a Pure pair reads its single
/// list once), in catalog order with the second archetype contributing
/// only names the first did not. Talents already owned by name are
/// filtered out unless repeatable. An unresolved pair yields nothing.
pub fn valid_talent_options<'a>(
    character: &Character,
    rulebook: &'a Rulebook,
) -> Vec<&'a Talent> {
    let Some((first, second)) = resolved_pair(character, rulebook) else {
        return Vec::new();
    };

    let mut options: Vec<&Talent> = first.talents.iter().collect();
    if second.id != first.id {
        for talent in &second.talents {
            if !options.iter().any(|seen| seen.name == talent.name) {
                options.push(talent);
            }
        }
    }

    options.retain(|talent| talent.flags.repeatable || !character.has_talent(&talent.name));
    options
}

/// The first online synergy feat whose talent grant is still owed.
///
/// Feats are scanned in catalog order. A grant is owed once per feat
/// name; owning a talent sourced from the feat settles it for good,
/// so a level lost and regained never re-grants.
pub fn pending_synergy_grant<'a>(
    character: &Character,
    rulebook: &'a Rulebook,
) -> Option<&'a SynergyFeat> {
    pending_synergy_grant_at(character, rulebook, character.level())
}

/// [`pending_synergy_grant`] evaluated as if the character were `level`.
///
/// Lets a level-up preview the grant the next level will owe.
pub fn pending_synergy_grant_at<'a>(
    character: &Character,
    rulebook: &'a Rulebook,
    level: u8,
) -> Option<&'a SynergyFeat> {
    let (a, b) = character.archetype_pair()?;
    let class = rulebook.class_for_pair(a, b)?;
    class
        .online_synergy_feats(level)
        .filter(|feat| feat.grant_talent.is_some())
        .find(|feat| {
            !character
                .talents()
                .iter()
                .any(|talent| talent.source.is_synergy_for(&feat.name))
        })
}

/// Grants the talent a synergy feat owes, or reports the choice it needs.
///
/// The named talent missing from the rulebook is a data-integrity error
/// and fails loudly.
pub fn resolve_synergy_grant(
    character: &mut Character,
    rulebook: &Rulebook,
    feat: &SynergyFeat,
    choice: Option<String>,
) -> Result<SynergyGrant, DomainError> {
    let name = feat.grant_talent.as_deref().ok_or_else(|| {
        DomainError::validation(format!("Synergy feat '{}' grants no talent", feat.name))
    })?;
    let talent = rulebook
        .talent(name)
        .ok_or_else(|| DomainError::not_found("Talent", name))?;

    if let Some(kind) = talent.flags.requires_choice {
        if choice.is_none() {
            return Ok(SynergyGrant::ChoiceRequired {
                feat: feat.name.clone(),
                talent: talent.name.clone(),
                kind,
            });
        }
    }

    character.grant_talent(KnownTalent::synergy_grant(talent, &feat.name, choice));
    Ok(SynergyGrant::Granted {
        feat: feat.name.clone(),
        talent: talent.name.clone(),
    })
}
