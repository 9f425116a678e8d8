//! Status conditions a character can carry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The closed set of status conditions.
///
/// Ordered so condition sets render in a stable order on every sheet.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Bleeding,
    Blinded,
    Burning,
    Charmed,
    Confused,
    Deafened,
    Exhausted,
    Frightened,
    Grappled,
    Invisible,
    Poisoned,
    Prone,
    Silenced,
    Stunned,
    Weakened,
}

impl Condition {
    pub const ALL: [Condition; 15] = [
        Condition::Bleeding,
        Condition::Blinded,
        Condition::Burning,
        Condition::Charmed,
        Condition::Confused,
        Condition::Deafened,
        Condition::Exhausted,
        Condition::Frightened,
        Condition::Grappled,
        Condition::Invisible,
        Condition::Poisoned,
        Condition::Prone,
        Condition::Silenced,
        Condition::Stunned,
        Condition::Weakened,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Condition::Bleeding => "Bleeding",
            Condition::Blinded => "Blinded",
            Condition::Burning => "Burning",
            Condition::Charmed => "Charmed",
            Condition::Confused => "Confused",
            Condition::Deafened => "Deafened",
            Condition::Exhausted => "Exhausted",
            Condition::Frightened => "Frightened",
            Condition::Grappled => "Grappled",
            Condition::Invisible => "Invisible",
            Condition::Poisoned => "Poisoned",
            Condition::Prone => "Prone",
            Condition::Silenced => "Silenced",
            Condition::Stunned => "Stunned",
            Condition::Weakened => "Weakened",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Condition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .iter()
            .find(|condition| condition.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| DomainError::parse(format!("Unknown condition: {}", s)))
    }
}
