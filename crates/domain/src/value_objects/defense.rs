//! Defense lanes and their training dice.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three defense lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefenseKind {
    Dodge,
    Parry,
    Block,
}

impl DefenseKind {
    pub const ALL: [DefenseKind; 3] = [DefenseKind::Dodge, DefenseKind::Parry, DefenseKind::Block];

    pub fn name(&self) -> &'static str {
        match self {
            DefenseKind::Dodge => "Dodge",
            DefenseKind::Parry => "Parry",
            DefenseKind::Block => "Block",
        }
    }
}

impl fmt::Display for DefenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The reaction die earned through defense training ranks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefenseDie {
    #[default]
    None,
    D4,
    D6,
}

impl DefenseDie {
    /// Maps training ranks to a die: 0, 1, 2-or-more. Saturates at d6.
    pub fn from_ranks(ranks: u8) -> Self {
        match ranks {
            0 => DefenseDie::None,
            1 => DefenseDie::D4,
            _ => DefenseDie::D6,
        }
    }

    pub fn sides(&self) -> Option<u8> {
        match self {
            DefenseDie::None => None,
            DefenseDie::D4 => Some(4),
            DefenseDie::D6 => Some(6),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DefenseDie::None => "-",
            DefenseDie::D4 => "d4",
            DefenseDie::D6 => "d6",
        }
    }
}

/// A derived defense entry: static value plus reaction die.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseScore {
    pub value: i32,
    pub die: DefenseDie,
}

impl DefenseScore {
    pub fn new(value: i32, die: DefenseDie) -> Self {
        Self { value, die }
    }
}
