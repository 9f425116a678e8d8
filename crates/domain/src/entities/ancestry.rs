//! Ancestries: heritage feats and the versatile boon list.

use serde::{Deserialize, Serialize};

use crate::value_objects::Modifier;

/// The selection an ancestry feat asks for, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeatChoice {
    /// No selection needed.
    #[default]
    None,
    /// Choose one of the twelve skills.
    Skill,
    /// Choose an element from the listed options.
    Element { options: Vec<String> },
}

impl FeatChoice {
    pub fn is_required(&self) -> bool {
        !matches!(self, FeatChoice::None)
    }
}

/// A heritage feat offered by an ancestry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AncestryFeat {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub choice: FeatChoice,
}

impl AncestryFeat {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            modifiers: Vec::new(),
            choice: FeatChoice::None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_choice(mut self, choice: FeatChoice) -> Self {
        self.choice = choice;
        self
    }
}

/// A versatile boon every ancestry offers alongside its feats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AncestryBoon {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl AncestryBoon {
    pub fn new(name: impl Into<String>, description: impl Into<String>, modifiers: Vec<Modifier>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            modifiers,
        }
    }
}

/// An ancestry catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ancestry {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub feats: Vec<AncestryFeat>,
    #[serde(default)]
    pub boons: Vec<AncestryBoon>,
}

impl Ancestry {
    pub fn feat(&self, name: &str) -> Option<&AncestryFeat> {
        self.feats.iter().find(|feat| feat.name == name)
    }

    pub fn boon(&self, name: &str) -> Option<&AncestryBoon> {
        self.boons.iter().find(|boon| boon.name == name)
    }
}
