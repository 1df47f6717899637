//! Companion definitions and how they are unlocked.

use serde::{Deserialize, Serialize};

/// How a companion becomes available.
///
/// Stored in catalogs as a string tag: `tutorial_complete`,
/// `favor_tokens_cost`, or `divine_rank_<N>`. Anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UnlockCondition {
    /// Granted once the tutorial is done.
    TutorialComplete,
    /// Bought with favor tokens.
    FavorTokensCost,
    /// Granted on reaching a divine rank.
    DivineRank(u8),
    /// Unrecognized tag.
    Other(String),
}

impl UnlockCondition {
    /// Parse a condition tag.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "tutorial_complete" => Self::TutorialComplete,
            "favor_tokens_cost" => Self::FavorTokensCost,
            other => other
                .strip_prefix("divine_rank_")
                .and_then(|n| n.parse::<u8>().ok())
                .map(Self::DivineRank)
                .unwrap_or_else(|| Self::Other(other.to_string())),
        }
    }
}

impl std::fmt::Display for UnlockCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TutorialComplete => write!(f, "tutorial_complete"),
            Self::FavorTokensCost => write!(f, "favor_tokens_cost"),
            Self::DivineRank(n) => write!(f, "divine_rank_{n}"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<String> for UnlockCondition {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<UnlockCondition> for String {
    fn from(condition: UnlockCondition) -> Self {
        condition.to_string()
    }
}

/// A catalog entry describing one companion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanionDefinition {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Player-facing description.
    #[serde(default)]
    pub description: String,
    /// How the companion is unlocked.
    pub unlock_condition: UnlockCondition,
    /// Favor token price when bought.
    #[serde(default)]
    pub unlock_cost: u32,
}

impl CompanionDefinition {
    /// A companion with no description and no price.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unlock_condition: UnlockCondition,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            unlock_condition,
            unlock_cost: 0,
        }
    }

    /// Set the favor token price.
    pub fn with_cost(mut self, unlock_cost: u32) -> Self {
        self.unlock_cost = unlock_cost;
        self
    }
}
