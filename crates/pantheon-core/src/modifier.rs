//! Challenge modifiers attached to ranked runs.

use serde::{Deserialize, Serialize};

/// What kind of pressure a modifier applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierCategory {
    /// Enemies get stronger.
    EnemyBuff,
    /// The player gets weaker.
    PlayerDebuff,
    /// The rules of combat shift.
    CombatDynamic,
    /// Rewards or shops get tighter.
    Economy,
}

impl std::fmt::Display for ModifierCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnemyBuff => write!(f, "enemy_buff"),
            Self::PlayerDebuff => write!(f, "player_debuff"),
            Self::CombatDynamic => write!(f, "combat_dynamic"),
            Self::Economy => write!(f, "economy"),
        }
    }
}

/// A catalog entry describing one modifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierDefinition {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Player-facing description.
    #[serde(default)]
    pub description: String,
    /// Modifier category, used to spread selections across kinds.
    pub category: ModifierCategory,
    /// Display color hint.
    #[serde(default)]
    pub color: String,
    /// Lowest rank this modifier can appear at (inclusive).
    #[serde(default = "default_min_rank")]
    pub min_rank: u8,
    /// Highest rank this modifier can appear at (inclusive). `None` is unbounded.
    #[serde(default)]
    pub max_rank: Option<u8>,
    /// Base selection weight. Must be positive.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_min_rank() -> u8 {
    1
}

fn default_weight() -> f64 {
    1.0
}

impl ModifierDefinition {
    /// A modifier with default rank window and weight.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ModifierCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category,
            color: String::new(),
            min_rank: default_min_rank(),
            max_rank: None,
            weight: default_weight(),
        }
    }

    /// Restrict the rank window.
    pub fn with_ranks(mut self, min_rank: u8, max_rank: Option<u8>) -> Self {
        self.min_rank = min_rank;
        self.max_rank = max_rank;
        self
    }

    /// Set the base selection weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Whether this modifier may be drawn for a run at `rank`.
    pub fn is_eligible(&self, rank: u8) -> bool {
        self.min_rank <= rank && self.max_rank.is_none_or(|max| max >= rank)
    }
}
