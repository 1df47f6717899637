//! Run records handed to the run store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::god::God;
use crate::modifier::ModifierDefinition;

/// Unique identifier for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Generate a new random run ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a run stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Being played.
    InProgress,
    /// Won.
    Victory,
    /// Lost.
    Defeat,
    /// Left behind when a newer run started.
    Abandoned,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InProgress => write!(f, "in_progress"),
            Self::Victory => write!(f, "victory"),
            Self::Defeat => write!(f, "defeat"),
            Self::Abandoned => write!(f, "abandoned"),
        }
    }
}

/// A single run as persisted by the run store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Run identifier.
    pub id: RunId,
    /// The god being played.
    pub god: God,
    /// Rank the run was started at.
    pub divine_rank: u8,
    /// Modifiers drawn for this run, in draw order.
    pub active_modifiers: Vec<ModifierDefinition>,
    /// Card ids in the starting deck.
    pub deck: Vec<String>,
    /// Whether the deck was built by the player.
    pub custom_deck: bool,
    /// Current status.
    pub status: RunStatus,
    /// When the run was created.
    pub created_at: DateTime<Utc>,
    /// When the run last changed.
    pub updated_at: DateTime<Utc>,
}

impl RunRecord {
    /// A fresh in-progress run.
    pub fn new(god: God, divine_rank: u8, active_modifiers: Vec<ModifierDefinition>) -> Self {
        let now = Utc::now();
        Self {
            id: RunId::new(),
            god,
            divine_rank,
            active_modifiers,
            deck: Vec::new(),
            custom_deck: false,
            status: RunStatus::InProgress,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a deck.
    pub fn with_deck(mut self, deck: Vec<String>, custom_deck: bool) -> Self {
        self.deck = deck;
        self.custom_deck = custom_deck;
        self
    }

    /// Move to a new status and bump `updated_at`.
    pub fn set_status(&mut self, status: RunStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Whether the run is still being played.
    pub fn is_in_progress(&self) -> bool {
        self.status == RunStatus::InProgress
    }
}
