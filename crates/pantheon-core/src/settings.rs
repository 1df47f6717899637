//! Game-wide tunables shipped with the catalog.

use serde::{Deserialize, Serialize};

/// Lives a fresh profile starts with.
pub const DEFAULT_STARTING_LIVES: u32 = 3;

/// Companion slots can never exceed this, whatever the settings say.
pub const MAX_COMPANION_SLOTS: usize = 2;

/// Upper bound on modifiers drawn for one run.
pub const MAX_MODIFIERS_PER_RUN: usize = 2;

/// Game-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Completed rank that opens the second companion slot.
    pub companion_second_slot_rank: u8,
    /// Point budget for a custom deck.
    pub deck_point_budget: u32,
    /// Completed runs with a god needed for talent tiers 1 to 4.
    pub talent_tier_runs: [u32; 4],
    /// Weight multiplier for a modifier whose category was already drawn.
    pub repeat_category_penalty: f64,
    /// Modifiers drawn for a run above the Mortal tier. At most
    /// [`MAX_MODIFIERS_PER_RUN`].
    pub modifiers_per_run: usize,
    /// Lives a fresh profile starts with.
    pub starting_lives: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            companion_second_slot_rank: 5,
            deck_point_budget: 30,
            talent_tier_runs: [1, 3, 6, 10],
            repeat_category_penalty: 0.3,
            modifiers_per_run: 2,
            starting_lives: DEFAULT_STARTING_LIVES,
        }
    }
}
