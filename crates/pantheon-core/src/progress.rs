//! A player's persistent progress as read from the profile store.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::god::{God, TalentTier};
use crate::settings::DEFAULT_STARTING_LIVES;

/// The chosen talent key per god, one map per tier.
///
/// Tiers are independent: a tier-2 pick does not need a tier-1 pick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentSelections {
    /// Tier 1 picks.
    #[serde(default, rename = "god_talents_tier1")]
    pub tier1: BTreeMap<God, String>,
    /// Tier 2 picks.
    #[serde(default, rename = "god_talents_tier2")]
    pub tier2: BTreeMap<God, String>,
    /// Tier 3 picks.
    #[serde(default, rename = "god_talents_tier3")]
    pub tier3: BTreeMap<God, String>,
    /// Tier 4 picks.
    #[serde(default, rename = "god_talents_tier4")]
    pub tier4: BTreeMap<God, String>,
}

impl TalentSelections {
    /// The map for one tier.
    pub fn tier(&self, tier: TalentTier) -> &BTreeMap<God, String> {
        match tier {
            TalentTier::One => &self.tier1,
            TalentTier::Two => &self.tier2,
            TalentTier::Three => &self.tier3,
            TalentTier::Four => &self.tier4,
        }
    }

    /// Mutable map for one tier.
    pub fn tier_mut(&mut self, tier: TalentTier) -> &mut BTreeMap<God, String> {
        match tier {
            TalentTier::One => &mut self.tier1,
            TalentTier::Two => &mut self.tier2,
            TalentTier::Three => &mut self.tier3,
            TalentTier::Four => &mut self.tier4,
        }
    }

    /// The talent chosen for `god` at `tier`, if any.
    pub fn get(&self, god: God, tier: TalentTier) -> Option<&str> {
        self.tier(tier).get(&god).map(String::as_str)
    }

    /// Record a pick, replacing any previous one for that god and tier.
    pub fn set(&mut self, god: God, tier: TalentTier, key: impl Into<String>) {
        self.tier_mut(tier).insert(god, key.into());
    }
}

/// Player progress relevant to ranks and unlocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProgress {
    /// Cumulative victories across all runs.
    pub total_victories: u32,
    /// Highest rank a run has been won at, or -1 if none.
    pub highest_rank_completed: i32,
    /// Completed runs per god.
    pub god_runs_completed: BTreeMap<God, u32>,
    /// Companions the player owns.
    pub unlocked_companions: BTreeSet<String>,
    /// Companions currently equipped, in slot order.
    pub equipped_companions: Vec<String>,
    /// Favor token balance.
    pub favor_tokens: u32,
    /// Essence crystal balance.
    pub essence_crystals: u32,
    /// Remaining lives.
    pub lives: u32,
    /// Talent picks per tier.
    #[serde(flatten)]
    pub talents: TalentSelections,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            total_victories: 0,
            highest_rank_completed: -1,
            god_runs_completed: BTreeMap::new(),
            unlocked_companions: BTreeSet::new(),
            equipped_companions: Vec::new(),
            favor_tokens: 0,
            essence_crystals: 0,
            lives: DEFAULT_STARTING_LIVES,
            talents: TalentSelections::default(),
        }
    }
}

impl PlayerProgress {
    /// Completed runs with `god`.
    pub fn runs_with(&self, god: God) -> u32 {
        self.god_runs_completed.get(&god).copied().unwrap_or(0)
    }

    /// Whether the companion with `id` is owned.
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked_companions.contains(id)
    }

    /// Whether the companion with `id` is equipped.
    pub fn is_equipped(&self, id: &str) -> bool {
        self.equipped_companions.iter().any(|e| e == id)
    }
}
