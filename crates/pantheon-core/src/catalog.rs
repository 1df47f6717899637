//! The content catalog: rank table, modifiers, companions, and settings.
//!
//! A catalog is a single JSON document. Every section is optional and falls
//! back to its default, so a catalog that only lists modifiers still carries
//! the canonical rank table:
//!
//! ```json
//! {
//!   "modifiers": [
//!     { "id": "frenzy", "name": "Frenzy", "category": "enemy_buff", "weight": 2.0 }
//!   ],
//!   "companions": [
//!     { "id": "owl", "name": "Owl", "unlock_condition": "divine_rank_3" }
//!   ],
//!   "settings": { "companion_second_slot_rank": 5 }
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::companion::CompanionDefinition;
use crate::error::{CatalogError, CatalogResult};
use crate::modifier::ModifierDefinition;
use crate::rank::{MAX_RANK, RankTable};
use crate::settings::{GameSettings, MAX_MODIFIERS_PER_RUN};

/// Everything the rules engine reads from content data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// Rank tiers and their thresholds.
    pub ranks: RankTable,
    /// Modifier pool.
    pub modifiers: Vec<ModifierDefinition>,
    /// Companion roster.
    pub companions: Vec<CompanionDefinition>,
    /// Game-wide tunables.
    pub settings: GameSettings,
}

impl Catalog {
    /// Parse and validate a catalog from JSON text.
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read, parse, and validate a catalog file.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load a catalog file, or fall back to [`Catalog::default`] if it
    /// cannot be read or is invalid.
    ///
    /// The fallback has the canonical rank table and no modifiers or
    /// companions.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::warn!(
                    "catalog {} unavailable, using defaults: {e}",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Check cross-entry invariants that serde alone cannot.
    pub fn validate(&self) -> CatalogResult<()> {
        let mut ids = HashSet::new();
        for m in &self.modifiers {
            if !ids.insert(m.id.as_str()) {
                return Err(CatalogError::Validation(format!(
                    "duplicate modifier id '{}'",
                    m.id
                )));
            }
            if !(m.weight.is_finite() && m.weight > 0.0) {
                return Err(CatalogError::Validation(format!(
                    "modifier '{}' has non-positive weight {}",
                    m.id, m.weight
                )));
            }
            if m.min_rank == 0 {
                return Err(CatalogError::Validation(format!(
                    "modifier '{}' has min_rank 0; rank 0 never carries modifiers",
                    m.id
                )));
            }
            if let Some(max) = m.max_rank.filter(|&max| max < m.min_rank) {
                return Err(CatalogError::Validation(format!(
                    "modifier '{}' has max_rank {max} below min_rank {}",
                    m.id, m.min_rank
                )));
            }
        }

        let mut ids = HashSet::new();
        for c in &self.companions {
            if !ids.insert(c.id.as_str()) {
                return Err(CatalogError::Validation(format!(
                    "duplicate companion id '{}'",
                    c.id
                )));
            }
        }

        let s = &self.settings;
        if !(s.repeat_category_penalty.is_finite() && s.repeat_category_penalty > 0.0) {
            return Err(CatalogError::Validation(format!(
                "repeat_category_penalty must be positive, found {}",
                s.repeat_category_penalty
            )));
        }
        if s.modifiers_per_run > MAX_MODIFIERS_PER_RUN {
            return Err(CatalogError::Validation(format!(
                "modifiers_per_run {} exceeds {MAX_MODIFIERS_PER_RUN}",
                s.modifiers_per_run
            )));
        }
        if s.talent_tier_runs.windows(2).any(|w| w[1] < w[0]) {
            return Err(CatalogError::Validation(format!(
                "talent_tier_runs must be non-decreasing, found {:?}",
                s.talent_tier_runs
            )));
        }
        if s.companion_second_slot_rank > MAX_RANK {
            return Err(CatalogError::Validation(format!(
                "companion_second_slot_rank {} exceeds max rank {MAX_RANK}",
                s.companion_second_slot_rank
            )));
        }

        Ok(())
    }

    /// Look up a modifier by id.
    pub fn modifier(&self, id: &str) -> Option<&ModifierDefinition> {
        self.modifiers.iter().find(|m| m.id == id)
    }

    /// Look up a companion by id.
    pub fn companion(&self, id: &str) -> Option<&CompanionDefinition> {
        self.companions.iter().find(|c| c.id == id)
    }
}
