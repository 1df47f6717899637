//! Core types for Pantheon: rank tiers, modifiers, companions, and player progress.
//!
//! This crate is the data model the rules engine works over. Nothing here
//! derives ranks or decides unlocks; it only describes the content catalog
//! and the records exchanged with the profile and run stores.

/// Content catalog bundle and its JSON loader.
pub mod catalog;
/// Companion definitions and unlock conditions.
pub mod companion;
/// Error types used throughout the crate.
pub mod error;
/// Playable gods and talent tiers.
pub mod god;
/// Challenge modifier definitions.
pub mod modifier;
/// Player progress records.
pub mod progress;
/// Rank tiers, the rank table, and victory rewards.
pub mod rank;
/// Run records.
pub mod run;
/// Game-wide settings.
pub mod settings;

/// Re-export the catalog bundle.
pub use catalog::Catalog;
/// Re-export companion types.
pub use companion::{CompanionDefinition, UnlockCondition};
/// Re-export error types.
pub use error::{CatalogError, CatalogResult};
/// Re-export god and talent types.
pub use god::{God, TalentTier};
/// Re-export modifier types.
pub use modifier::{ModifierCategory, ModifierDefinition};
/// Re-export progress types.
pub use progress::{PlayerProgress, TalentSelections};
/// Re-export rank types.
pub use rank::{MAX_RANK, RankTable, RankTier, Reward, TierLabel};
/// Re-export run types.
pub use run::{RunId, RunRecord, RunStatus};
/// Re-export settings.
pub use settings::{GameSettings, MAX_COMPANION_SLOTS, MAX_MODIFIERS_PER_RUN};
