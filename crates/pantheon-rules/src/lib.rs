//! Progression rules for Pantheon.
//!
//! Derives the player's divine rank from lifetime victories, draws challenge
//! modifiers for a run, and answers every "is this allowed" question the
//! selection screens ask: rank choice, companion unlocks and slots, talent
//! tiers, and the custom deck budget. [`RunFlow`] ties these to the external
//! profile and run stores.

pub mod deck;
pub mod error;
pub mod flow;
pub mod modifiers;
pub mod rank;
pub mod store;
pub mod unlock;

pub use deck::{DeckBuilder, DeckCard};
pub use error::{FlowError, FlowResult, StoreError, StoreResult};
pub use flow::{Refusal, RunFlow, RunOutcome, RunPreview, RunRequest, RunStart, RunSummary};
pub use modifiers::{ModifierSelector, RunModifierSet};
pub use rank::{RankProgress, RankResolver};
pub use store::{MemoryStore, ProfileStore, ProfileUpdate, RunStore};
pub use unlock::{PurchaseOutcome, UnlockGate};
