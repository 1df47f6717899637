//! Unlock and eligibility rules for ranks, companions, talents, and decks.
//!
//! Every check is a plain predicate. The mutating helpers apply the same
//! predicate first and refuse silently (returning `false`) when it fails, so a
//! UI that greys out an option and the code that acts on it always agree.

use std::collections::BTreeMap;

use pantheon_core::settings::MAX_COMPANION_SLOTS;
use pantheon_core::{
    CompanionDefinition, GameSettings, God, PlayerProgress, TalentTier, UnlockCondition,
};
use serde::{Deserialize, Serialize};

use crate::deck::{DeckCard, can_add_card};
use crate::rank::RankResolver;

/// Result of a companion purchase attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOutcome {
    /// Whether the companion was bought.
    pub success: bool,
    /// Favor token balance after the attempt.
    pub new_favor_balance: u32,
}

/// Decides what a player may select, equip, or buy.
#[derive(Debug, Clone, Copy)]
pub struct UnlockGate<'a> {
    resolver: RankResolver<'a>,
    settings: &'a GameSettings,
}

impl<'a> UnlockGate<'a> {
    /// Create a gate.
    pub fn new(resolver: RankResolver<'a>, settings: &'a GameSettings) -> Self {
        Self { resolver, settings }
    }

    // -----------------------------------------------------------------------
    // Ranks
    // -----------------------------------------------------------------------

    /// Whether a run at `rank` may be started.
    pub fn can_select_rank(&self, rank: u8, total_victories: u32) -> bool {
        self.resolver.can_select_rank(rank, total_victories)
    }

    /// Every rank the player may currently start a run at.
    pub fn selectable_ranks(&self, total_victories: u32) -> Vec<u8> {
        (0..=self.resolver.current_rank(total_victories)).collect()
    }

    // -----------------------------------------------------------------------
    // Companions
    // -----------------------------------------------------------------------

    /// Whether the player owns `companion`.
    pub fn is_companion_unlocked(
        &self,
        companion: &CompanionDefinition,
        progress: &PlayerProgress,
    ) -> bool {
        match &companion.unlock_condition {
            UnlockCondition::TutorialComplete => true,
            UnlockCondition::DivineRank(n) => {
                self.resolver.current_rank(progress.total_victories) >= *n
            }
            UnlockCondition::FavorTokensCost | UnlockCondition::Other(_) => {
                progress.is_unlocked(&companion.id)
            }
        }
    }

    /// Companion slots available: one, or two once the configured rank has
    /// been completed.
    pub fn companion_slots(&self, progress: &PlayerProgress) -> usize {
        let second_slot = progress.highest_rank_completed
            >= i32::from(self.settings.companion_second_slot_rank);
        let slots = if second_slot { 2 } else { 1 };
        slots.min(MAX_COMPANION_SLOTS)
    }

    /// Whether `companion` can be equipped right now.
    pub fn can_equip(&self, companion: &CompanionDefinition, progress: &PlayerProgress) -> bool {
        self.is_companion_unlocked(companion, progress)
            && !progress.is_equipped(&companion.id)
            && progress.equipped_companions.len() < self.companion_slots(progress)
    }

    /// Equip `companion`. Returns false, changing nothing, if not allowed.
    pub fn equip(&self, companion: &CompanionDefinition, progress: &mut PlayerProgress) -> bool {
        if !self.can_equip(companion, progress) {
            log::debug!("refused to equip companion '{}'", companion.id);
            return false;
        }
        progress.equipped_companions.push(companion.id.clone());
        true
    }

    /// Unequip the companion with `id`. Returns false if it was not equipped.
    pub fn unequip(&self, id: &str, progress: &mut PlayerProgress) -> bool {
        let before = progress.equipped_companions.len();
        progress.equipped_companions.retain(|e| e != id);
        progress.equipped_companions.len() < before
    }

    /// Buy `companion` with favor tokens.
    ///
    /// Refused, changing nothing, when the balance is short or the companion
    /// is already owned.
    pub fn purchase(
        &self,
        companion: &CompanionDefinition,
        progress: &mut PlayerProgress,
    ) -> PurchaseOutcome {
        if progress.is_unlocked(&companion.id) || progress.favor_tokens < companion.unlock_cost {
            log::debug!(
                "refused purchase of '{}': cost {}, balance {}",
                companion.id,
                companion.unlock_cost,
                progress.favor_tokens
            );
            return PurchaseOutcome {
                success: false,
                new_favor_balance: progress.favor_tokens,
            };
        }
        progress.favor_tokens -= companion.unlock_cost;
        progress.unlocked_companions.insert(companion.id.clone());
        PurchaseOutcome {
            success: true,
            new_favor_balance: progress.favor_tokens,
        }
    }

    // -----------------------------------------------------------------------
    // Talents
    // -----------------------------------------------------------------------

    /// Completed runs with a god needed to pick a talent at `tier`.
    pub fn runs_required(&self, tier: TalentTier) -> u32 {
        self.settings.talent_tier_runs[tier.index()]
    }

    /// Whether a talent at `tier` may be picked for `god`.
    pub fn can_select_talent_tier(
        &self,
        god: God,
        tier: TalentTier,
        god_runs_completed: &BTreeMap<God, u32>,
    ) -> bool {
        if tier == TalentTier::Four && !god.has_fourth_tier() {
            return false;
        }
        let runs = god_runs_completed.get(&god).copied().unwrap_or(0);
        runs >= self.runs_required(tier)
    }

    /// Tiers currently open for `god`.
    pub fn available_talent_tiers(&self, god: God, progress: &PlayerProgress) -> Vec<TalentTier> {
        god.talent_tiers()
            .iter()
            .copied()
            .filter(|t| self.can_select_talent_tier(god, *t, &progress.god_runs_completed))
            .collect()
    }

    /// Pick talent `key` for `god` at `tier`. Returns false if the tier is locked.
    pub fn select_talent(
        &self,
        god: God,
        tier: TalentTier,
        key: &str,
        progress: &mut PlayerProgress,
    ) -> bool {
        if !self.can_select_talent_tier(god, tier, &progress.god_runs_completed) {
            log::debug!("refused {tier} talent '{key}' for {god}");
            return false;
        }
        progress.talents.set(god, tier, key);
        true
    }

    // -----------------------------------------------------------------------
    // Custom deck
    // -----------------------------------------------------------------------

    /// Whether `card` fits in the configured deck budget next to `points_used`.
    pub fn can_add_card(&self, card: &DeckCard, points_used: u32) -> bool {
        can_add_card(card.cost, points_used, self.settings.deck_point_budget)
    }
}
