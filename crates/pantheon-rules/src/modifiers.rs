//! Weighted draw of challenge modifiers for a run.
//!
//! Modifiers are drawn without replacement from the pool eligible at the run's
//! rank. Once a category has been drawn, further modifiers of that category
//! have their weight scaled down, so a set spreads across categories unless
//! the pool offers nothing else.

use std::collections::HashSet;

use pantheon_core::{GameSettings, MAX_MODIFIERS_PER_RUN, ModifierCategory, ModifierDefinition};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::rank::RankResolver;

/// The modifiers chosen for one run, in draw order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunModifierSet {
    modifiers: Vec<ModifierDefinition>,
}

impl RunModifierSet {
    /// An empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of modifiers.
    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    /// Whether no modifiers were drawn.
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    /// The modifiers in draw order.
    pub fn as_slice(&self) -> &[ModifierDefinition] {
        &self.modifiers
    }

    /// Modifier ids in draw order.
    pub fn ids(&self) -> Vec<&str> {
        self.modifiers.iter().map(|m| m.id.as_str()).collect()
    }

    /// Consume the set into its modifiers.
    pub fn into_vec(self) -> Vec<ModifierDefinition> {
        self.modifiers
    }
}

/// Draws modifier sets according to rank and game settings.
#[derive(Debug, Clone, Copy)]
pub struct ModifierSelector<'a> {
    resolver: RankResolver<'a>,
    per_run: usize,
    repeat_penalty: f64,
}

impl<'a> ModifierSelector<'a> {
    /// Create a selector. The per-run count is capped at
    /// [`MAX_MODIFIERS_PER_RUN`].
    pub fn new(resolver: RankResolver<'a>, settings: &GameSettings) -> Self {
        Self {
            resolver,
            per_run: settings.modifiers_per_run.min(MAX_MODIFIERS_PER_RUN),
            repeat_penalty: settings.repeat_category_penalty,
        }
    }

    /// How many modifiers a run at `rank` should get.
    pub fn target_count(&self, rank: u8) -> usize {
        if self.resolver.carries_modifiers(rank) {
            self.per_run
        } else {
            0
        }
    }

    /// Draw the modifier set for a run at `rank` from `catalog`.
    ///
    /// Returns fewer than the target count when the eligible pool runs out.
    pub fn select<R: Rng + ?Sized>(
        &self,
        rank: u8,
        catalog: &[ModifierDefinition],
        rng: &mut R,
    ) -> RunModifierSet {
        let target = self.target_count(rank);
        if target == 0 {
            return RunModifierSet::empty();
        }

        let mut pool: Vec<&ModifierDefinition> =
            catalog.iter().filter(|m| m.is_eligible(rank)).collect();
        let mut used: HashSet<ModifierCategory> = HashSet::new();
        let mut selected = Vec::with_capacity(target);

        while selected.len() < target && !pool.is_empty() {
            let weights: Vec<f64> = pool
                .iter()
                .map(|m| {
                    if used.contains(&m.category) {
                        m.weight * self.repeat_penalty
                    } else {
                        m.weight
                    }
                })
                .collect();
            let index = pick_weighted(&weights, rng.random::<f64>());
            let pick = pool.remove(index);
            log::trace!(
                "rank {rank}: drew modifier '{}' ({}) from {} candidates",
                pick.id,
                pick.category,
                weights.len()
            );
            used.insert(pick.category);
            selected.push(pick.clone());
        }

        RunModifierSet { modifiers: selected }
    }
}

/// Cumulative-weight pick.
///
/// `unit` is a uniform draw in `[0, 1)`. The draw is scaled to the total
/// weight and walked down; the first candidate that brings the remainder to
/// zero or below wins. If rounding leaves a sliver of remainder after the
/// last candidate, the last candidate wins. Negative or NaN weights count as
/// zero, and an all-zero pool falls back to a uniform pick.
fn pick_weighted(weights: &[f64], unit: f64) -> usize {
    debug_assert!(!weights.is_empty());
    let last = weights.len() - 1;
    let clean = |w: f64| if w.is_finite() { w.max(0.0) } else { 0.0 };

    let total: f64 = weights.iter().copied().map(clean).sum();
    if total <= 0.0 {
        return ((unit * weights.len() as f64) as usize).min(last);
    }

    let mut remainder = unit * total;
    for (index, &w) in weights.iter().enumerate() {
        let w = clean(w);
        if w <= 0.0 {
            continue;
        }
        remainder -= w;
        if remainder <= 0.0 {
            return index;
        }
    }
    weights.iter().rposition(|&w| clean(w) > 0.0).unwrap_or(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantheon_core::RankTable;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn m(id: &str, category: ModifierCategory) -> ModifierDefinition {
        ModifierDefinition::new(id, id, category)
    }

    fn mixed_catalog() -> Vec<ModifierDefinition> {
        vec![
            m("frenzy", ModifierCategory::EnemyBuff),
            m("ironhide", ModifierCategory::EnemyBuff).with_ranks(3, None),
            m("frail", ModifierCategory::PlayerDebuff),
            m("fog", ModifierCategory::CombatDynamic).with_ranks(1, Some(4)),
            m("famine", ModifierCategory::Economy).with_ranks(6, Some(8)),
            m("tithe", ModifierCategory::Economy).with_weight(3.0),
        ]
    }

    fn with_selector<T>(f: impl FnOnce(ModifierSelector<'_>) -> T) -> T {
        let table = RankTable::canonical();
        let settings = GameSettings::default();
        f(ModifierSelector::new(RankResolver::new(&table), &settings))
    }

    #[test]
    fn rank_zero_is_empty() {
        with_selector(|sel| {
            let mut rng = StdRng::seed_from_u64(1);
            for _ in 0..20 {
                assert!(sel.select(0, &mixed_catalog(), &mut rng).is_empty());
            }
            assert_eq!(sel.target_count(0), 0);
        });
    }

    #[test]
    fn draws_two_above_rank_zero() {
        with_selector(|sel| {
            let mut rng = StdRng::seed_from_u64(7);
            for rank in 1..=10 {
                let set = sel.select(rank, &mixed_catalog(), &mut rng);
                assert_eq!(set.len(), 2, "rank {rank}");
            }
        });
    }

    #[test]
    fn per_run_count_is_capped() {
        let table = RankTable::canonical();
        let settings = GameSettings {
            modifiers_per_run: 4,
            ..GameSettings::default()
        };
        let sel = ModifierSelector::new(RankResolver::new(&table), &settings);
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(sel.target_count(3), 2);
        assert_eq!(sel.select(8, &mixed_catalog(), &mut rng).len(), 2);
    }

    #[test]
    fn respects_rank_window() {
        with_selector(|sel| {
            let mut rng = StdRng::seed_from_u64(3);
            for _ in 0..200 {
                for rank in 1..=10 {
                    for picked in sel.select(rank, &mixed_catalog(), &mut rng).as_slice() {
                        assert!(picked.is_eligible(rank), "{} at rank {rank}", picked.id);
                    }
                }
            }
        });
    }

    #[test]
    fn no_duplicates() {
        with_selector(|sel| {
            let mut rng = StdRng::seed_from_u64(11);
            for _ in 0..500 {
                let set = sel.select(5, &mixed_catalog(), &mut rng);
                let ids = set.ids();
                assert_ne!(ids[0], ids[1]);
            }
        });
    }

    #[test]
    fn single_category_still_fills() {
        let catalog = vec![
            m("a", ModifierCategory::EnemyBuff),
            m("b", ModifierCategory::EnemyBuff),
            m("c", ModifierCategory::EnemyBuff),
        ];
        with_selector(|sel| {
            let mut rng = StdRng::seed_from_u64(5);
            for _ in 0..50 {
                assert_eq!(sel.select(2, &catalog, &mut rng).len(), 2);
            }
        });
    }

    #[test]
    fn exhausted_pool_returns_what_exists() {
        let catalog = vec![
            m("only", ModifierCategory::Economy),
            m("later", ModifierCategory::EnemyBuff).with_ranks(9, None),
        ];
        with_selector(|sel| {
            let mut rng = StdRng::seed_from_u64(5);
            let set = sel.select(3, &catalog, &mut rng);
            assert_eq!(set.ids(), ["only"]);
            assert!(sel.select(3, &[], &mut rng).is_empty());
        });
    }

    #[test]
    fn deterministic_with_seed() {
        with_selector(|sel| {
            let a = sel.select(6, &mixed_catalog(), &mut StdRng::seed_from_u64(99));
            let b = sel.select(6, &mixed_catalog(), &mut StdRng::seed_from_u64(99));
            assert_eq!(a, b);
        });
    }

    #[test]
    fn repeat_category_is_penalized() {
        // Two enemy buffs and one economy modifier, equal weights. Without the
        // penalty both-enemy would come up a third of the time; with 0.3 it is
        // about 15%.
        let catalog = vec![
            m("a", ModifierCategory::EnemyBuff),
            m("b", ModifierCategory::EnemyBuff),
            m("c", ModifierCategory::Economy),
        ];
        with_selector(|sel| {
            let mut rng = StdRng::seed_from_u64(2024);
            let trials = 4000;
            let both_enemy = (0..trials)
                .filter(|_| !sel.select(1, &catalog, &mut rng).ids().contains(&"c"))
                .count();
            assert!(both_enemy < trials / 4, "both-enemy draws: {both_enemy}");
            assert!(both_enemy > trials / 20, "both-enemy draws: {both_enemy}");
        });
    }

    #[test]
    fn heavier_weight_wins_more() {
        let catalog = vec![
            m("light", ModifierCategory::EnemyBuff),
            m("heavy", ModifierCategory::Economy).with_weight(9.0),
        ];
        let table = RankTable::canonical();
        let settings = GameSettings {
            modifiers_per_run: 1,
            ..GameSettings::default()
        };
        let sel = ModifierSelector::new(RankResolver::new(&table), &settings);
        let mut rng = StdRng::seed_from_u64(8);
        let heavy = (0..1000)
            .filter(|_| sel.select(1, &catalog, &mut rng).ids() == ["heavy"])
            .count();
        assert!(heavy > 800, "heavy picked {heavy} times");
    }

    #[test]
    fn pick_weighted_walks_cumulative_weights() {
        let weights = [1.0, 2.0, 1.0];
        assert_eq!(pick_weighted(&weights, 0.0), 0);
        assert_eq!(pick_weighted(&weights, 0.2), 0);
        assert_eq!(pick_weighted(&weights, 0.25), 0);
        assert_eq!(pick_weighted(&weights, 0.5), 1);
        assert_eq!(pick_weighted(&weights, 0.9), 2);
    }

    #[test]
    fn pick_weighted_tolerates_rounding() {
        // 0.1 + 0.2 + 0.3 does not subtract back to exactly zero.
        let weights = [0.1, 0.2, 0.3];
        assert_eq!(pick_weighted(&weights, 1.0), 2);
        assert_eq!(pick_weighted(&weights, 1.0 - f64::EPSILON), 2);
    }

    #[test]
    fn pick_weighted_skips_zero_weights() {
        assert_eq!(pick_weighted(&[0.0, 1.0, 0.0], 0.0), 1);
        assert_eq!(pick_weighted(&[0.0, 1.0, 0.0], 0.99), 1);
        assert_eq!(pick_weighted(&[1.0, f64::NAN], 0.99), 0);
    }

    #[test]
    fn pick_weighted_all_zero_is_uniform() {
        assert_eq!(pick_weighted(&[0.0, 0.0], 0.1), 0);
        assert_eq!(pick_weighted(&[0.0, 0.0], 0.9), 1);
    }

    #[test]
    fn modifier_set_serializes_as_list() {
        let set = RunModifierSet {
            modifiers: vec![m("a", ModifierCategory::Economy)],
        };
        let json = serde_json::to_value(&set).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], "a");
    }

    proptest! {
        #[test]
        fn selection_invariants(rank in 0u8..=10, seed in any::<u64>()) {
            let table = RankTable::canonical();
            let settings = GameSettings::default();
            let sel = ModifierSelector::new(RankResolver::new(&table), &settings);
            let mut rng = StdRng::seed_from_u64(seed);
            let set = sel.select(rank, &mixed_catalog(), &mut rng);

            prop_assert!(set.len() <= 2);
            if rank == 0 {
                prop_assert!(set.is_empty());
            }
            let eligible = mixed_catalog().iter().filter(|m| m.is_eligible(rank)).count();
            prop_assert_eq!(set.len(), eligible.min(sel.target_count(rank)));
            for picked in set.as_slice() {
                prop_assert!(picked.is_eligible(rank));
            }
            let ids: HashSet<&str> = set.ids().into_iter().collect();
            prop_assert_eq!(ids.len(), set.len());
        }
    }
}
