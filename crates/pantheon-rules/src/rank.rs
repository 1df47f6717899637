//! Rank derivation from cumulative victories.
//!
//! [`RankResolver`] is the single place where a victory count becomes a
//! divine rank. Rank gating, progress bars, and reward previews all go
//! through it so they cannot drift apart.

use pantheon_core::{RankTable, RankTier, Reward, TierLabel};
use serde::{Deserialize, Serialize};

/// Where a player stands between their current rank and the next one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankProgress {
    /// Highest unlocked rank.
    pub current: u8,
    /// The rank after `current`, or `None` at the top of the table.
    pub next: Option<u8>,
    /// Progress through the current segment, 0 to 100.
    pub progress_percent: f64,
    /// Further victories needed to unlock `next`.
    pub victories_needed: u32,
}

/// Maps victory counts to ranks using a [`RankTable`].
#[derive(Debug, Clone, Copy)]
pub struct RankResolver<'a> {
    table: &'a RankTable,
}

impl<'a> RankResolver<'a> {
    /// Create a resolver over `table`.
    pub fn new(table: &'a RankTable) -> Self {
        Self { table }
    }

    /// The table this resolver reads.
    pub fn table(&self) -> &'a RankTable {
        self.table
    }

    /// The highest rank whose threshold is at or below `total_victories`.
    pub fn current_rank(&self, total_victories: u32) -> u8 {
        self.table
            .tiers()
            .iter()
            .rev()
            .find(|t| t.victory_threshold <= total_victories)
            .map(|t| t.rank)
            .unwrap_or(0)
    }

    /// The tier entry for the player's current rank.
    pub fn current_tier(&self, total_victories: u32) -> Option<&'a RankTier> {
        self.table.get(self.current_rank(total_victories))
    }

    /// Progress from the current rank toward the next.
    pub fn progress_to_next(&self, total_victories: u32) -> RankProgress {
        let current = self.current_rank(total_victories);
        let next = current.checked_add(1).filter(|n| self.table.get(*n).is_some());

        let (Some(next_rank), Some(from), Some(to)) = (
            next,
            self.table.threshold(current),
            next.and_then(|n| self.table.threshold(n)),
        ) else {
            return RankProgress {
                current,
                next: None,
                progress_percent: 100.0,
                victories_needed: 0,
            };
        };

        let span = f64::from(to - from);
        let done = f64::from(total_victories.saturating_sub(from));
        RankProgress {
            current,
            next: Some(next_rank),
            progress_percent: (done / span * 100.0).clamp(0.0, 100.0),
            victories_needed: to.saturating_sub(total_victories),
        }
    }

    /// The victory reward for a run at `rank`.
    pub fn reward_for_rank(&self, rank: u8) -> Reward {
        Reward::for_rank(rank)
    }

    /// Whether a player with `total_victories` may start a run at `rank`.
    pub fn can_select_rank(&self, rank: u8, total_victories: u32) -> bool {
        rank <= self.current_rank(total_victories)
    }

    /// Whether runs at `rank` carry modifiers at all.
    ///
    /// Rank 0 and any rank labelled Mortal never do.
    pub fn carries_modifiers(&self, rank: u8) -> bool {
        rank > 0
            && self
                .table
                .get(rank)
                .is_none_or(|t| t.tier != TierLabel::Mortal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantheon_core::rank::CANONICAL_THRESHOLDS;
    use proptest::prelude::*;

    fn canonical() -> RankTable {
        RankTable::canonical()
    }

    /// Reference definition: the largest rank whose threshold fits.
    fn highest_fitting(v: u32) -> u8 {
        CANONICAL_THRESHOLDS
            .iter()
            .rposition(|&t| t <= v)
            .map(|r| r as u8)
            .unwrap_or(0)
    }

    #[test]
    fn anchor_points() {
        let table = canonical();
        let r = RankResolver::new(&table);
        assert_eq!(r.current_rank(0), 0);
        assert_eq!(r.current_rank(39), 9);
        assert_eq!(r.current_rank(40), 10);
        assert_eq!(r.current_rank(u32::MAX), 10);
    }

    #[test]
    fn boundary_values() {
        let table = canonical();
        let r = RankResolver::new(&table);
        let expected = [
            (0, 0),
            (1, 1),
            (2, 1),
            (3, 2),
            (5, 3),
            (7, 3),
            (8, 4),
            (11, 4),
            (12, 5),
            (15, 5),
            (16, 6),
            (19, 6),
            (20, 7),
            (24, 7),
            (25, 8),
            (29, 8),
            (30, 9),
            (39, 9),
            (40, 10),
            (41, 10),
        ];
        for (victories, rank) in expected {
            assert_eq!(r.current_rank(victories), rank, "victories {victories}");
            assert_eq!(r.current_rank(victories), highest_fitting(victories));
        }
    }

    #[test]
    fn progress_at_zero() {
        let table = canonical();
        let p = RankResolver::new(&table).progress_to_next(0);
        assert_eq!(p.current, 0);
        assert_eq!(p.next, Some(1));
        assert_eq!(p.progress_percent, 0.0);
        assert_eq!(p.victories_needed, 1);
    }

    #[test]
    fn progress_mid_segment() {
        let table = canonical();
        let p = RankResolver::new(&table).progress_to_next(8);
        assert_eq!(p.current, 4);
        assert_eq!(p.next, Some(5));
        assert_eq!(p.victories_needed, 4);
        assert_eq!(p.progress_percent, 0.0);

        let p = RankResolver::new(&table).progress_to_next(10);
        assert_eq!(p.current, 4);
        assert_eq!(p.victories_needed, 2);
        assert!((p.progress_percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn progress_at_segment_starts() {
        // Landing exactly on a threshold starts the next segment at 0%.
        let table = canonical();
        let r = RankResolver::new(&table);
        for (victories, current, needed) in [(1, 1, 2), (3, 2, 2), (5, 3, 3), (8, 4, 4)] {
            let p = r.progress_to_next(victories);
            assert_eq!(p.current, current, "victories {victories}");
            assert_eq!(p.next, Some(current + 1));
            assert_eq!(p.victories_needed, needed, "victories {victories}");
            assert_eq!(p.progress_percent, 0.0);
        }
    }

    #[test]
    fn progress_just_before_threshold() {
        let table = canonical();
        let p = RankResolver::new(&table).progress_to_next(39);
        assert_eq!(p.current, 9);
        assert_eq!(p.next, Some(10));
        assert_eq!(p.victories_needed, 1);
        assert!((p.progress_percent - 90.0).abs() < 1e-9);
    }

    #[test]
    fn progress_at_top() {
        let table = canonical();
        for v in [40, 41, 1000] {
            let p = RankResolver::new(&table).progress_to_next(v);
            assert_eq!(p.current, 10);
            assert_eq!(p.next, None);
            assert_eq!(p.progress_percent, 100.0);
            assert_eq!(p.victories_needed, 0);
        }
    }

    #[test]
    fn short_custom_table() {
        let tiers = vec![
            RankTier {
                rank: 0,
                name: "Mortal".into(),
                tier: TierLabel::Mortal,
                victory_threshold: 0,
            },
            RankTier {
                rank: 1,
                name: "Hero".into(),
                tier: TierLabel::Ascendant,
                victory_threshold: 10,
            },
        ];
        let table = RankTable::new(tiers).unwrap();
        let r = RankResolver::new(&table);
        assert_eq!(r.current_rank(9), 0);
        assert_eq!(r.current_rank(10), 1);
        assert_eq!(r.progress_to_next(10).next, None);
        assert_eq!(r.progress_to_next(5).victories_needed, 5);
    }

    #[test]
    fn rewards_match_formula() {
        let table = canonical();
        let r = RankResolver::new(&table);
        assert_eq!(
            r.reward_for_rank(0),
            Reward {
                favor_tokens: 5,
                essence_crystals: 2
            }
        );
        assert_eq!(
            r.reward_for_rank(5),
            Reward {
                favor_tokens: 50,
                essence_crystals: 25
            }
        );
        assert_eq!(
            r.reward_for_rank(10),
            Reward {
                favor_tokens: 100,
                essence_crystals: 50
            }
        );
    }

    #[test]
    fn rank_zero_always_selectable() {
        let table = canonical();
        let r = RankResolver::new(&table);
        assert!(r.can_select_rank(0, 0));
        assert!(!r.can_select_rank(1, 0));
        assert!(r.can_select_rank(5, 12));
        assert!(!r.can_select_rank(6, 12));
    }

    #[test]
    fn modifiers_only_above_mortal() {
        let table = canonical();
        let r = RankResolver::new(&table);
        assert!(!r.carries_modifiers(0));
        for rank in 1..=10 {
            assert!(r.carries_modifiers(rank));
        }
    }

    #[test]
    fn mortal_label_suppresses_modifiers() {
        let tiers = vec![
            RankTier {
                rank: 0,
                name: "Mortal".into(),
                tier: TierLabel::Mortal,
                victory_threshold: 0,
            },
            RankTier {
                rank: 1,
                name: "Mortal+".into(),
                tier: TierLabel::Mortal,
                victory_threshold: 2,
            },
        ];
        let table = RankTable::new(tiers).unwrap();
        assert!(!RankResolver::new(&table).carries_modifiers(1));
    }

    proptest! {
        #[test]
        fn rank_is_monotonic(a in 0u32..200, b in 0u32..200) {
            let table = canonical();
            let r = RankResolver::new(&table);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(r.current_rank(lo) <= r.current_rank(hi));
        }

        #[test]
        fn rank_matches_threshold_definition(v in 0u32..500) {
            let table = canonical();
            prop_assert_eq!(RankResolver::new(&table).current_rank(v), highest_fitting(v));
        }

        #[test]
        fn select_rank_iff_unlocked(rank in 0u8..=10, v in 0u32..60) {
            let table = canonical();
            let r = RankResolver::new(&table);
            prop_assert_eq!(r.can_select_rank(rank, v), rank <= r.current_rank(v));
        }

        #[test]
        fn progress_is_bounded(v in 0u32..100) {
            let table = canonical();
            let p = RankResolver::new(&table).progress_to_next(v);
            prop_assert!((0.0..=100.0).contains(&p.progress_percent));
            match p.next {
                Some(n) => {
                    prop_assert_eq!(n, p.current + 1);
                    prop_assert_eq!(v + p.victories_needed, CANONICAL_THRESHOLDS[usize::from(n)]);
                }
                None => prop_assert_eq!(p.victories_needed, 0),
            }
        }
    }
}
