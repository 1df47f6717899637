//! Divine rank tiers and the table that orders them.
//!
//! A [`RankTable`] is plain configuration data: it is loaded with the rest of
//! the catalog (or built from [`RankTable::canonical`]) and handed to whatever
//! needs to derive a rank from a victory count.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// The highest divine rank a table may define.
pub const MAX_RANK: u8 = 10;

/// Canonical cumulative victories needed to unlock each rank, indexed by rank.
pub const CANONICAL_THRESHOLDS: [u32; 11] = [0, 1, 3, 5, 8, 12, 16, 20, 25, 30, 40];

/// Broad tier a rank belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TierLabel {
    /// No divine favor yet. Runs carry no modifiers.
    Mortal,
    /// First steps of ascension.
    Ascendant,
    /// Half-divine.
    #[serde(rename = "Demi-God")]
    DemiGod,
    /// Fully divine.
    Divine,
    /// The final rank.
    Eternal,
}

impl std::fmt::Display for TierLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mortal => write!(f, "Mortal"),
            Self::Ascendant => write!(f, "Ascendant"),
            Self::DemiGod => write!(f, "Demi-God"),
            Self::Divine => write!(f, "Divine"),
            Self::Eternal => write!(f, "Eternal"),
        }
    }
}

/// Currency granted for winning a run at a given rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reward {
    /// Favor tokens, spent on companions.
    pub favor_tokens: u32,
    /// Essence crystals.
    pub essence_crystals: u32,
}

impl Reward {
    /// The victory reward for a run at `rank`.
    ///
    /// Ten favor and five essence per rank; rank 0 pays a flat 5 favor and
    /// 2 essence. Every place that previews or grants a reward goes through
    /// this function.
    pub fn for_rank(rank: u8) -> Self {
        if rank == 0 {
            Self {
                favor_tokens: 5,
                essence_crystals: 2,
            }
        } else {
            Self {
                favor_tokens: u32::from(rank) * 10,
                essence_crystals: u32::from(rank) * 5,
            }
        }
    }
}

/// One entry of the rank table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankTier {
    /// Rank number, 0 to [`MAX_RANK`].
    pub rank: u8,
    /// Display name, e.g. "Ascendant II".
    pub name: String,
    /// Broad tier this rank belongs to.
    pub tier: TierLabel,
    /// Cumulative victories required to unlock this rank.
    pub victory_threshold: u32,
}

impl RankTier {
    /// The victory reward at this rank.
    pub fn reward(&self) -> Reward {
        Reward::for_rank(self.rank)
    }
}

/// An ordered, validated list of rank tiers.
///
/// Ranks are contiguous from 0, rank 0 needs no victories, and thresholds
/// strictly increase with rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RankTier>", into = "Vec<RankTier>")]
pub struct RankTable {
    tiers: Vec<RankTier>,
}

impl RankTable {
    /// Build a table, checking the ordering invariants.
    pub fn new(mut tiers: Vec<RankTier>) -> CatalogResult<Self> {
        if tiers.is_empty() {
            return Err(CatalogError::Validation(
                "rank table must define at least rank 0".to_string(),
            ));
        }
        tiers.sort_by_key(|t| t.rank);

        for (index, tier) in tiers.iter().enumerate() {
            if usize::from(tier.rank) != index {
                return Err(CatalogError::Validation(format!(
                    "rank table is not contiguous: expected rank {index}, found {}",
                    tier.rank
                )));
            }
        }
        if tiers.len() > usize::from(MAX_RANK) + 1 {
            return Err(CatalogError::Validation(format!(
                "rank table defines {} ranks, at most {} allowed",
                tiers.len(),
                MAX_RANK + 1
            )));
        }
        if tiers[0].victory_threshold != 0 {
            return Err(CatalogError::Validation(format!(
                "rank 0 must need 0 victories, found {}",
                tiers[0].victory_threshold
            )));
        }
        for pair in tiers.windows(2) {
            if pair[1].victory_threshold <= pair[0].victory_threshold {
                return Err(CatalogError::Validation(format!(
                    "threshold for rank {} ({}) must exceed rank {} ({})",
                    pair[1].rank,
                    pair[1].victory_threshold,
                    pair[0].rank,
                    pair[0].victory_threshold
                )));
            }
        }

        Ok(Self { tiers })
    }

    /// The canonical eleven-rank table.
    pub fn canonical() -> Self {
        let tiers = CANONICAL_THRESHOLDS
            .iter()
            .enumerate()
            .map(|(index, &victory_threshold)| {
                let rank = index as u8;
                let (tier, name) = canonical_name(rank);
                RankTier {
                    rank,
                    name,
                    tier,
                    victory_threshold,
                }
            })
            .collect();
        Self { tiers }
    }

    /// All tiers in rank order.
    pub fn tiers(&self) -> &[RankTier] {
        &self.tiers
    }

    /// Look up a tier by rank.
    pub fn get(&self, rank: u8) -> Option<&RankTier> {
        self.tiers.get(usize::from(rank))
    }

    /// Victories needed to unlock `rank`, if the table defines it.
    pub fn threshold(&self, rank: u8) -> Option<u32> {
        self.get(rank).map(|t| t.victory_threshold)
    }

    /// The highest rank in this table.
    pub fn max_rank(&self) -> u8 {
        // Non-empty and at most MAX_RANK + 1 entries, checked in `new`.
        (self.tiers.len() - 1) as u8
    }
}

impl Default for RankTable {
    fn default() -> Self {
        Self::canonical()
    }
}

impl TryFrom<Vec<RankTier>> for RankTable {
    type Error = CatalogError;

    fn try_from(tiers: Vec<RankTier>) -> CatalogResult<Self> {
        Self::new(tiers)
    }
}

impl From<RankTable> for Vec<RankTier> {
    fn from(table: RankTable) -> Self {
        table.tiers
    }
}

fn canonical_name(rank: u8) -> (TierLabel, String) {
    const NUMERALS: [&str; 3] = ["I", "II", "III"];
    match rank {
        0 => (TierLabel::Mortal, "Mortal".to_string()),
        1..=3 => (
            TierLabel::Ascendant,
            format!("Ascendant {}", NUMERALS[usize::from(rank - 1)]),
        ),
        4..=6 => (
            TierLabel::DemiGod,
            format!("Demi-God {}", NUMERALS[usize::from(rank - 4)]),
        ),
        7..=9 => (
            TierLabel::Divine,
            format!("Divine {}", NUMERALS[usize::from(rank - 7)]),
        ),
        _ => (TierLabel::Eternal, "Eternal".to_string()),
    }
}
