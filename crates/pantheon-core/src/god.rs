//! Playable gods and their talent tiers.

use serde::{Deserialize, Serialize};

/// A playable god.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum God {
    /// King of the gods.
    Zeus,
    /// Queen of the gods.
    Hera,
    /// God of the sea.
    Poseidon,
    /// God of the underworld.
    Hades,
    /// Goddess of wisdom and strategy.
    Athena,
    /// God of war.
    Ares,
    /// God of light and music.
    Apollo,
    /// Goddess of the hunt.
    Artemis,
    /// Messenger of the gods.
    Hermes,
    /// Goddess of love.
    Aphrodite,
}

impl God {
    /// Every playable god, in roster order.
    pub const ALL: [God; 10] = [
        God::Zeus,
        God::Hera,
        God::Poseidon,
        God::Hades,
        God::Athena,
        God::Ares,
        God::Apollo,
        God::Artemis,
        God::Hermes,
        God::Aphrodite,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            God::Zeus => "Zeus",
            God::Hera => "Hera",
            God::Poseidon => "Poseidon",
            God::Hades => "Hades",
            God::Athena => "Athena",
            God::Ares => "Ares",
            God::Apollo => "Apollo",
            God::Artemis => "Artemis",
            God::Hermes => "Hermes",
            God::Aphrodite => "Aphrodite",
        }
    }

    /// Parse a god from its name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|g| g.name().to_lowercase() == lower)
    }

    /// Whether this god has a fourth talent tier.
    pub fn has_fourth_tier(&self) -> bool {
        matches!(self, God::Zeus | God::Poseidon | God::Hades | God::Athena)
    }

    /// The talent tiers this god defines.
    pub fn talent_tiers(&self) -> &'static [TalentTier] {
        if self.has_fourth_tier() {
            &TalentTier::ALL
        } else {
            &TalentTier::ALL[..3]
        }
    }
}

impl std::fmt::Display for God {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One of the four talent unlock stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TalentTier {
    /// Tier 1.
    One,
    /// Tier 2.
    Two,
    /// Tier 3.
    Three,
    /// Tier 4. Only some gods have one.
    Four,
}

impl TalentTier {
    /// All tiers in order.
    pub const ALL: [TalentTier; 4] = [
        TalentTier::One,
        TalentTier::Two,
        TalentTier::Three,
        TalentTier::Four,
    ];

    /// The tier number, 1 to 4.
    pub fn number(&self) -> u8 {
        match self {
            TalentTier::One => 1,
            TalentTier::Two => 2,
            TalentTier::Three => 3,
            TalentTier::Four => 4,
        }
    }

    /// Zero-based index, for per-tier tables.
    pub fn index(&self) -> usize {
        usize::from(self.number() - 1)
    }

    /// The tier with the given number, if any.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(TalentTier::One),
            2 => Some(TalentTier::Two),
            3 => Some(TalentTier::Three),
            4 => Some(TalentTier::Four),
            _ => None,
        }
    }
}

impl std::fmt::Display for TalentTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tier {}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(God::parse("zeus"), Some(God::Zeus));
        assert_eq!(God::parse("  APHRODITE "), Some(God::Aphrodite));
        assert_eq!(God::parse("Odin"), None);
    }

    #[test]
    fn names_round_trip() {
        for god in God::ALL {
            assert_eq!(God::parse(god.name()), Some(god));
            assert_eq!(god.to_string(), god.name());
        }
    }

    #[test]
    fn fourth_tier_allow_list() {
        let with_four: Vec<God> = God::ALL
            .into_iter()
            .filter(|g| g.has_fourth_tier())
            .collect();
        assert_eq!(with_four, [God::Zeus, God::Poseidon, God::Hades, God::Athena]);
        assert_eq!(God::Zeus.talent_tiers().len(), 4);
        assert_eq!(God::Ares.talent_tiers().len(), 3);
    }

    #[test]
    fn tier_numbers() {
        for tier in TalentTier::ALL {
            assert_eq!(TalentTier::from_number(tier.number()), Some(tier));
        }
        assert_eq!(TalentTier::from_number(0), None);
        assert_eq!(TalentTier::from_number(5), None);
        assert_eq!(TalentTier::Three.index(), 2);
        assert_eq!(TalentTier::Four.to_string(), "Tier 4");
    }
}
