//! Rarity tiers - ordinal classification driving base earnings and mint cost

use serde::{Deserialize, Serialize};

/// Ordered rarity classification for characters.
///
/// The ordering (`Common < Rare < Legendary`) is meaningful: department
/// eligibility requirements compare against it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum RarityTier {
    #[default]
    Common,
    Rare,
    Legendary,
}

impl RarityTier {
    /// Inclusive range of base daily earnings rolled at mint time.
    pub fn base_earning_range(&self) -> (u64, u64) {
        match self {
            RarityTier::Common => (15, 50),
            RarityTier::Rare => (51, 150),
            RarityTier::Legendary => (151, 400),
        }
    }

    /// Lower bound below which computed earnings never fall for this tier.
    pub fn earnings_floor(&self) -> u64 {
        self.base_earning_range().0
    }

    /// Token cost charged when minting a character of this tier.
    pub fn mint_cost(&self) -> u64 {
        match self {
            RarityTier::Common => 100,
            RarityTier::Rare => 250,
            RarityTier::Legendary => 1_000,
        }
    }
}

impl std::fmt::Display for RarityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RarityTier::Common => write!(f, "common"),
            RarityTier::Rare => write!(f, "rare"),
            RarityTier::Legendary => write!(f, "legendary"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        assert!(RarityTier::Common < RarityTier::Rare);
        assert!(RarityTier::Rare < RarityTier::Legendary);
    }

    #[test]
    fn test_earnings_floor_matches_range_minimum() {
        for tier in [RarityTier::Common, RarityTier::Rare, RarityTier::Legendary] {
            let (min, max) = tier.base_earning_range();
            assert!(min <= max);
            assert_eq!(tier.earnings_floor(), min);
        }
    }
}
