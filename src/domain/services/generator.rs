//! Character generator - seeded, reproducible mint-time attribute rolls

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::entities::CharacterBlueprint;
use crate::domain::value_objects::{DepartmentId, RarityTier};

const FIRST_NAMES: [&str; 12] = [
    "Ada", "Bruno", "Clara", "Dmitri", "Elena", "Felix", "Greta", "Hugo", "Iris", "Jonas",
    "Klara", "Leo",
];

const SURNAMES: [&str; 10] = [
    "Vance", "Okafor", "Lindqvist", "Moreau", "Takei", "Petrov", "Alvarez", "Nkemelu",
    "Sorensen", "Brandt",
];

const SKILL_NAMES: [&str; 5] = ["management", "charisma", "logistics", "finance", "hustle"];

/// Rolls mint-time attributes from an explicit RNG so minting is
/// reproducible under test and in replays.
#[derive(Debug)]
pub struct CharacterGenerator {
    rng: StdRng,
}

impl CharacterGenerator {
    /// Seeded generator; the same seed yields the same mint sequence.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from OS entropy, for normal operation.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn generate(
        &mut self,
        rarity: RarityTier,
        department_hint: Option<DepartmentId>,
    ) -> CharacterBlueprint {
        let first = FIRST_NAMES[self.rng.gen_range(0..FIRST_NAMES.len())];
        let last = SURNAMES[self.rng.gen_range(0..SURNAMES.len())];

        let (min_base, max_base) = rarity.base_earning_range();
        let base_earnings = self.rng.gen_range(min_base..=max_base);

        // One skill for commons, two for anything better.
        let skill_count = match rarity {
            RarityTier::Common => 1,
            RarityTier::Rare | RarityTier::Legendary => 2,
        };
        let max_skill = match rarity {
            RarityTier::Common => 5,
            RarityTier::Rare => 8,
            RarityTier::Legendary => 12,
        };
        let mut skills = HashMap::new();
        while skills.len() < skill_count {
            let name = SKILL_NAMES[self.rng.gen_range(0..SKILL_NAMES.len())];
            skills
                .entry(name.to_string())
                .or_insert_with(|| self.rng.gen_range(1..=max_skill));
        }

        CharacterBlueprint {
            name: format!("{} {}", first, last),
            rarity,
            base_earnings,
            happiness: self.rng.gen_range(60..=100),
            skills,
            department_hint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let mut first = CharacterGenerator::from_seed(42);
        let mut second = CharacterGenerator::from_seed(42);

        for rarity in [RarityTier::Common, RarityTier::Rare, RarityTier::Legendary] {
            let a = first.generate(rarity, None);
            let b = second.generate(rarity, None);
            assert_eq!(a.name, b.name);
            assert_eq!(a.base_earnings, b.base_earnings);
            assert_eq!(a.happiness, b.happiness);
            assert_eq!(a.skills, b.skills);
        }
    }

    #[test]
    fn test_base_earnings_stay_in_tier_range() {
        let mut generator = CharacterGenerator::from_seed(7);
        for _ in 0..100 {
            for rarity in [RarityTier::Common, RarityTier::Rare, RarityTier::Legendary] {
                let blueprint = generator.generate(rarity, None);
                let (min, max) = rarity.base_earning_range();
                assert!(blueprint.base_earnings >= min && blueprint.base_earnings <= max);
                assert!(blueprint.happiness >= 60 && blueprint.happiness <= 100);
                assert!(!blueprint.skills.is_empty());
            }
        }
    }
}
