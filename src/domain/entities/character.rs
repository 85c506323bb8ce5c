//! Character entity - collectible workers with levels, happiness and earnings

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::value_objects::{CharacterId, DepartmentId, OwnerId, RarityTier};

/// Mint-time attributes rolled by the character generator.
///
/// Kept separate from [`Character`] so randomness stays outside the ledger:
/// the generator produces a blueprint, the aggregate turns it into a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterBlueprint {
    pub name: String,
    pub rarity: RarityTier,
    /// Base daily earnings, rolled within the tier's range.
    pub base_earnings: u64,
    pub happiness: u8,
    /// Named skill values, e.g. "management" or "charisma".
    pub skills: HashMap<String, u32>,
    /// Optional preferred workplace; purely advisory.
    pub department_hint: Option<DepartmentId>,
}

/// A character in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub owner: OwnerId,
    pub name: String,
    pub rarity: RarityTier,
    pub level: u32,
    pub experience: u64,
    /// Always clamped to 0..=100.
    pub happiness: u8,
    pub base_earnings: u64,
    pub skills: HashMap<String, u32>,
    pub is_working: bool,
    pub department: Option<DepartmentId>,
    pub department_hint: Option<DepartmentId>,
    /// Current per-period earnings, recomputed whenever an input changes.
    pub daily_earnings: u64,
    /// Lifetime earnings credited to the owner through this character.
    pub total_earned: u64,
    /// Marks the last accounting period in which earnings were collected.
    pub last_collected_at: Option<DateTime<Utc>>,
    pub minted_at: DateTime<Utc>,
}

impl Character {
    /// Experience required to advance *from* the given level.
    pub fn max_experience_for_level(level: u32) -> u64 {
        100 * level as u64
    }

    pub fn from_blueprint(owner: OwnerId, blueprint: CharacterBlueprint, now: DateTime<Utc>) -> Self {
        Self {
            id: CharacterId::new(),
            owner,
            name: blueprint.name,
            rarity: blueprint.rarity,
            level: 1,
            experience: 0,
            happiness: blueprint.happiness.min(100),
            base_earnings: blueprint.base_earnings,
            skills: blueprint.skills,
            is_working: false,
            department: None,
            department_hint: blueprint.department_hint,
            daily_earnings: 0,
            total_earned: 0,
            last_collected_at: None,
            minted_at: now,
        }
    }

    /// Add experience without leveling; leveling is an explicit operation.
    pub fn gain_experience(&mut self, amount: u64) {
        self.experience = self.experience.saturating_add(amount);
    }

    /// Consume accumulated experience and advance one or more levels.
    ///
    /// The threshold for the current level is consumed exactly; any remainder
    /// carries forward, and if the remainder still covers the next threshold
    /// the level-up cascades. After return, `experience` is strictly below
    /// the threshold for the new level.
    pub fn level_up(&mut self) -> EngineResult<u32> {
        let threshold = Self::max_experience_for_level(self.level);
        if self.experience < threshold {
            return Err(EngineError::NotEligible(format!(
                "need {} experience to leave level {}, have {}",
                threshold, self.level, self.experience
            )));
        }

        let mut levels_gained = 0;
        while self.experience >= Self::max_experience_for_level(self.level) {
            self.experience -= Self::max_experience_for_level(self.level);
            self.level += 1;
            levels_gained += 1;
        }
        Ok(levels_gained)
    }

    /// Clamp and apply a new happiness value.
    pub fn set_happiness(&mut self, value: i64) {
        self.happiness = value.clamp(0, 100) as u8;
    }

    pub fn skill(&self, name: &str) -> u32 {
        self.skills.get(name).copied().unwrap_or(0)
    }

    /// Highest named skill value, used by the earnings bonus.
    pub fn best_skill(&self) -> u32 {
        self.skills.values().copied().max().unwrap_or(0)
    }

    /// True if earnings were already collected inside the accounting period
    /// ending at `now`.
    pub fn collected_within(&self, now: DateTime<Utc>, period: chrono::Duration) -> bool {
        match self.last_collected_at {
            Some(at) => now.signed_duration_since(at) < period,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_character(level: u32, experience: u64) -> Character {
        let blueprint = CharacterBlueprint {
            name: "Moe".to_string(),
            rarity: RarityTier::Common,
            base_earnings: 20,
            happiness: 100,
            skills: HashMap::new(),
            department_hint: None,
        };
        let mut character = Character::from_blueprint(OwnerId::new(), blueprint, Utc::now());
        character.level = level;
        character.experience = experience;
        character
    }

    #[test]
    fn test_level_up_requires_threshold() {
        let mut character = test_character(1, 99);
        assert!(matches!(
            character.level_up(),
            Err(EngineError::NotEligible(_))
        ));
        assert_eq!(character.level, 1);
        assert_eq!(character.experience, 99);
    }

    #[test]
    fn test_level_up_carries_remainder_forward() {
        // Threshold to leave level 1 is 100; remainder 150 stays below the
        // level-2 threshold of 200, so exactly one level is gained.
        let mut character = test_character(1, 250);
        assert_eq!(character.level_up().unwrap(), 1);
        assert_eq!(character.level, 2);
        assert_eq!(character.experience, 150);
    }

    #[test]
    fn test_level_up_cascades_through_multiple_levels() {
        // 350 covers the level-1 threshold (100) and the level-2 threshold
        // (200), landing at level 3 with 50 left over.
        let mut character = test_character(1, 350);
        assert_eq!(character.level_up().unwrap(), 2);
        assert_eq!(character.level, 3);
        assert_eq!(character.experience, 50);
    }

    #[test]
    fn test_experience_invariant_after_level_up() {
        for experience in [100, 299, 300, 1_000, 5_432] {
            let mut character = test_character(1, experience);
            character.level_up().unwrap();
            assert!(
                character.experience < Character::max_experience_for_level(character.level),
                "experience {} stranded at level {}",
                character.experience,
                character.level
            );
        }
    }

    #[test]
    fn test_happiness_is_clamped() {
        let mut character = test_character(1, 0);
        character.set_happiness(150);
        assert_eq!(character.happiness, 100);
        character.set_happiness(-20);
        assert_eq!(character.happiness, 0);
        character.set_happiness(64);
        assert_eq!(character.happiness, 64);
    }

    #[test]
    fn test_collected_within_period() {
        let now = Utc::now();
        let period = chrono::Duration::hours(24);

        let mut character = test_character(1, 0);
        assert!(!character.collected_within(now, period));

        character.last_collected_at = Some(now - chrono::Duration::hours(2));
        assert!(character.collected_within(now, period));

        character.last_collected_at = Some(now - chrono::Duration::hours(25));
        assert!(!character.collected_within(now, period));
    }
}
