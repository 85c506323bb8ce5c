//! Earnings calculator - pure daily-earnings computation
//!
//! This is the single normative earnings formula. Any other "efficiency"
//! figure shown to players is cosmetic and must not feed back into payouts.

use crate::domain::entities::{Character, Department};

/// Flat earnings bonus per level above 1.
pub const LEVEL_BONUS_PER_LEVEL: u64 = 5;
/// Flat earnings bonus per point of the character's best skill.
pub const SKILL_BONUS_PER_POINT: u64 = 2;

/// Compute a character's daily earnings in their department.
///
/// `floor((base + level_bonus + skill_bonus) * (happiness / 100)
///        * department_efficiency * global_efficiency)`,
/// clamped so the result never drops below the rarity tier's floor.
///
/// Deterministic: identical inputs always produce the identical amount.
pub fn compute_daily_earnings(
    character: &Character,
    department: &Department,
    global_efficiency: f64,
) -> u64 {
    let level_bonus = u64::from(character.level.saturating_sub(1)) * LEVEL_BONUS_PER_LEVEL;
    let skill_bonus = u64::from(character.best_skill()) * SKILL_BONUS_PER_POINT;
    let base = character.base_earnings + level_bonus + skill_bonus;

    let happiness_factor = f64::from(character.happiness) / 100.0;
    let amount =
        (base as f64 * happiness_factor * department.efficiency_multiplier * global_efficiency)
            .floor() as u64;

    amount.max(character.rarity.earnings_floor())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CharacterBlueprint;
    use crate::domain::value_objects::{OwnerId, RarityTier};
    use chrono::Utc;
    use std::collections::HashMap;

    fn earner(base: u64, level: u32, happiness: u8, skills: &[(&str, u32)]) -> Character {
        let blueprint = CharacterBlueprint {
            name: "Earner".to_string(),
            rarity: RarityTier::Common,
            base_earnings: base,
            happiness,
            skills: skills
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
            department_hint: None,
        };
        let mut character = Character::from_blueprint(OwnerId::new(), blueprint, Utc::now());
        character.level = level;
        character
    }

    #[test]
    fn test_exact_formula_value() {
        // (40 base + 2*5 level bonus + 3*2 skill bonus) = 56;
        // 56 * 0.8 happiness * 1.2 dept * 1.0 global = 53.76 -> 53.
        let character = earner(40, 3, 80, &[("management", 3)]);
        let department = Department::new("Sales", 2, 5).with_efficiency(1.2);
        assert_eq!(compute_daily_earnings(&character, &department, 1.0), 53);
    }

    #[test]
    fn test_determinism() {
        let character = earner(33, 7, 64, &[("charisma", 9)]);
        let department = Department::new("Lobby", 1, 4).with_efficiency(1.35);
        let first = compute_daily_earnings(&character, &department, 1.1);
        for _ in 0..10 {
            assert_eq!(compute_daily_earnings(&character, &department, 1.1), first);
        }
    }

    #[test]
    fn test_floor_at_tier_minimum() {
        // Zero happiness would compute to 0; the common tier floor holds it
        // at 15 instead.
        let character = earner(20, 1, 0, &[]);
        let department = Department::new("Basement", 0, 2).with_efficiency(1.0);
        assert_eq!(
            compute_daily_earnings(&character, &department, 1.0),
            RarityTier::Common.earnings_floor()
        );
    }

    #[test]
    fn test_full_happiness_keeps_base() {
        // happiness 100, multipliers 1.0: the amount is exactly the base sum.
        let character = earner(25, 1, 100, &[]);
        let department = Department::new("Mailroom", 1, 5).with_efficiency(1.0);
        assert_eq!(compute_daily_earnings(&character, &department, 1.0), 25);
    }
}
