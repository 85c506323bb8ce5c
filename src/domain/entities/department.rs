//! Department entity - capacity-bounded workplaces characters occupy

use serde::{Deserialize, Serialize};

use crate::domain::entities::Character;
use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::value_objects::{CharacterId, DepartmentId, RarityTier};

/// Eligibility gates a character must pass before taking a job here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EligibilityRequirements {
    pub min_level: Option<u32>,
    /// Named skill and the minimum value it must hold.
    pub min_skill: Option<(String, u32)>,
    pub required_rarity: Option<RarityTier>,
}

impl EligibilityRequirements {
    /// Check a character against every requirement, reporting the first miss.
    pub fn check(&self, character: &Character) -> EngineResult<()> {
        if let Some(min_level) = self.min_level {
            if character.level < min_level {
                return Err(EngineError::RequirementsNotMet(format!(
                    "requires level {}, character is level {}",
                    min_level, character.level
                )));
            }
        }
        if let Some((ref skill, min_value)) = self.min_skill {
            if character.skill(skill) < min_value {
                return Err(EngineError::RequirementsNotMet(format!(
                    "requires {} {}, character has {}",
                    skill,
                    min_value,
                    character.skill(skill)
                )));
            }
        }
        if let Some(required) = self.required_rarity {
            if character.rarity < required {
                return Err(EngineError::RequirementsNotMet(format!(
                    "requires {} rarity or better, character is {}",
                    required, character.rarity
                )));
            }
        }
        Ok(())
    }
}

/// A workplace with bounded concurrent occupancy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub floor: u32,
    /// Maximum concurrent workers; `occupants.len()` never exceeds this.
    pub capacity: usize,
    /// Ordered ids of characters currently working here.
    pub occupants: Vec<CharacterId>,
    pub base_rate: u64,
    /// Multiplier applied to occupant earnings.
    pub efficiency_multiplier: f64,
    pub requirements: EligibilityRequirements,
}

impl Department {
    pub fn new(name: impl Into<String>, floor: u32, capacity: usize) -> Self {
        Self {
            id: DepartmentId::new(),
            name: name.into(),
            floor,
            capacity,
            occupants: Vec::new(),
            base_rate: 0,
            efficiency_multiplier: 1.0,
            requirements: EligibilityRequirements::default(),
        }
    }

    pub fn with_efficiency(mut self, multiplier: f64) -> Self {
        self.efficiency_multiplier = multiplier;
        self
    }

    pub fn with_base_rate(mut self, rate: u64) -> Self {
        self.base_rate = rate;
        self
    }

    pub fn with_requirements(mut self, requirements: EligibilityRequirements) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn is_full(&self) -> bool {
        self.occupants.len() >= self.capacity
    }

    /// Record a worker. Callers must have already verified capacity and
    /// eligibility; this only defends the capacity invariant itself.
    pub(crate) fn add_occupant(&mut self, id: CharacterId) -> EngineResult<()> {
        if self.is_full() {
            return Err(EngineError::AtCapacity);
        }
        if !self.occupants.contains(&id) {
            self.occupants.push(id);
        }
        Ok(())
    }

    pub(crate) fn remove_occupant(&mut self, id: &CharacterId) -> bool {
        if let Some(pos) = self.occupants.iter().position(|o| o == id) {
            self.occupants.remove(pos);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CharacterBlueprint;
    use crate::domain::value_objects::OwnerId;
    use chrono::Utc;
    use std::collections::HashMap;

    fn worker(level: u32, rarity: RarityTier, skills: &[(&str, u32)]) -> Character {
        let blueprint = CharacterBlueprint {
            name: "Worker".to_string(),
            rarity,
            base_earnings: 20,
            happiness: 100,
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
    fn test_capacity_check() {
        let mut department = Department::new("Mailroom", 1, 2);
        department.add_occupant(CharacterId::new()).unwrap();
        department.add_occupant(CharacterId::new()).unwrap();
        assert!(department.is_full());
        assert_eq!(
            department.add_occupant(CharacterId::new()),
            Err(EngineError::AtCapacity)
        );
        assert_eq!(department.occupants.len(), 2);
    }

    #[test]
    fn test_requirements_min_level() {
        let requirements = EligibilityRequirements {
            min_level: Some(3),
            ..Default::default()
        };
        assert!(requirements.check(&worker(2, RarityTier::Common, &[])).is_err());
        assert!(requirements.check(&worker(3, RarityTier::Common, &[])).is_ok());
    }

    #[test]
    fn test_requirements_min_skill() {
        let requirements = EligibilityRequirements {
            min_skill: Some(("management".to_string(), 5)),
            ..Default::default()
        };
        assert!(requirements
            .check(&worker(1, RarityTier::Common, &[("management", 4)]))
            .is_err());
        assert!(requirements
            .check(&worker(1, RarityTier::Common, &[("management", 5)]))
            .is_ok());
    }

    #[test]
    fn test_requirements_rarity_is_ordinal() {
        let requirements = EligibilityRequirements {
            required_rarity: Some(RarityTier::Rare),
            ..Default::default()
        };
        assert!(requirements.check(&worker(1, RarityTier::Common, &[])).is_err());
        assert!(requirements.check(&worker(1, RarityTier::Rare, &[])).is_ok());
        assert!(requirements
            .check(&worker(1, RarityTier::Legendary, &[]))
            .is_ok());
    }

    #[test]
    fn test_remove_occupant() {
        let mut department = Department::new("Mailroom", 1, 2);
        let id = CharacterId::new();
        department.add_occupant(id).unwrap();
        assert!(department.remove_occupant(&id));
        assert!(!department.remove_occupant(&id));
        assert!(department.occupants.is_empty());
    }
}
