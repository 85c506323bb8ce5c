//! Quest entity - derived progress toward countable goals

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{OwnerId, QuestId};

/// What a requirement counts. Progress is always derived from the character
/// ledger or the transaction log, never stored independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequirementCategory {
    /// Characters currently owned by the quest's owner.
    CharactersOwned,
    /// Owned characters currently assigned to a department.
    CharactersWorking,
    /// Lifetime coins credited to the owner as earnings.
    CoinsEarned,
    /// Highest level reached by any owned character.
    HighestLevel,
}

/// A countable condition with a target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestRequirement {
    pub category: RequirementCategory,
    pub target: u64,
    /// Derived count, clamped to `target`.
    pub current: u64,
}

impl QuestRequirement {
    pub fn new(category: RequirementCategory, target: u64) -> Self {
        Self {
            category,
            target,
            current: 0,
        }
    }

    pub fn percentage(&self) -> f64 {
        if self.target == 0 {
            return 100.0;
        }
        (self.current.min(self.target) as f64 / self.target as f64) * 100.0
    }

    pub fn is_met(&self) -> bool {
        self.current >= self.target
    }
}

/// A quest instance for one owner.
///
/// Completion is a one-way transition: once `is_completed` flips true the
/// quest never becomes active again and its reward is never re-granted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub owner: OwnerId,
    pub title: String,
    pub description: String,
    pub requirements: Vec<QuestRequirement>,
    pub reward_coins: u64,
    /// Mean of requirement percentages, 0.0..=100.0.
    pub completion: f64,
    pub is_completed: bool,
    pub is_active: bool,
}

impl Quest {
    pub fn new(
        owner: OwnerId,
        title: impl Into<String>,
        description: impl Into<String>,
        requirements: Vec<QuestRequirement>,
        reward_coins: u64,
    ) -> Self {
        Self {
            id: QuestId::new(),
            owner,
            title: title.into(),
            description: description.into(),
            requirements,
            reward_coins,
            completion: 0.0,
            is_completed: false,
            is_active: true,
        }
    }

    /// Apply freshly derived counts and recompute the completion percentage.
    ///
    /// Returns `true` exactly once, on the recomputation that first satisfies
    /// every requirement; repeated recomputations after completion are no-ops.
    pub fn update_progress(&mut self, counts: impl Fn(RequirementCategory) -> u64) -> bool {
        if self.is_completed || !self.is_active {
            return false;
        }

        for requirement in &mut self.requirements {
            requirement.current = counts(requirement.category).min(requirement.target);
        }
        self.completion = if self.requirements.is_empty() {
            100.0
        } else {
            self.requirements.iter().map(|r| r.percentage()).sum::<f64>()
                / self.requirements.len() as f64
        };

        if self.requirements.iter().all(|r| r.is_met()) {
            self.is_completed = true;
            self.is_active = false;
            true
        } else {
            false
        }
    }
}

/// The fixed catalog every owner starts with.
pub fn quest_catalog(owner: OwnerId) -> Vec<Quest> {
    vec![
        Quest::new(
            owner,
            "First Recruits",
            "Collect three characters",
            vec![QuestRequirement::new(RequirementCategory::CharactersOwned, 3)],
            100,
        ),
        Quest::new(
            owner,
            "Full Shift",
            "Have two characters working at once",
            vec![QuestRequirement::new(
                RequirementCategory::CharactersWorking,
                2,
            )],
            150,
        ),
        Quest::new(
            owner,
            "Payday",
            "Earn 500 coins from your characters",
            vec![QuestRequirement::new(RequirementCategory::CoinsEarned, 500)],
            250,
        ),
        Quest::new(
            owner,
            "Rising Star",
            "Level any character up to level 5",
            vec![QuestRequirement::new(RequirementCategory::HighestLevel, 5)],
            500,
        ),
    ]
}
