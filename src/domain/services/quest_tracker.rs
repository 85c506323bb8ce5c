//! Quest tracker - derives quest progress from ledger state
//!
//! A stateless recomputation pass: requirement counts are always re-derived
//! from the character table and the transaction log, so quest records can
//! never drift from the state they describe.

use std::collections::HashMap;

use crate::domain::entities::{Character, Quest, RequirementCategory};
use crate::domain::value_objects::{
    CharacterId, EconomicTransaction, OwnerId, QuestId, TransactionKind,
};

/// A quest that completed during a recomputation pass, with its pending
/// reward. The caller is responsible for actually granting the reward.
#[derive(Debug, Clone)]
pub struct CompletedQuest {
    pub quest_id: QuestId,
    pub owner: OwnerId,
    pub title: String,
    pub reward_coins: u64,
}

/// Derive the current count for one requirement category and owner.
pub fn derive_count(
    category: RequirementCategory,
    owner: &OwnerId,
    characters: &HashMap<CharacterId, Character>,
    transactions: &[EconomicTransaction],
) -> u64 {
    match category {
        RequirementCategory::CharactersOwned => characters
            .values()
            .filter(|c| c.owner == *owner)
            .count() as u64,
        RequirementCategory::CharactersWorking => characters
            .values()
            .filter(|c| c.owner == *owner && c.is_working)
            .count() as u64,
        RequirementCategory::CoinsEarned => transactions
            .iter()
            .filter(|t| t.actor == *owner && t.kind == TransactionKind::EarningsCredit)
            .map(|t| t.amount)
            .sum(),
        RequirementCategory::HighestLevel => characters
            .values()
            .filter(|c| c.owner == *owner)
            .map(|c| u64::from(c.level))
            .max()
            .unwrap_or(0),
    }
}

/// Recompute every active quest for `owner` and report newly completed ones.
///
/// Already-completed quests are skipped entirely, so re-running this after a
/// completion never yields the quest again.
pub fn recompute_for_owner(
    quests: &mut [Quest],
    owner: &OwnerId,
    characters: &HashMap<CharacterId, Character>,
    transactions: &[EconomicTransaction],
) -> Vec<CompletedQuest> {
    let mut completed = Vec::new();
    for quest in quests.iter_mut().filter(|q| q.owner == *owner) {
        let transitioned = quest.update_progress(|category| {
            derive_count(category, owner, characters, transactions)
        });
        if transitioned {
            completed.push(CompletedQuest {
                quest_id: quest.id,
                owner: quest.owner,
                title: quest.title.clone(),
                reward_coins: quest.reward_coins,
            });
        }
    }
    completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CharacterBlueprint, QuestRequirement};
    use chrono::Utc;

    fn owned_character(owner: OwnerId, level: u32, is_working: bool) -> Character {
        let blueprint = CharacterBlueprint {
            name: "Quester".to_string(),
            rarity: Default::default(),
            base_earnings: 20,
            happiness: 100,
            skills: HashMap::new(),
            department_hint: None,
        };
        let mut character = Character::from_blueprint(owner, blueprint, Utc::now());
        character.level = level;
        character.is_working = is_working;
        character
    }

    fn ledger(characters: Vec<Character>) -> HashMap<CharacterId, Character> {
        characters.into_iter().map(|c| (c.id, c)).collect()
    }

    #[test]
    fn test_derive_counts_filter_by_owner() {
        let owner = OwnerId::new();
        let stranger = OwnerId::new();
        let characters = ledger(vec![
            owned_character(owner, 4, true),
            owned_character(owner, 2, false),
            owned_character(stranger, 9, true),
        ]);

        assert_eq!(
            derive_count(RequirementCategory::CharactersOwned, &owner, &characters, &[]),
            2
        );
        assert_eq!(
            derive_count(RequirementCategory::CharactersWorking, &owner, &characters, &[]),
            1
        );
        assert_eq!(
            derive_count(RequirementCategory::HighestLevel, &owner, &characters, &[]),
            4
        );
    }

    #[test]
    fn test_coins_earned_counts_only_earnings_credits() {
        let owner = OwnerId::new();
        let transactions = vec![
            EconomicTransaction::new(
                0,
                TransactionKind::EarningsCredit,
                120,
                Utc::now(),
                "payout",
                owner,
            ),
            EconomicTransaction::new(
                1,
                TransactionKind::AdminGrant,
                5_000,
                Utc::now(),
                "faucet",
                owner,
            ),
            EconomicTransaction::new(
                2,
                TransactionKind::EarningsCredit,
                80,
                Utc::now(),
                "payout",
                OwnerId::new(),
            ),
        ];

        assert_eq!(
            derive_count(
                RequirementCategory::CoinsEarned,
                &owner,
                &HashMap::new(),
                &transactions
            ),
            120
        );
    }

    #[test]
    fn test_recompute_reports_completion_once() {
        let owner = OwnerId::new();
        let characters = ledger(vec![owned_character(owner, 1, false)]);
        let mut quests = vec![Quest::new(
            owner,
            "Solo",
            "",
            vec![QuestRequirement::new(RequirementCategory::CharactersOwned, 1)],
            25,
        )];

        let completed = recompute_for_owner(&mut quests, &owner, &characters, &[]);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].reward_coins, 25);

        // The second pass finds the quest already completed.
        let completed = recompute_for_owner(&mut quests, &owner, &characters, &[]);
        assert!(completed.is_empty());
        assert!(quests[0].is_completed);
        assert!(!quests[0].is_active);
    }
}
