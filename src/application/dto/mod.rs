//! Data transfer objects for the HTTP facade

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Character, Department, Quest};
use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::value_objects::{EconomicTransaction, RarityTier};

/// Parse a rarity string from a request.
///
/// Mints are paid operations, so an unrecognized tier is rejected rather
/// than defaulted.
pub fn parse_rarity(value: &str) -> EngineResult<RarityTier> {
    match value.to_lowercase().as_str() {
        "common" => Ok(RarityTier::Common),
        "rare" => Ok(RarityTier::Rare),
        "legendary" => Ok(RarityTier::Legendary),
        other => Err(EngineError::InvalidParameter(format!(
            "unknown rarity '{}'",
            other
        ))),
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct MintCharacterRequestDto {
    pub owner: String,
    pub rarity: String,
    pub department_hint: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssignJobRequestDto {
    pub character_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateHappinessRequestDto {
    pub happiness: i64,
}

#[derive(Debug, Deserialize)]
pub struct CollectEarningsRequestDto {
    pub owner: String,
    pub character_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct BurnCharacterRequestDto {
    pub owner: String,
}

#[derive(Debug, Deserialize)]
pub struct EmissionRequestDto {
    pub recipient: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetEmissionRateRequestDto {
    pub rate: u64,
}

#[derive(Debug, Deserialize)]
pub struct SetMaxPerWalletRequestDto {
    pub value: usize,
}

#[derive(Debug, Deserialize)]
pub struct GrantRequestDto {
    pub to: String,
    pub amount: u64,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CharacterResponseDto {
    pub id: String,
    pub owner: String,
    pub name: String,
    pub rarity: String,
    pub level: u32,
    pub experience: u64,
    pub happiness: u8,
    pub is_working: bool,
    pub department: Option<String>,
    pub daily_earnings: u64,
    pub total_earned: u64,
}

impl From<Character> for CharacterResponseDto {
    fn from(character: Character) -> Self {
        Self {
            id: character.id.to_string(),
            owner: character.owner.to_string(),
            name: character.name,
            rarity: character.rarity.to_string(),
            level: character.level,
            experience: character.experience,
            happiness: character.happiness,
            is_working: character.is_working,
            department: character.department.map(|id| id.to_string()),
            daily_earnings: character.daily_earnings,
            total_earned: character.total_earned,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DepartmentResponseDto {
    pub id: String,
    pub name: String,
    pub floor: u32,
    pub capacity: usize,
    pub occupants: Vec<String>,
    pub efficiency_multiplier: f64,
}

impl From<Department> for DepartmentResponseDto {
    fn from(department: Department) -> Self {
        Self {
            id: department.id.to_string(),
            name: department.name,
            floor: department.floor,
            capacity: department.capacity,
            occupants: department
                .occupants
                .iter()
                .map(|id| id.to_string())
                .collect(),
            efficiency_multiplier: department.efficiency_multiplier,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuestRequirementDto {
    pub category: String,
    pub target: u64,
    pub current: u64,
}

#[derive(Debug, Serialize)]
pub struct QuestResponseDto {
    pub id: String,
    pub owner: String,
    pub title: String,
    pub description: String,
    pub requirements: Vec<QuestRequirementDto>,
    pub reward_coins: u64,
    pub completion: f64,
    pub is_completed: bool,
    pub is_active: bool,
}

impl From<Quest> for QuestResponseDto {
    fn from(quest: Quest) -> Self {
        Self {
            id: quest.id.to_string(),
            owner: quest.owner.to_string(),
            title: quest.title,
            description: quest.description,
            requirements: quest
                .requirements
                .into_iter()
                .map(|r| QuestRequirementDto {
                    category: format!("{:?}", r.category),
                    target: r.target,
                    current: r.current,
                })
                .collect(),
            reward_coins: quest.reward_coins,
            completion: quest.completion,
            is_completed: quest.is_completed,
            is_active: quest.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionResponseDto {
    pub seq: u64,
    pub kind: String,
    pub amount: u64,
    pub timestamp: String,
    pub description: String,
    pub actor: String,
}

impl From<EconomicTransaction> for TransactionResponseDto {
    fn from(transaction: EconomicTransaction) -> Self {
        Self {
            seq: transaction.seq,
            kind: transaction.kind.to_string(),
            amount: transaction.amount,
            timestamp: transaction.timestamp.to_rfc3339(),
            description: transaction.description,
            actor: transaction.actor.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SupplyResponseDto {
    pub total_minted: u64,
    pub max_supply: u64,
    pub daily_emission_rate: u64,
}

#[derive(Debug, Serialize)]
pub struct CollectEarningsResponseDto {
    pub total_collected: u64,
}

#[derive(Debug, Serialize)]
pub struct EmissionResponseDto {
    pub amount: u64,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponseDto {
    pub owner: String,
    pub balance: u64,
}
