//! Engine events - Notifications of significant state changes
//!
//! Every successful orchestrator operation emits one or more of these.
//! External collaborators (notifiers, persistence triggers, analytics)
//! subscribe to the stream; the engine itself never calls presentation
//! code directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CharacterId, DepartmentId, OwnerId, QuestId, RarityTier};

/// Base data carried by all events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// Optional correlation ID for tracing
    pub correlation_id: Option<String>,
}

impl EventMetadata {
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            correlation_id: None,
        }
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}

/// All engine events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A new character was minted
    CharacterMinted {
        metadata: EventMetadata,
        character_id: CharacterId,
        owner: OwnerId,
        rarity: RarityTier,
        cost: u64,
    },

    /// A character advanced one or more levels
    CharacterLevelUp {
        metadata: EventMetadata,
        character_id: CharacterId,
        new_level: u32,
        levels_gained: u32,
    },

    /// A character was burned and its slot vacated
    CharacterBurned {
        metadata: EventMetadata,
        character_id: CharacterId,
        owner: OwnerId,
    },

    /// A character took a job in a department
    JobAssigned {
        metadata: EventMetadata,
        character_id: CharacterId,
        department_id: DepartmentId,
        daily_earnings: u64,
    },

    /// A character left its department
    JobReleased {
        metadata: EventMetadata,
        character_id: CharacterId,
        department_id: DepartmentId,
    },

    /// Accumulated earnings were credited to an owner
    EarningsCollected {
        metadata: EventMetadata,
        owner: OwnerId,
        total_collected: u64,
        characters: Vec<CharacterId>,
    },

    /// The scheduled emission minted new supply
    DailyEmission {
        metadata: EventMetadata,
        recipient: OwnerId,
        amount: u64,
    },

    /// A quest completed and its reward was processed
    QuestCompleted {
        metadata: EventMetadata,
        quest_id: QuestId,
        owner: OwnerId,
        reward_coins: u64,
        /// False when the supply cap forfeited the reward.
        reward_granted: bool,
    },

    /// An administrative parameter changed
    ParameterChanged {
        metadata: EventMetadata,
        parameter: String,
        value: u64,
    },
}

impl EngineEvent {
    /// Get the metadata for this event
    pub fn metadata(&self) -> &EventMetadata {
        match self {
            EngineEvent::CharacterMinted { metadata, .. } => metadata,
            EngineEvent::CharacterLevelUp { metadata, .. } => metadata,
            EngineEvent::CharacterBurned { metadata, .. } => metadata,
            EngineEvent::JobAssigned { metadata, .. } => metadata,
            EngineEvent::JobReleased { metadata, .. } => metadata,
            EngineEvent::EarningsCollected { metadata, .. } => metadata,
            EngineEvent::DailyEmission { metadata, .. } => metadata,
            EngineEvent::QuestCompleted { metadata, .. } => metadata,
            EngineEvent::ParameterChanged { metadata, .. } => metadata,
        }
    }

    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            EngineEvent::CharacterMinted { .. } => "CharacterMinted",
            EngineEvent::CharacterLevelUp { .. } => "CharacterLevelUp",
            EngineEvent::CharacterBurned { .. } => "CharacterBurned",
            EngineEvent::JobAssigned { .. } => "JobAssigned",
            EngineEvent::JobReleased { .. } => "JobReleased",
            EngineEvent::EarningsCollected { .. } => "EarningsCollected",
            EngineEvent::DailyEmission { .. } => "DailyEmission",
            EngineEvent::QuestCompleted { .. } => "QuestCompleted",
            EngineEvent::ParameterChanged { .. } => "ParameterChanged",
        }
    }
}
