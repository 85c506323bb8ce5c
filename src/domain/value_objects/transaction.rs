//! Economic transactions - the immutable audit log of token movements

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::OwnerId;

/// What a transaction represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Tokens spent to mint a character.
    MintCost,
    /// Daily earnings credited to a character owner.
    EarningsCredit,
    /// Scheduled supply emission.
    Emission,
    /// One-time quest completion reward.
    QuestReward,
    /// Capability-gated operational grant.
    AdminGrant,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::MintCost => write!(f, "mint_cost"),
            TransactionKind::EarningsCredit => write!(f, "earnings_credit"),
            TransactionKind::Emission => write!(f, "emission"),
            TransactionKind::QuestReward => write!(f, "quest_reward"),
            TransactionKind::AdminGrant => write!(f, "admin_grant"),
        }
    }
}

/// The only currency the supply ledger tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    Coin,
}

/// An append-only record of a single token movement.
///
/// Never mutated after creation; `seq` increases monotonically within one
/// engine instance so consumers can order and de-duplicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicTransaction {
    pub seq: u64,
    pub kind: TransactionKind,
    pub amount: u64,
    pub currency: Currency,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    /// The wallet whose balance moved.
    pub actor: OwnerId,
}

impl EconomicTransaction {
    pub fn new(
        seq: u64,
        kind: TransactionKind,
        amount: u64,
        timestamp: DateTime<Utc>,
        description: impl Into<String>,
        actor: OwnerId,
    ) -> Self {
        Self {
            seq,
            kind,
            amount,
            currency: Currency::Coin,
            timestamp,
            description: description.into(),
            actor,
        }
    }
}
