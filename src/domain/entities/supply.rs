//! Token supply ledger - balances under a hard cap with rate-limited emission

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::value_objects::OwnerId;

/// Rolling window inside which at most one emission may succeed.
pub const EMISSION_WINDOW_HOURS: i64 = 24;

/// The token supply ledger.
///
/// Mirrors the invariants of an on-chain capped token: `total_minted` never
/// exceeds `max_supply`, and any operation that would cross the cap is
/// rejected whole, leaving every balance untouched. All checks and commits
/// happen inside single `&mut self` methods, so there is no window where a
/// cap check has passed but the commit has not happened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSupply {
    max_supply: u64,
    total_minted: u64,
    balances: HashMap<OwnerId, u64>,
    daily_emission_rate: u64,
    last_emission_at: Option<DateTime<Utc>>,
}

impl TokenSupply {
    pub fn new(max_supply: u64, daily_emission_rate: u64) -> Self {
        Self {
            max_supply,
            total_minted: 0,
            balances: HashMap::new(),
            daily_emission_rate,
            last_emission_at: None,
        }
    }

    pub fn max_supply(&self) -> u64 {
        self.max_supply
    }

    pub fn total_minted(&self) -> u64 {
        self.total_minted
    }

    pub fn daily_emission_rate(&self) -> u64 {
        self.daily_emission_rate
    }

    pub fn last_emission_at(&self) -> Option<DateTime<Utc>> {
        self.last_emission_at
    }

    pub fn balance_of(&self, owner: &OwnerId) -> u64 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    pub fn balances(&self) -> &HashMap<OwnerId, u64> {
        &self.balances
    }

    /// Credit `to` with newly minted supply, enforcing the hard cap.
    pub fn mint(&mut self, to: OwnerId, amount: u64) -> EngineResult<()> {
        let new_total = self
            .total_minted
            .checked_add(amount)
            .ok_or(EngineError::ExceedsMaxSupply { requested: amount })?;
        if new_total > self.max_supply {
            return Err(EngineError::ExceedsMaxSupply { requested: amount });
        }
        self.total_minted = new_total;
        *self.balances.entry(to).or_insert(0) += amount;
        Ok(())
    }

    /// Debit `from`; already-minted supply stays in circulation.
    pub fn spend(&mut self, from: OwnerId, amount: u64) -> EngineResult<()> {
        let available = self.balance_of(&from);
        if available < amount {
            return Err(EngineError::InsufficientBalance {
                available,
                required: amount,
            });
        }
        self.balances.insert(from, available - amount);
        Ok(())
    }

    /// Mint the scheduled emission to `recipient`.
    ///
    /// Succeeds at most once per rolling 24-hour window; `last_emission_at`
    /// advances only when the emission itself succeeded, so a cap rejection
    /// does not consume the window.
    pub fn perform_daily_emission(
        &mut self,
        recipient: OwnerId,
        now: DateTime<Utc>,
    ) -> EngineResult<u64> {
        if let Some(last) = self.last_emission_at {
            if now.signed_duration_since(last) < Duration::hours(EMISSION_WINDOW_HOURS) {
                return Err(EngineError::TooEarly);
            }
        }
        let amount = self.daily_emission_rate;
        self.mint(recipient, amount)?;
        self.last_emission_at = Some(now);
        Ok(amount)
    }

    pub fn set_emission_rate(&mut self, rate: u64) -> EngineResult<()> {
        if rate == 0 {
            return Err(EngineError::InvalidParameter(
                "emission rate must be positive".to_string(),
            ));
        }
        self.daily_emission_rate = rate;
        Ok(())
    }
}
