//! Game Aggregate - The root aggregate for the whole simulation
//!
//! Holds the character ledger, department allocator, token supply and quest
//! table, and applies every public operation as a single transition:
//! validate fully against current state, then mutate, then report events.
//! No operation ever leaves a partially-applied mutation visible.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    quest_catalog, Character, CharacterBlueprint, Department, Quest, TokenSupply,
};
use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::events::{EngineEvent, EventMetadata};
use crate::domain::services::{compute_daily_earnings, recompute_for_owner};
use crate::domain::value_objects::{
    Capability, CapabilityToken, CharacterId, DepartmentId, EconomicTransaction, OwnerId,
    TransactionKind,
};

/// A request against the aggregate. Each variant maps to one public
/// operation of the simulation engine.
#[derive(Debug, Clone)]
pub enum Command {
    MintCharacter {
        owner: OwnerId,
        blueprint: CharacterBlueprint,
    },
    AssignJob {
        character_id: CharacterId,
        department_id: DepartmentId,
    },
    ReleaseJob {
        character_id: CharacterId,
    },
    LevelUp {
        character_id: CharacterId,
    },
    UpdateHappiness {
        character_id: CharacterId,
        value: i64,
    },
    CollectEarnings {
        owner: OwnerId,
        character_ids: Vec<CharacterId>,
    },
    DailyEmission {
        recipient: OwnerId,
    },
    BurnCharacter {
        owner: OwnerId,
        character_id: CharacterId,
    },
    AdminGrant {
        token: CapabilityToken,
        to: OwnerId,
        amount: u64,
    },
    SetEmissionRate {
        token: CapabilityToken,
        rate: u64,
    },
    SetMaxPerWallet {
        token: CapabilityToken,
        value: usize,
    },
}

/// The aggregate root for one simulation instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameAggregate {
    characters: HashMap<CharacterId, Character>,
    departments: HashMap<DepartmentId, Department>,
    supply: TokenSupply,
    quests: Vec<Quest>,
    transactions: Vec<EconomicTransaction>,
    next_seq: u64,
    /// Owners with an instantiated quest catalog.
    onboarded_owners: Vec<OwnerId>,
    max_per_wallet: usize,
    global_efficiency: f64,
    collect_period_hours: i64,
}

impl GameAggregate {
    pub fn new(
        supply: TokenSupply,
        max_per_wallet: usize,
        global_efficiency: f64,
        collect_period_hours: i64,
    ) -> Self {
        Self {
            characters: HashMap::new(),
            departments: HashMap::new(),
            supply,
            quests: Vec::new(),
            transactions: Vec::new(),
            next_seq: 0,
            onboarded_owners: Vec::new(),
            max_per_wallet,
            global_efficiency,
            collect_period_hours,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    pub fn character(&self, id: &CharacterId) -> Option<&Character> {
        self.characters.get(id)
    }

    pub fn departments(&self) -> impl Iterator<Item = &Department> {
        self.departments.values()
    }

    pub fn department(&self, id: &DepartmentId) -> Option<&Department> {
        self.departments.get(id)
    }

    pub fn supply(&self) -> &TokenSupply {
        &self.supply
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    pub fn quests_for(&self, owner: &OwnerId) -> Vec<&Quest> {
        self.quests.iter().filter(|q| q.owner == *owner).collect()
    }

    pub fn transactions(&self) -> &[EconomicTransaction] {
        &self.transactions
    }

    pub fn max_per_wallet(&self) -> usize {
        self.max_per_wallet
    }

    pub fn global_efficiency(&self) -> f64 {
        self.global_efficiency
    }

    fn owned_count(&self, owner: &OwnerId) -> usize {
        self.characters.values().filter(|c| c.owner == *owner).count()
    }

    // ========================================================================
    // Setup
    // ========================================================================

    /// Register a department; used when seeding the building layout.
    pub fn add_department(&mut self, department: Department) {
        self.departments.insert(department.id, department);
    }

    // ========================================================================
    // Command execution
    // ========================================================================

    /// Apply one command at time `now`.
    ///
    /// On error the aggregate is unchanged; on success the returned events
    /// describe everything that happened, including any quest completions
    /// the operation triggered.
    pub fn execute(&mut self, command: Command, now: DateTime<Utc>) -> EngineResult<Vec<EngineEvent>> {
        match command {
            Command::MintCharacter { owner, blueprint } => self.mint_character(owner, blueprint, now),
            Command::AssignJob {
                character_id,
                department_id,
            } => self.assign_job(character_id, department_id, now),
            Command::ReleaseJob { character_id } => self.release_job(character_id, now),
            Command::LevelUp { character_id } => self.level_up(character_id, now),
            Command::UpdateHappiness {
                character_id,
                value,
            } => self.update_happiness(character_id, value),
            Command::CollectEarnings {
                owner,
                character_ids,
            } => self.collect_earnings(owner, character_ids, now),
            Command::DailyEmission { recipient } => self.daily_emission(recipient, now),
            Command::BurnCharacter {
                owner,
                character_id,
            } => self.burn_character(owner, character_id, now),
            Command::AdminGrant { token, to, amount } => self.admin_grant(token, to, amount, now),
            Command::SetEmissionRate { token, rate } => self.set_emission_rate(token, rate, now),
            Command::SetMaxPerWallet { token, value } => self.set_max_per_wallet(token, value, now),
        }
    }

    // ========================================================================
    // Operations
    // ========================================================================

    fn mint_character(
        &mut self,
        owner: OwnerId,
        blueprint: CharacterBlueprint,
        now: DateTime<Utc>,
    ) -> EngineResult<Vec<EngineEvent>> {
        if self.owned_count(&owner) >= self.max_per_wallet {
            return Err(EngineError::InvalidParameter(format!(
                "wallet already holds the maximum of {} characters",
                self.max_per_wallet
            )));
        }

        let cost = blueprint.rarity.mint_cost();
        // The spend is the only fallible step; everything after it is
        // infallible, so the operation commits whole or not at all.
        self.supply.spend(owner, cost)?;

        let character = Character::from_blueprint(owner, blueprint, now);
        let character_id = character.id;
        let rarity = character.rarity;
        self.characters.insert(character_id, character);

        self.record_transaction(TransactionKind::MintCost, cost, now, "character mint", owner);
        self.ensure_quests_for(owner);

        let mut events = vec![EngineEvent::CharacterMinted {
            metadata: EventMetadata::at(now),
            character_id,
            owner,
            rarity,
            cost,
        }];
        events.extend(self.recompute_quests(&owner, now));
        Ok(events)
    }

    fn assign_job(
        &mut self,
        character_id: CharacterId,
        department_id: DepartmentId,
        now: DateTime<Utc>,
    ) -> EngineResult<Vec<EngineEvent>> {
        let character = self
            .characters
            .get(&character_id)
            .ok_or_else(|| EngineError::NotFound(format!("character {}", character_id)))?;
        let department = self
            .departments
            .get(&department_id)
            .ok_or_else(|| EngineError::NotFound(format!("department {}", department_id)))?;

        // All three gates are checked before any mutation.
        if department.is_full() {
            return Err(EngineError::AtCapacity);
        }
        department.requirements.check(character)?;
        if character.is_working {
            return Err(EngineError::AlreadyWorking);
        }

        let daily_earnings =
            compute_daily_earnings(character, department, self.global_efficiency);

        let department = self
            .departments
            .get_mut(&department_id)
            .ok_or_else(|| EngineError::NotFound(format!("department {}", department_id)))?;
        department.add_occupant(character_id)?;
        let character = self
            .characters
            .get_mut(&character_id)
            .ok_or_else(|| EngineError::NotFound(format!("character {}", character_id)))?;
        character.is_working = true;
        character.department = Some(department_id);
        character.daily_earnings = daily_earnings;
        let owner = character.owner;

        let mut events = vec![EngineEvent::JobAssigned {
            metadata: EventMetadata::at(now),
            character_id,
            department_id,
            daily_earnings,
        }];
        events.extend(self.recompute_quests(&owner, now));
        Ok(events)
    }

    fn release_job(
        &mut self,
        character_id: CharacterId,
        now: DateTime<Utc>,
    ) -> EngineResult<Vec<EngineEvent>> {
        let character = self
            .characters
            .get(&character_id)
            .ok_or_else(|| EngineError::NotFound(format!("character {}", character_id)))?;
        let department_id = match character.department {
            Some(id) if character.is_working => id,
            _ => {
                return Err(EngineError::NotEligible(
                    "character is not currently working".to_string(),
                ))
            }
        };

        if let Some(department) = self.departments.get_mut(&department_id) {
            department.remove_occupant(&character_id);
        }
        let character = self
            .characters
            .get_mut(&character_id)
            .ok_or_else(|| EngineError::NotFound(format!("character {}", character_id)))?;
        character.is_working = false;
        character.department = None;
        character.daily_earnings = 0;

        Ok(vec![EngineEvent::JobReleased {
            metadata: EventMetadata::at(now),
            character_id,
            department_id,
        }])
    }

    fn level_up(
        &mut self,
        character_id: CharacterId,
        now: DateTime<Utc>,
    ) -> EngineResult<Vec<EngineEvent>> {
        let character = self
            .characters
            .get_mut(&character_id)
            .ok_or_else(|| EngineError::NotFound(format!("character {}", character_id)))?;

        let levels_gained = character.level_up()?;
        let new_level = character.level;
        let owner = character.owner;
        self.refresh_daily_earnings(&character_id);

        let mut events = vec![EngineEvent::CharacterLevelUp {
            metadata: EventMetadata::at(now),
            character_id,
            new_level,
            levels_gained,
        }];
        events.extend(self.recompute_quests(&owner, now));
        Ok(events)
    }

    fn update_happiness(
        &mut self,
        character_id: CharacterId,
        value: i64,
    ) -> EngineResult<Vec<EngineEvent>> {
        let character = self
            .characters
            .get_mut(&character_id)
            .ok_or_else(|| EngineError::NotFound(format!("character {}", character_id)))?;
        character.set_happiness(value);
        self.refresh_daily_earnings(&character_id);
        Ok(Vec::new())
    }

    fn collect_earnings(
        &mut self,
        owner: OwnerId,
        character_ids: Vec<CharacterId>,
        now: DateTime<Utc>,
    ) -> EngineResult<Vec<EngineEvent>> {
        let period = chrono::Duration::hours(self.collect_period_hours);

        // Validation pass: every id must resolve and belong to the caller.
        // Duplicated ids in the request count once.
        let mut seen = HashSet::new();
        let mut collectable = Vec::new();
        let mut total = 0u64;
        for id in &character_ids {
            if !seen.insert(*id) {
                continue;
            }
            let character = self
                .characters
                .get(id)
                .ok_or_else(|| EngineError::NotFound(format!("character {}", id)))?;
            if character.owner != owner {
                return Err(EngineError::Unauthorized(
                    "owner does not hold this character".to_string(),
                ));
            }
            if character.is_working && !character.collected_within(now, period) {
                collectable.push(*id);
                total += character.daily_earnings;
            }
        }

        if total > 0 {
            // Earnings are newly minted supply; the cap check rejects the
            // whole collection rather than paying part of it.
            self.supply.mint(owner, total)?;
        }

        for id in &collectable {
            if let Some(character) = self.characters.get_mut(id) {
                character.total_earned += character.daily_earnings;
                // Collection is also how characters accrue experience.
                let earned = character.daily_earnings;
                character.gain_experience(earned);
                character.last_collected_at = Some(now);
            }
        }

        if total > 0 {
            self.record_transaction(
                TransactionKind::EarningsCredit,
                total,
                now,
                "earnings collection",
                owner,
            );
        }

        let mut events = vec![EngineEvent::EarningsCollected {
            metadata: EventMetadata::at(now),
            owner,
            total_collected: total,
            characters: collectable,
        }];
        events.extend(self.recompute_quests(&owner, now));
        Ok(events)
    }

    fn daily_emission(
        &mut self,
        recipient: OwnerId,
        now: DateTime<Utc>,
    ) -> EngineResult<Vec<EngineEvent>> {
        let amount = self.supply.perform_daily_emission(recipient, now)?;
        self.record_transaction(TransactionKind::Emission, amount, now, "daily emission", recipient);
        Ok(vec![EngineEvent::DailyEmission {
            metadata: EventMetadata::at(now),
            recipient,
            amount,
        }])
    }

    fn burn_character(
        &mut self,
        owner: OwnerId,
        character_id: CharacterId,
        now: DateTime<Utc>,
    ) -> EngineResult<Vec<EngineEvent>> {
        let character = self
            .characters
            .get(&character_id)
            .ok_or_else(|| EngineError::NotFound(format!("character {}", character_id)))?;
        if character.owner != owner {
            return Err(EngineError::Unauthorized(
                "owner does not hold this character".to_string(),
            ));
        }

        // Vacate the department slot before removal.
        if let Some(department_id) = character.department {
            if let Some(department) = self.departments.get_mut(&department_id) {
                department.remove_occupant(&character_id);
            }
        }
        self.characters.remove(&character_id);

        Ok(vec![EngineEvent::CharacterBurned {
            metadata: EventMetadata::at(now),
            character_id,
            owner,
        }])
    }

    fn admin_grant(
        &mut self,
        token: CapabilityToken,
        to: OwnerId,
        amount: u64,
        now: DateTime<Utc>,
    ) -> EngineResult<Vec<EngineEvent>> {
        if !token.allows(Capability::Minter) {
            return Err(EngineError::Unauthorized("minter".to_string()));
        }
        if amount == 0 {
            return Err(EngineError::InvalidParameter(
                "grant amount must be positive".to_string(),
            ));
        }
        self.supply.mint(to, amount)?;
        self.record_transaction(TransactionKind::AdminGrant, amount, now, "operator grant", to);
        Ok(Vec::new())
    }

    fn set_emission_rate(
        &mut self,
        token: CapabilityToken,
        rate: u64,
        now: DateTime<Utc>,
    ) -> EngineResult<Vec<EngineEvent>> {
        if !token.allows(Capability::Admin) {
            return Err(EngineError::Unauthorized("admin".to_string()));
        }
        self.supply.set_emission_rate(rate)?;
        Ok(vec![EngineEvent::ParameterChanged {
            metadata: EventMetadata::at(now),
            parameter: "daily_emission_rate".to_string(),
            value: rate,
        }])
    }

    fn set_max_per_wallet(
        &mut self,
        token: CapabilityToken,
        value: usize,
        now: DateTime<Utc>,
    ) -> EngineResult<Vec<EngineEvent>> {
        if !token.allows(Capability::Admin) {
            return Err(EngineError::Unauthorized("admin".to_string()));
        }
        if value == 0 {
            return Err(EngineError::InvalidParameter(
                "max characters per wallet must be positive".to_string(),
            ));
        }
        self.max_per_wallet = value;
        Ok(vec![EngineEvent::ParameterChanged {
            metadata: EventMetadata::at(now),
            parameter: "max_per_wallet".to_string(),
            value: value as u64,
        }])
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn record_transaction(
        &mut self,
        kind: TransactionKind,
        amount: u64,
        now: DateTime<Utc>,
        description: &str,
        actor: OwnerId,
    ) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.transactions.push(EconomicTransaction::new(
            seq,
            kind,
            amount,
            now,
            description,
            actor,
        ));
    }

    fn ensure_quests_for(&mut self, owner: OwnerId) {
        if !self.onboarded_owners.contains(&owner) {
            self.onboarded_owners.push(owner);
            self.quests.extend(quest_catalog(owner));
        }
    }

    /// Re-derive `daily_earnings` after a stat change.
    fn refresh_daily_earnings(&mut self, character_id: &CharacterId) {
        let Some(character) = self.characters.get(character_id) else {
            return;
        };
        let Some(department_id) = character.department else {
            return;
        };
        let Some(department) = self.departments.get(&department_id) else {
            return;
        };
        let amount = compute_daily_earnings(character, department, self.global_efficiency);
        if let Some(character) = self.characters.get_mut(character_id) {
            character.daily_earnings = amount;
        }
    }

    /// Recompute quest progress for one owner and grant pending rewards.
    ///
    /// Rewards go through the cap-checked supply path; when the cap would be
    /// exceeded the completion stands and the reward is forfeited.
    fn recompute_quests(&mut self, owner: &OwnerId, now: DateTime<Utc>) -> Vec<EngineEvent> {
        let completed =
            recompute_for_owner(&mut self.quests, owner, &self.characters, &self.transactions);

        let mut events = Vec::new();
        for quest in completed {
            let reward_granted = self.supply.mint(quest.owner, quest.reward_coins).is_ok();
            if reward_granted {
                self.record_transaction(
                    TransactionKind::QuestReward,
                    quest.reward_coins,
                    now,
                    "quest reward",
                    quest.owner,
                );
            }
            events.push(EngineEvent::QuestCompleted {
                metadata: EventMetadata::at(now),
                quest_id: quest.quest_id,
                owner: quest.owner,
                reward_coins: quest.reward_coins,
                reward_granted,
            });
        }
        events
    }

    // ========================================================================
    // Consistency audit
    // ========================================================================

    /// Verify the cross-ledger invariants; used by snapshot restore and tests.
    ///
    /// Checks occupancy bounds, occupant/character bidirectional consistency
    /// and the supply cap.
    pub fn check_invariants(&self) -> EngineResult<()> {
        for department in self.departments.values() {
            if department.occupants.len() > department.capacity {
                return Err(EngineError::InvalidParameter(format!(
                    "department {} over capacity",
                    department.id
                )));
            }
            for occupant in &department.occupants {
                let character = self.characters.get(occupant).ok_or_else(|| {
                    EngineError::InvalidParameter(format!(
                        "department {} lists unknown character {}",
                        department.id, occupant
                    ))
                })?;
                if !character.is_working || character.department != Some(department.id) {
                    return Err(EngineError::InvalidParameter(format!(
                        "character {} inconsistent with department {}",
                        occupant, department.id
                    )));
                }
            }
        }
        if self.supply.total_minted() > self.supply.max_supply() {
            return Err(EngineError::InvalidParameter(
                "total minted exceeds max supply".to_string(),
            ));
        }
        Ok(())
    }
}
