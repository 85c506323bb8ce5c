//! Simulation Service - Application service sequencing engine operations
//!
//! Wraps the game aggregate behind a single writer lock so concurrent
//! callers (multiple players, the emission scheduler) serialize on state
//! transitions, and broadcasts the events each transition emitted.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{debug, info, instrument};

use crate::domain::aggregates::{Command, GameAggregate};
use crate::domain::entities::{Character, Department, Quest};
use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::events::EngineEvent;
use crate::domain::services::CharacterGenerator;
use crate::domain::value_objects::{
    CapabilityToken, CharacterId, DepartmentId, EconomicTransaction, OwnerId, RarityTier,
};
use crate::infrastructure::persistence::GameSnapshot;

/// Capacity of the event broadcast channel; slow subscribers lag, the
/// engine never blocks on them.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Simulation service trait defining the engine's public operations
#[async_trait]
pub trait SimulationService: Send + Sync {
    /// Mint a new character for an owner, charging the rarity's mint cost
    async fn mint_character(
        &self,
        owner: OwnerId,
        rarity: RarityTier,
        department_hint: Option<DepartmentId>,
    ) -> EngineResult<Character>;

    /// Assign a character to a department job
    async fn assign_job(
        &self,
        character_id: CharacterId,
        department_id: DepartmentId,
    ) -> EngineResult<Character>;

    /// Release a working character from its department
    async fn release_job(&self, character_id: CharacterId) -> EngineResult<Character>;

    /// Consume accumulated experience and advance levels
    async fn level_up(&self, character_id: CharacterId) -> EngineResult<Character>;

    /// Set a character's happiness (clamped to 0..=100)
    async fn update_happiness(
        &self,
        character_id: CharacterId,
        value: i64,
    ) -> EngineResult<Character>;

    /// Collect pending earnings for the given characters; returns the total
    async fn collect_earnings(
        &self,
        owner: OwnerId,
        character_ids: Vec<CharacterId>,
    ) -> EngineResult<u64>;

    /// Attempt the scheduled daily emission; returns the amount minted
    async fn trigger_daily_emission(&self, recipient: OwnerId) -> EngineResult<u64>;

    /// Burn a character, vacating its department slot
    async fn burn_character(&self, owner: OwnerId, character_id: CharacterId) -> EngineResult<()>;

    /// Credit supply directly; requires the Minter capability
    async fn grant(&self, token: CapabilityToken, to: OwnerId, amount: u64) -> EngineResult<()>;

    /// Change the daily emission rate; requires the Admin capability
    async fn set_emission_rate(&self, token: CapabilityToken, rate: u64) -> EngineResult<()>;

    /// Change the per-wallet character limit; requires the Admin capability
    async fn set_max_per_wallet(&self, token: CapabilityToken, value: usize) -> EngineResult<()>;
}

/// Default implementation holding the aggregate behind a writer lock.
pub struct SimulationServiceImpl {
    aggregate: RwLock<GameAggregate>,
    generator: Mutex<CharacterGenerator>,
    events: broadcast::Sender<EngineEvent>,
}

impl SimulationServiceImpl {
    pub fn new(aggregate: GameAggregate, generator: CharacterGenerator) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            aggregate: RwLock::new(aggregate),
            generator: Mutex::new(generator),
            events,
        }
    }

    /// Subscribe to the engine's event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    /// Register a department; used when seeding the building layout at boot.
    pub async fn seed_department(&self, department: Department) {
        self.aggregate.write().await.add_department(department);
    }

    // ========================================================================
    // Read-only queries
    // ========================================================================

    pub async fn get_character(&self, id: CharacterId) -> Option<Character> {
        self.aggregate.read().await.character(&id).cloned()
    }

    pub async fn list_characters(&self, owner: Option<OwnerId>) -> Vec<Character> {
        let aggregate = self.aggregate.read().await;
        aggregate
            .characters()
            .filter(|c| owner.map_or(true, |o| c.owner == o))
            .cloned()
            .collect()
    }

    pub async fn list_departments(&self) -> Vec<Department> {
        self.aggregate.read().await.departments().cloned().collect()
    }

    pub async fn list_quests(&self, owner: Option<OwnerId>) -> Vec<Quest> {
        let aggregate = self.aggregate.read().await;
        aggregate
            .quests()
            .iter()
            .filter(|q| owner.map_or(true, |o| q.owner == o))
            .cloned()
            .collect()
    }

    pub async fn list_transactions(&self) -> Vec<EconomicTransaction> {
        self.aggregate.read().await.transactions().to_vec()
    }

    pub async fn balance_of(&self, owner: OwnerId) -> u64 {
        self.aggregate.read().await.supply().balance_of(&owner)
    }

    pub async fn supply_summary(&self) -> (u64, u64, u64) {
        let aggregate = self.aggregate.read().await;
        let supply = aggregate.supply();
        (
            supply.total_minted(),
            supply.max_supply(),
            supply.daily_emission_rate(),
        )
    }

    // ========================================================================
    // Persistence seam
    // ========================================================================

    /// Capture the full aggregate as an opaque snapshot.
    pub async fn serialize_state(&self) -> GameSnapshot {
        GameSnapshot::capture(self.aggregate.read().await.clone())
    }

    /// Replace the aggregate with a restored snapshot.
    ///
    /// The snapshot's invariants are audited before it is accepted, so a
    /// corrupted blob can never become live state.
    pub async fn load_state(&self, snapshot: GameSnapshot) -> EngineResult<()> {
        let aggregate = snapshot.into_aggregate();
        aggregate.check_invariants()?;
        *self.aggregate.write().await = aggregate;
        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Run one command under the writer lock and publish its events.
    async fn execute(&self, command: Command) -> EngineResult<Vec<EngineEvent>> {
        let now = Utc::now();
        let events = {
            let mut aggregate = self.aggregate.write().await;
            aggregate.execute(command, now)?
        };
        for event in &events {
            debug!(event_type = event.event_type(), "engine event");
            // Send fails only when nobody is subscribed, which is fine.
            let _ = self.events.send(event.clone());
        }
        Ok(events)
    }

    async fn fetch_character(&self, id: CharacterId) -> EngineResult<Character> {
        self.get_character(id)
            .await
            .ok_or_else(|| EngineError::NotFound(format!("character {}", id)))
    }
}

#[async_trait]
impl SimulationService for SimulationServiceImpl {
    #[instrument(skip(self), fields(owner = %owner, rarity = %rarity))]
    async fn mint_character(
        &self,
        owner: OwnerId,
        rarity: RarityTier,
        department_hint: Option<DepartmentId>,
    ) -> EngineResult<Character> {
        let blueprint = self.generator.lock().await.generate(rarity, department_hint);
        let events = self
            .execute(Command::MintCharacter { owner, blueprint })
            .await?;

        let character_id = events
            .iter()
            .find_map(|event| match event {
                EngineEvent::CharacterMinted { character_id, .. } => Some(*character_id),
                _ => None,
            })
            .ok_or_else(|| EngineError::NotFound("minted character".to_string()))?;

        let character = self.fetch_character(character_id).await?;
        info!(
            character_id = %character.id,
            "Minted {} character '{}' for {}",
            character.rarity,
            character.name,
            owner
        );
        Ok(character)
    }

    #[instrument(skip(self))]
    async fn assign_job(
        &self,
        character_id: CharacterId,
        department_id: DepartmentId,
    ) -> EngineResult<Character> {
        self.execute(Command::AssignJob {
            character_id,
            department_id,
        })
        .await?;
        let character = self.fetch_character(character_id).await?;
        info!(
            character_id = %character_id,
            department_id = %department_id,
            daily_earnings = character.daily_earnings,
            "Assigned character to department"
        );
        Ok(character)
    }

    #[instrument(skip(self))]
    async fn release_job(&self, character_id: CharacterId) -> EngineResult<Character> {
        self.execute(Command::ReleaseJob { character_id }).await?;
        self.fetch_character(character_id).await
    }

    #[instrument(skip(self))]
    async fn level_up(&self, character_id: CharacterId) -> EngineResult<Character> {
        self.execute(Command::LevelUp { character_id }).await?;
        let character = self.fetch_character(character_id).await?;
        info!(
            character_id = %character_id,
            level = character.level,
            "Character leveled up"
        );
        Ok(character)
    }

    #[instrument(skip(self))]
    async fn update_happiness(
        &self,
        character_id: CharacterId,
        value: i64,
    ) -> EngineResult<Character> {
        self.execute(Command::UpdateHappiness {
            character_id,
            value,
        })
        .await?;
        self.fetch_character(character_id).await
    }

    #[instrument(skip(self), fields(owner = %owner))]
    async fn collect_earnings(
        &self,
        owner: OwnerId,
        character_ids: Vec<CharacterId>,
    ) -> EngineResult<u64> {
        let events = self
            .execute(Command::CollectEarnings {
                owner,
                character_ids,
            })
            .await?;
        let total = events
            .iter()
            .find_map(|event| match event {
                EngineEvent::EarningsCollected {
                    total_collected, ..
                } => Some(*total_collected),
                _ => None,
            })
            .unwrap_or(0);
        info!(owner = %owner, total, "Collected earnings");
        Ok(total)
    }

    #[instrument(skip(self))]
    async fn trigger_daily_emission(&self, recipient: OwnerId) -> EngineResult<u64> {
        let events = self.execute(Command::DailyEmission { recipient }).await?;
        let amount = events
            .iter()
            .find_map(|event| match event {
                EngineEvent::DailyEmission { amount, .. } => Some(*amount),
                _ => None,
            })
            .unwrap_or(0);
        info!(recipient = %recipient, amount, "Daily emission performed");
        Ok(amount)
    }

    #[instrument(skip(self))]
    async fn burn_character(&self, owner: OwnerId, character_id: CharacterId) -> EngineResult<()> {
        self.execute(Command::BurnCharacter {
            owner,
            character_id,
        })
        .await?;
        info!(character_id = %character_id, "Character burned");
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn grant(&self, token: CapabilityToken, to: OwnerId, amount: u64) -> EngineResult<()> {
        self.execute(Command::AdminGrant { token, to, amount }).await?;
        info!(to = %to, amount, "Operator grant issued");
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn set_emission_rate(&self, token: CapabilityToken, rate: u64) -> EngineResult<()> {
        self.execute(Command::SetEmissionRate { token, rate }).await?;
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn set_max_per_wallet(&self, token: CapabilityToken, value: usize) -> EngineResult<()> {
        self.execute(Command::SetMaxPerWallet { token, value }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TokenSupply;
    use std::sync::Arc;

    fn service() -> Arc<SimulationServiceImpl> {
        let aggregate = GameAggregate::new(TokenSupply::new(1_000_000, 500), 10, 1.0, 24);
        Arc::new(SimulationServiceImpl::new(
            aggregate,
            CharacterGenerator::from_seed(1),
        ))
    }

    async fn funded_owner(service: &SimulationServiceImpl, amount: u64) -> OwnerId {
        let owner = OwnerId::new();
        service
            .grant(CapabilityToken::root(), owner, amount)
            .await
            .unwrap();
        owner
    }

    #[tokio::test]
    async fn test_mint_and_query_roundtrip() {
        let service = service();
        let owner = funded_owner(&service, 1_000).await;

        let character = service
            .mint_character(owner, RarityTier::Common, None)
            .await
            .unwrap();
        assert_eq!(character.level, 1);
        assert_eq!(service.balance_of(owner).await, 900);
        assert_eq!(service.list_characters(Some(owner)).await.len(), 1);
        assert!(!service.list_quests(Some(owner)).await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_assigns_respect_capacity() {
        let service = service();
        let owner = funded_owner(&service, 10_000).await;

        let department = Department::new("Mailroom", 1, 1);
        let department_id = department.id;
        service.seed_department(department).await;

        let first = service
            .mint_character(owner, RarityTier::Common, None)
            .await
            .unwrap();
        let second = service
            .mint_character(owner, RarityTier::Common, None)
            .await
            .unwrap();

        let task_a = {
            let service = service.clone();
            tokio::spawn(async move { service.assign_job(first.id, department_id).await })
        };
        let task_b = {
            let service = service.clone();
            tokio::spawn(async move { service.assign_job(second.id, department_id).await })
        };

        let results = [task_a.await.unwrap(), task_b.await.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        let capacity_rejections = results
            .iter()
            .filter(|r| matches!(r, Err(EngineError::AtCapacity)))
            .count();
        assert_eq!(successes, 1);
        assert_eq!(capacity_rejections, 1);

        let departments = service.list_departments().await;
        assert_eq!(departments[0].occupants.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_emissions_share_one_window() {
        let service = service();
        let treasury = OwnerId::treasury();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.trigger_daily_emission(treasury).await
            }));
        }

        let mut successes = 0;
        let mut too_early = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(amount) => {
                    assert_eq!(amount, 500);
                    successes += 1;
                }
                Err(EngineError::TooEarly) => too_early += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(too_early, 3);
        assert_eq!(service.balance_of(treasury).await, 500);
    }

    #[tokio::test]
    async fn test_event_stream_carries_operation_events() {
        let service = service();
        let mut events = service.subscribe();
        let owner = funded_owner(&service, 1_000).await;

        service
            .mint_character(owner, RarityTier::Common, None)
            .await
            .unwrap();

        let event = events.recv().await.unwrap();
        assert_eq!(event.event_type(), "CharacterMinted");
    }

    #[tokio::test]
    async fn test_snapshot_roundtrip_preserves_state() {
        let service = service();
        let owner = funded_owner(&service, 1_000).await;
        let character = service
            .mint_character(owner, RarityTier::Rare, None)
            .await
            .unwrap();

        let snapshot = service.serialize_state().await;
        let restored = SimulationServiceImpl::new(
            GameAggregate::new(TokenSupply::new(1, 1), 1, 1.0, 24),
            CharacterGenerator::from_seed(2),
        );
        restored.load_state(snapshot).await.unwrap();

        let loaded = restored.get_character(character.id).await.unwrap();
        assert_eq!(loaded.name, character.name);
        assert_eq!(restored.balance_of(owner).await, 750);
    }
}
