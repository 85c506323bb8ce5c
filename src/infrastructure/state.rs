//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::services::SimulationServiceImpl;
use crate::domain::aggregates::GameAggregate;
use crate::domain::entities::{Department, EligibilityRequirements, TokenSupply};
use crate::domain::services::CharacterGenerator;
use crate::domain::value_objects::{CapabilityToken, RarityTier};
use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::persistence::SnapshotStore;

/// Shared application state
pub struct AppState {
    pub config: EngineConfig,
    pub simulation: Arc<SimulationServiceImpl>,
    /// Capability token handed to callers that pass the admin-key check
    pub admin_token: CapabilityToken,
    pub snapshot_store: SnapshotStore,
}

impl AppState {
    pub async fn new(config: EngineConfig) -> Result<Self> {
        let snapshot_store = SnapshotStore::new(&config.snapshot_path);

        let generator = match config.generator_seed {
            Some(seed) => CharacterGenerator::from_seed(seed),
            None => CharacterGenerator::from_entropy(),
        };

        let aggregate = GameAggregate::new(
            TokenSupply::new(config.max_supply, config.daily_emission_rate),
            config.max_per_wallet,
            config.global_efficiency,
            config.collect_period_hours,
        );
        let simulation = Arc::new(SimulationServiceImpl::new(aggregate, generator));

        // Restore persisted state when a snapshot exists, otherwise seed the
        // default building layout.
        match snapshot_store.load().await? {
            Some(snapshot) => {
                simulation
                    .load_state(snapshot)
                    .await
                    .map_err(|e| anyhow::anyhow!("Rejected persisted snapshot: {e}"))?;
                tracing::info!("Restored engine state from {}", snapshot_store.path().display());
            }
            None => {
                for department in default_building() {
                    simulation.seed_department(department).await;
                }
                tracing::info!("Seeded default building layout");
            }
        }

        Ok(Self {
            config,
            simulation,
            admin_token: CapabilityToken::root(),
            snapshot_store,
        })
    }
}

/// The default set of departments a fresh engine starts with.
fn default_building() -> Vec<Department> {
    vec![
        Department::new("Mailroom", 1, 6).with_base_rate(10).with_efficiency(1.0),
        Department::new("Front Desk", 1, 4).with_base_rate(15).with_efficiency(1.1),
        Department::new("Sales", 2, 5)
            .with_base_rate(25)
            .with_efficiency(1.2)
            .with_requirements(EligibilityRequirements {
                min_level: Some(2),
                ..Default::default()
            }),
        Department::new("Marketing", 3, 4)
            .with_base_rate(30)
            .with_efficiency(1.3)
            .with_requirements(EligibilityRequirements {
                min_skill: Some(("charisma".to_string(), 3)),
                ..Default::default()
            }),
        Department::new("Executive Suite", 9, 2)
            .with_base_rate(80)
            .with_efficiency(1.6)
            .with_requirements(EligibilityRequirements {
                min_level: Some(5),
                required_rarity: Some(RarityTier::Rare),
                ..Default::default()
            }),
    ]
}
