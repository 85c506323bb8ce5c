//! Background workers - scheduled emission attempts and state autosave

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{SimulationService, SimulationServiceImpl};
use crate::domain::errors::EngineError;
use crate::domain::value_objects::OwnerId;
use crate::infrastructure::persistence::SnapshotStore;

/// How often the emission worker retries the daily emission.
const EMISSION_POLL_INTERVAL: Duration = Duration::from_secs(60 * 60);
/// How often engine state is flushed to disk.
const SNAPSHOT_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Periodically attempt the daily emission.
///
/// The engine's rolling window is the actual gate; `TooEarly` here is the
/// normal outcome for all but one attempt per day.
pub async fn emission_worker(simulation: Arc<SimulationServiceImpl>, recipient: OwnerId) {
    loop {
        match simulation.trigger_daily_emission(recipient).await {
            Ok(amount) => {
                tracing::info!(amount, recipient = %recipient, "Scheduled emission succeeded");
            }
            Err(EngineError::TooEarly) => {
                tracing::debug!("Emission window not yet elapsed");
            }
            Err(error) => {
                tracing::warn!("Scheduled emission failed: {}", error);
            }
        }
        tokio::time::sleep(EMISSION_POLL_INTERVAL).await;
    }
}

/// Periodically persist the engine state.
pub async fn snapshot_worker(simulation: Arc<SimulationServiceImpl>, store: SnapshotStore) {
    loop {
        tokio::time::sleep(SNAPSHOT_INTERVAL).await;
        let snapshot = simulation.serialize_state().await;
        match store.save(&snapshot).await {
            Ok(()) => tracing::debug!("Engine state persisted to {}", store.path().display()),
            Err(error) => tracing::error!("Failed to persist engine state: {:#}", error),
        }
    }
}
