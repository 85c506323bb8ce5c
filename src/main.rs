//! Tycoonr Engine - Character & economy simulation backend
//!
//! The engine is the backend server that:
//! - Owns the character ledger, department allocator, token supply and quests
//! - Applies every operation as an atomic, validated state transition
//! - Serves a REST API for presentation-layer clients
//! - Runs the scheduled emission and state autosave workers

mod application;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::domain::value_objects::OwnerId;
use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;
use crate::infrastructure::workers::{emission_worker, snapshot_worker};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tycoonr_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Tycoonr Engine");

    // Load configuration
    let config = EngineConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Max supply: {}", config.max_supply);
    tracing::info!("  Daily emission rate: {}", config.daily_emission_rate);
    tracing::info!("  Snapshot path: {}", config.snapshot_path);

    // Initialize application state (restores a persisted snapshot if present)
    let state = AppState::new(config).await?;
    let state = Arc::new(state);
    tracing::info!("Application state initialized");

    // Log the engine event stream for observability
    let event_logger = {
        let mut events = state.simulation.subscribe();
        tokio::spawn(async move {
            while let Ok(event) = events.recv().await {
                tracing::info!(
                    event_type = event.event_type(),
                    at = %event.metadata().timestamp,
                    "event"
                );
            }
        })
    };

    // Scheduled emission worker
    let emission_task = {
        let simulation = state.simulation.clone();
        let recipient = OwnerId::from_uuid(state.config.emission_recipient);
        tokio::spawn(async move {
            tracing::info!("Starting emission worker");
            emission_worker(simulation, recipient).await;
        })
    };

    // State autosave worker
    let snapshot_task = {
        let simulation = state.simulation.clone();
        let store = state.snapshot_store.clone();
        tokio::spawn(async move {
            tracing::info!("Starting snapshot worker");
            snapshot_worker(simulation, store).await;
        })
    };

    // Build the HTTP router
    let app = http::create_routes()
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.server_port));
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    event_logger.abort();
    emission_task.abort();
    snapshot_task.abort();
    Ok(())
}
