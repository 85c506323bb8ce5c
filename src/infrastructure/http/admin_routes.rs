//! Admin API routes - capability-gated engine administration
//!
//! Callers authenticate with the shared admin key header; a valid key maps
//! to the engine's root capability token. The engine itself re-checks the
//! capability on every operation.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::application::dto::{
    GrantRequestDto, SetEmissionRateRequestDto, SetMaxPerWalletRequestDto,
};
use crate::application::services::SimulationService;
use crate::domain::value_objects::{CapabilityToken, OwnerId};
use crate::infrastructure::http::{map_engine_error, parse_uuid};
use crate::infrastructure::persistence::GameSnapshot;
use crate::infrastructure::state::AppState;

const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Resolve the caller's capability token from the admin key header.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<CapabilityToken, (StatusCode, String)> {
    let presented = headers
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if presented == state.config.admin_key {
        Ok(state.admin_token.clone())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            "Invalid or missing admin key".to_string(),
        ))
    }
}

/// Change the daily emission rate
pub async fn set_emission_rate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SetEmissionRateRequestDto>,
) -> Result<StatusCode, (StatusCode, String)> {
    let token = authorize(&state, &headers)?;
    state
        .simulation
        .set_emission_rate(token, req.rate)
        .await
        .map_err(map_engine_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Change the per-wallet character limit
pub async fn set_max_per_wallet(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SetMaxPerWalletRequestDto>,
) -> Result<StatusCode, (StatusCode, String)> {
    let token = authorize(&state, &headers)?;
    state
        .simulation
        .set_max_per_wallet(token, req.value)
        .await
        .map_err(map_engine_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Credit a wallet directly from supply
pub async fn grant(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<GrantRequestDto>,
) -> Result<StatusCode, (StatusCode, String)> {
    let token = authorize(&state, &headers)?;
    let to = OwnerId::from_uuid(parse_uuid(&req.to, "owner")?);
    state
        .simulation
        .grant(token, to, req.amount)
        .await
        .map_err(map_engine_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Export the full engine state as a snapshot
pub async fn export_state(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<GameSnapshot>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    Ok(Json(state.simulation.serialize_state().await))
}

/// Replace the engine state from a snapshot
pub async fn import_state(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(snapshot): Json<GameSnapshot>,
) -> Result<StatusCode, (StatusCode, String)> {
    authorize(&state, &headers)?;
    state
        .simulation
        .load_state(snapshot)
        .await
        .map_err(map_engine_error)?;
    Ok(StatusCode::NO_CONTENT)
}
