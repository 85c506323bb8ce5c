//! Economy API routes - earnings, emission, supply and the audit log

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{
    BalanceResponseDto, CollectEarningsRequestDto, CollectEarningsResponseDto,
    EmissionRequestDto, EmissionResponseDto, SupplyResponseDto, TransactionResponseDto,
};
use crate::application::services::SimulationService;
use crate::domain::value_objects::{CharacterId, OwnerId};
use crate::infrastructure::http::{map_engine_error, parse_uuid};
use crate::infrastructure::state::AppState;

/// Collect pending earnings for a set of characters
pub async fn collect_earnings(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CollectEarningsRequestDto>,
) -> Result<Json<CollectEarningsResponseDto>, (StatusCode, String)> {
    let owner = OwnerId::from_uuid(parse_uuid(&req.owner, "owner")?);
    let mut character_ids = Vec::with_capacity(req.character_ids.len());
    for id in &req.character_ids {
        character_ids.push(CharacterId::from_uuid(parse_uuid(id, "character")?));
    }

    let total_collected = state
        .simulation
        .collect_earnings(owner, character_ids)
        .await
        .map_err(map_engine_error)?;
    Ok(Json(CollectEarningsResponseDto { total_collected }))
}

/// Trigger the daily emission
///
/// Any caller may invoke this; the engine's rolling window decides whether
/// it succeeds.
pub async fn trigger_emission(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EmissionRequestDto>,
) -> Result<Json<EmissionResponseDto>, (StatusCode, String)> {
    let recipient = match req.recipient {
        Some(ref value) => OwnerId::from_uuid(parse_uuid(value, "recipient")?),
        None => OwnerId::from_uuid(state.config.emission_recipient),
    };
    let amount = state
        .simulation
        .trigger_daily_emission(recipient)
        .await
        .map_err(map_engine_error)?;
    Ok(Json(EmissionResponseDto { amount }))
}

/// Get the supply summary
pub async fn get_supply(State(state): State<Arc<AppState>>) -> Json<SupplyResponseDto> {
    let (total_minted, max_supply, daily_emission_rate) = state.simulation.supply_summary().await;
    Json(SupplyResponseDto {
        total_minted,
        max_supply,
        daily_emission_rate,
    })
}

/// Get one wallet's balance
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Path(owner): Path<String>,
) -> Result<Json<BalanceResponseDto>, (StatusCode, String)> {
    let owner_id = OwnerId::from_uuid(parse_uuid(&owner, "owner")?);
    let balance = state.simulation.balance_of(owner_id).await;
    Ok(Json(BalanceResponseDto {
        owner: owner_id.to_string(),
        balance,
    }))
}

/// List the economic transaction log
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<TransactionResponseDto>> {
    let transactions = state.simulation.list_transactions().await;
    Json(
        transactions
            .into_iter()
            .map(TransactionResponseDto::from)
            .collect(),
    )
}
