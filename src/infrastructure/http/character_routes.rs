//! Character API routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::dto::{
    parse_rarity, BurnCharacterRequestDto, CharacterResponseDto, MintCharacterRequestDto,
    UpdateHappinessRequestDto,
};
use crate::application::services::SimulationService;
use crate::domain::value_objects::{CharacterId, DepartmentId, OwnerId};
use crate::infrastructure::http::{map_engine_error, parse_uuid};
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListCharactersQuery {
    pub owner: Option<String>,
}

/// Mint a new character
pub async fn mint_character(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MintCharacterRequestDto>,
) -> Result<(StatusCode, Json<CharacterResponseDto>), (StatusCode, String)> {
    let owner = OwnerId::from_uuid(parse_uuid(&req.owner, "owner")?);
    let department_hint = match req.department_hint {
        Some(ref hint) => Some(DepartmentId::from_uuid(parse_uuid(hint, "department")?)),
        None => None,
    };

    let rarity = parse_rarity(&req.rarity).map_err(map_engine_error)?;
    let character = state
        .simulation
        .mint_character(owner, rarity, department_hint)
        .await
        .map_err(map_engine_error)?;

    Ok((
        StatusCode::CREATED,
        Json(CharacterResponseDto::from(character)),
    ))
}

/// List characters, optionally filtered by owner
pub async fn list_characters(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListCharactersQuery>,
) -> Result<Json<Vec<CharacterResponseDto>>, (StatusCode, String)> {
    let owner = match query.owner {
        Some(ref value) => Some(OwnerId::from_uuid(parse_uuid(value, "owner")?)),
        None => None,
    };
    let characters = state.simulation.list_characters(owner).await;
    Ok(Json(
        characters.into_iter().map(CharacterResponseDto::from).collect(),
    ))
}

/// Get a character by ID
pub async fn get_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CharacterResponseDto>, (StatusCode, String)> {
    let id = CharacterId::from_uuid(parse_uuid(&id, "character")?);
    let character = state
        .simulation
        .get_character(id)
        .await
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Character not found".to_string()))?;
    Ok(Json(CharacterResponseDto::from(character)))
}

/// Level a character up
pub async fn level_up(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CharacterResponseDto>, (StatusCode, String)> {
    let id = CharacterId::from_uuid(parse_uuid(&id, "character")?);
    let character = state
        .simulation
        .level_up(id)
        .await
        .map_err(map_engine_error)?;
    Ok(Json(CharacterResponseDto::from(character)))
}

/// Update a character's happiness
pub async fn update_happiness(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateHappinessRequestDto>,
) -> Result<Json<CharacterResponseDto>, (StatusCode, String)> {
    let id = CharacterId::from_uuid(parse_uuid(&id, "character")?);
    let character = state
        .simulation
        .update_happiness(id, req.happiness)
        .await
        .map_err(map_engine_error)?;
    Ok(Json(CharacterResponseDto::from(character)))
}

/// Release a character from its job
pub async fn release_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CharacterResponseDto>, (StatusCode, String)> {
    let id = CharacterId::from_uuid(parse_uuid(&id, "character")?);
    let character = state
        .simulation
        .release_job(id)
        .await
        .map_err(map_engine_error)?;
    Ok(Json(CharacterResponseDto::from(character)))
}

/// Burn a character
pub async fn burn_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<BurnCharacterRequestDto>,
) -> Result<StatusCode, (StatusCode, String)> {
    let id = CharacterId::from_uuid(parse_uuid(&id, "character")?);
    let owner = OwnerId::from_uuid(parse_uuid(&req.owner, "owner")?);
    state
        .simulation
        .burn_character(owner, id)
        .await
        .map_err(map_engine_error)?;
    Ok(StatusCode::NO_CONTENT)
}
