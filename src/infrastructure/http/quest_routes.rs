//! Quest API routes

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::dto::QuestResponseDto;
use crate::domain::value_objects::OwnerId;
use crate::infrastructure::http::parse_uuid;
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuestsQuery {
    pub owner: Option<String>,
}

/// List quests, optionally filtered by owner
pub async fn list_quests(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuestsQuery>,
) -> Result<Json<Vec<QuestResponseDto>>, (StatusCode, String)> {
    let owner = match query.owner {
        Some(ref value) => Some(OwnerId::from_uuid(parse_uuid(value, "owner")?)),
        None => None,
    };
    let quests = state.simulation.list_quests(owner).await;
    Ok(Json(quests.into_iter().map(QuestResponseDto::from).collect()))
}
