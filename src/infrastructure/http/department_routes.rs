//! Department API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{AssignJobRequestDto, CharacterResponseDto, DepartmentResponseDto};
use crate::application::services::SimulationService;
use crate::domain::value_objects::{CharacterId, DepartmentId};
use crate::infrastructure::http::{map_engine_error, parse_uuid};
use crate::infrastructure::state::AppState;

/// List all departments with their occupancy
pub async fn list_departments(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<DepartmentResponseDto>> {
    let departments = state.simulation.list_departments().await;
    Json(
        departments
            .into_iter()
            .map(DepartmentResponseDto::from)
            .collect(),
    )
}

/// Assign a character to a department job
pub async fn assign_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<AssignJobRequestDto>,
) -> Result<Json<CharacterResponseDto>, (StatusCode, String)> {
    let department_id = DepartmentId::from_uuid(parse_uuid(&id, "department")?);
    let character_id = CharacterId::from_uuid(parse_uuid(&req.character_id, "character")?);

    let character = state
        .simulation
        .assign_job(character_id, department_id)
        .await
        .map_err(map_engine_error)?;
    Ok(Json(CharacterResponseDto::from(character)))
}
