//! HTTP REST API routes

mod admin_routes;
mod character_routes;
mod department_routes;
mod economy_routes;
mod quest_routes;

use axum::http::StatusCode;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::errors::EngineError;
use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Character routes
        .route("/api/characters", post(character_routes::mint_character))
        .route("/api/characters", get(character_routes::list_characters))
        .route("/api/characters/{id}", get(character_routes::get_character))
        .route("/api/characters/{id}", delete(character_routes::burn_character))
        .route(
            "/api/characters/{id}/level-up",
            post(character_routes::level_up),
        )
        .route(
            "/api/characters/{id}/happiness",
            put(character_routes::update_happiness),
        )
        .route(
            "/api/characters/{id}/release",
            post(character_routes::release_job),
        )
        // Department routes
        .route("/api/departments", get(department_routes::list_departments))
        .route(
            "/api/departments/{id}/assign",
            post(department_routes::assign_job),
        )
        // Economy routes
        .route("/api/earnings/collect", post(economy_routes::collect_earnings))
        .route("/api/emission", post(economy_routes::trigger_emission))
        .route("/api/supply", get(economy_routes::get_supply))
        .route("/api/balances/{owner}", get(economy_routes::get_balance))
        .route("/api/transactions", get(economy_routes::list_transactions))
        // Quest routes
        .route("/api/quests", get(quest_routes::list_quests))
        // Admin routes
        .route("/api/admin/emission-rate", put(admin_routes::set_emission_rate))
        .route(
            "/api/admin/max-per-wallet",
            put(admin_routes::set_max_per_wallet),
        )
        .route("/api/admin/grant", post(admin_routes::grant))
        .route("/api/admin/state", get(admin_routes::export_state))
        .route("/api/admin/state", post(admin_routes::import_state))
}

/// Map an engine error kind to an HTTP status and message.
pub(crate) fn map_engine_error(error: EngineError) -> (StatusCode, String) {
    let status = match &error {
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::AtCapacity | EngineError::AlreadyWorking => StatusCode::CONFLICT,
        EngineError::RequirementsNotMet(_) | EngineError::NotEligible(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        EngineError::InsufficientBalance { .. } => StatusCode::PAYMENT_REQUIRED,
        EngineError::ExceedsMaxSupply { .. } => StatusCode::CONFLICT,
        EngineError::TooEarly => StatusCode::TOO_MANY_REQUESTS,
        EngineError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
        EngineError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
    };
    (status, error.to_string())
}

pub(crate) fn parse_uuid(value: &str, what: &str) -> Result<Uuid, (StatusCode, String)> {
    Uuid::parse_str(value).map_err(|_| (StatusCode::BAD_REQUEST, format!("Invalid {} ID", what)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_kind_has_a_distinct_mapping() {
        let cases = [
            (
                EngineError::NotFound("x".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (EngineError::AtCapacity, StatusCode::CONFLICT),
            (EngineError::AlreadyWorking, StatusCode::CONFLICT),
            (
                EngineError::RequirementsNotMet("x".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                EngineError::NotEligible("x".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                EngineError::InsufficientBalance {
                    available: 0,
                    required: 1,
                },
                StatusCode::PAYMENT_REQUIRED,
            ),
            (
                EngineError::ExceedsMaxSupply { requested: 1 },
                StatusCode::CONFLICT,
            ),
            (EngineError::TooEarly, StatusCode::TOO_MANY_REQUESTS),
            (
                EngineError::InvalidParameter("x".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                EngineError::Unauthorized("x".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(map_engine_error(error).0, expected);
        }
    }
}
