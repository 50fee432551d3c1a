// src/api/mod.rs
//
// HTTP boundary
//
// Thin axum surface over the battle service: route wiring, request
// extraction and error-to-status translation. No battle or catalog
// logic lives here.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::domain::Battle;
use crate::error::AppError;
use crate::services::BattleService;

/// Shared state handed to every handler.
/// All fields are Arc-wrapped for thread-safe sharing across requests.
pub struct ApiState {
    pub battle_service: Arc<BattleService>,
}

/// Build the complete router for the battle API.
///
/// - `POST /api/battles/random` -- create a battle with two random Pokemon
/// - `POST /api/battles/{id}/simulate` -- simulate a battle by id
/// - `GET /api/battles?q=` -- search finished battles
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/api/battles/random", post(create_random_battle))
        .route("/api/battles/{id}/simulate", post(simulate_battle))
        .route("/api/battles", get(search_battles))
        .with_state(state)
}

/// Query parameters for `GET /api/battles`
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Optional name substring to search in both participant names
    pub q: Option<String>,
}

async fn create_random_battle(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Battle>, AppError> {
    let battle = state.battle_service.create_random_battle().await?;
    Ok(Json(battle))
}

async fn simulate_battle(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<Battle>, AppError> {
    let battle = state.battle_service.simulate_battle(id)?;
    Ok(Json(battle))
}

async fn search_battles(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Battle>> {
    Json(state.battle_service.search_battles(query.q.as_deref()))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BattleNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InsufficientCatalog => StatusCode::CONFLICT,
            AppError::Catalog { .. } => StatusCode::BAD_GATEWAY,
            AppError::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
