//! Health check handler.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: `ok` or `degraded`.
    pub status: &'static str,
    /// Whether the database answers queries.
    pub database: bool,
}

/// Health check.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = state.db.health_check().await;

    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" },
        database,
    })
}
