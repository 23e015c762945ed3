use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
}

/// Service metadata response payload.
#[derive(Serialize)]
pub struct InfoResponse {
    /// Human-readable service name.
    pub name: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// One-line service description.
    pub description: &'static str,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = reelrate_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// GET /info -- returns static service metadata.
async fn info() -> Json<InfoResponse> {
    Json(InfoResponse {
        name: "Movie Rating System API",
        version: env!("CARGO_PKG_VERSION"),
        description: "A RESTful API for rating movies and managing user profiles",
    })
}

/// Mount health and info routes at the root level.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/info", get(info))
}
