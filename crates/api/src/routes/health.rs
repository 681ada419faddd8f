//! Health check endpoint.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tracing::warn;

use super::run_ledger;
use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `healthy` when the ledger file loads, `degraded` otherwise.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Number of players in the ledger, absent when it could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<usize>,
}

/// GET `/health` - Loads the ledger once to prove the backing file is usable.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match run_ledger(&state, |ledger| ledger.list_users()).await {
        Ok(users) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                version: env!("CARGO_PKG_VERSION"),
                players: Some(users.len()),
            }),
        ),
        Err(err) => {
            warn!(error = %err.0, "Health check could not read the ledger");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    version: env!("CARGO_PKG_VERSION"),
                    players: None,
                }),
            )
        }
    }
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
