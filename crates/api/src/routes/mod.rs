//! API route definitions.

use std::sync::Arc;

use axum::Router;
use chipledger_core::ledger::{LedgerError, LedgerService};
use chipledger_shared::AppError;

use crate::{AppState, error::ApiError};

pub mod admin;
pub mod game;
pub mod health;
pub mod profile;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(profile::routes())
        .merge(game::routes())
        .merge(admin::routes())
}

/// Runs a ledger operation on the blocking pool.
///
/// Ledger calls do synchronous file I/O under the service lock.
pub(crate) async fn run_ledger<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&LedgerService) -> Result<T, LedgerError> + Send + 'static,
    T: Send + 'static,
{
    let ledger = Arc::clone(&state.ledger);
    tokio::task::spawn_blocking(move || op(&ledger))
        .await
        .map_err(|e| ApiError(AppError::Internal(format!("ledger task failed: {e}"))))?
        .map_err(ApiError::from)
}
