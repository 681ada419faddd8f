//! HTTP API layer with Axum routes over the player ledger.
//!
//! This crate provides:
//! - REST API routes under `/api`
//! - Error responses with stable codes
//! - Optional static asset serving for the game client

pub mod error;
pub mod routes;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use chipledger_core::ledger::LedgerService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Ledger service owning the backing file.
    pub ledger: Arc<LedgerService>,
}

impl AppState {
    /// Wraps a ledger service for sharing across handlers.
    #[must_use]
    pub fn new(ledger: LedgerService) -> Self {
        Self {
            ledger: Arc::new(ledger),
        }
    }
}

/// Creates the main application router.
///
/// When `static_dir` is set, any path outside `/api` is served from it.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new().nest("/api", routes::api_routes());

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
