//! Player profile routes used by the game client.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::{get, post},
};
use chipledger_core::ledger::{normalize_username, validate_balance};
use serde::Deserialize;
use serde_json::{Value, json};

use super::run_ledger;
use crate::{
    AppState,
    error::{ApiError, body_or_default, query_or_default},
};

/// Creates the profile routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profile/save", post(save_profile))
}

/// Query parameters naming a player.
#[derive(Debug, Default, Deserialize)]
pub struct UsernameQuery {
    /// Username, trimmed before use.
    pub username: Option<String>,
}

/// Request body for a session save.
#[derive(Debug, Default, Deserialize)]
pub struct SaveRequest {
    /// Username.
    pub username: Option<String>,
    /// New balance, a JSON integer or a string holding one.
    pub balance: Option<Value>,
}

/// GET `/profile` - Balance of a player, provisioning them on first sight.
async fn get_profile(
    State(state): State<AppState>,
    query: Result<Query<UsernameQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let query = query_or_default(query);
    let username = normalize_username(query.username.as_deref())?;

    let profile = run_ledger(&state, move |ledger| ledger.profile(&username)).await?;

    Ok(Json(json!({
        "ok": true,
        "username": profile.username,
        "balance": profile.balance
    })))
}

/// POST `/profile/save` - Overwrite the balance with the client's session state.
async fn save_profile(
    State(state): State<AppState>,
    body: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = body_or_default(body);
    let username = normalize_username(request.username.as_deref())?;
    let balance = validate_balance(request.balance.as_ref())?;

    run_ledger(&state, move |ledger| ledger.save_session(&username, balance)).await?;

    Ok(Json(json!({ "ok": true })))
}
