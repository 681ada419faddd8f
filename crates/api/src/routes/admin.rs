//! Administrative ledger routes.
//!
//! These routes bypass gameplay rules: balances are set directly and players
//! can be removed outright.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::{get, post},
};
use chipledger_core::ledger::{normalize_username, text_field, validate_balance};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use super::{profile::UsernameQuery, run_ledger};
use crate::{
    AppState,
    error::{ApiError, body_or_default, query_or_default},
};

/// Creates the admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/user-detail", get(user_detail))
        .route("/admin/set-balance", post(set_balance))
        .route("/admin/delete-user", post(delete_user))
}

/// Request body for a balance override.
#[derive(Debug, Default, Deserialize)]
pub struct SetBalanceRequest {
    /// Username.
    pub username: Option<String>,
    /// New balance, a JSON integer or a string holding one.
    pub balance: Option<Value>,
    /// Audit note, `admin adjustment` when blank.
    pub note: Option<Value>,
}

/// Request body naming a player to delete.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteUserRequest {
    /// Username.
    pub username: Option<String>,
}

/// GET `/admin/users` - Every player with their balance.
async fn list_users(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let users = run_ledger(&state, |ledger| ledger.list_users()).await?;

    Ok(Json(json!({ "ok": true, "users": users })))
}

/// GET `/admin/user-detail` - Balance and full history of a player.
async fn user_detail(
    State(state): State<AppState>,
    query: Result<Query<UsernameQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let query = query_or_default(query);
    let username = normalize_username(query.username.as_deref())?;

    let detail = run_ledger(&state, move |ledger| ledger.user_detail(&username)).await?;

    Ok(Json(json!({
        "ok": true,
        "username": detail.username,
        "balance": detail.balance,
        "history": detail.history
    })))
}

/// POST `/admin/set-balance` - Override a balance, recording the delta.
async fn set_balance(
    State(state): State<AppState>,
    body: Result<Json<SetBalanceRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = body_or_default(body);
    let username = normalize_username(request.username.as_deref())?;
    let balance = validate_balance(request.balance.as_ref())?;
    let note = text_field(request.note.as_ref());

    let balance = run_ledger(&state, move |ledger| {
        ledger.set_balance(&username, balance, &note)
    })
    .await?;

    Ok(Json(json!({ "ok": true, "balance": balance })))
}

/// POST `/admin/delete-user` - Remove a player and their history.
async fn delete_user(
    State(state): State<AppState>,
    body: Result<Json<DeleteUserRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = body_or_default(body);
    let username = normalize_username(request.username.as_deref())?;

    info!(player = %username, "Admin requested player deletion");
    run_ledger(&state, move |ledger| ledger.delete_user(&username)).await?;

    Ok(Json(json!({ "ok": true })))
}
