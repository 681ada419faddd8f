//! Game charge and payout routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use chipledger_core::ledger::{normalize_username, text_field, validate_amount};
use serde::Deserialize;
use serde_json::{Value, json};

use super::run_ledger;
use crate::{AppState, error::ApiError, error::body_or_default};

/// Creates the game routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/game/charge", post(charge))
        .route("/game/payout", post(payout))
}

/// Request body for a charge or payout.
#[derive(Debug, Default, Deserialize)]
pub struct GameRequest {
    /// Username.
    pub username: Option<String>,
    /// Game identifier, `unknown` when blank.
    pub game: Option<Value>,
    /// Positive amount, a JSON integer or a string holding one.
    pub amount: Option<Value>,
    /// Description, defaulted per operation when blank.
    pub desc: Option<Value>,
}

/// Validated charge or payout.
struct GameMove {
    username: String,
    game: String,
    amount: i64,
    desc: String,
}

impl TryFrom<GameRequest> for GameMove {
    type Error = ApiError;

    fn try_from(request: GameRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            username: normalize_username(request.username.as_deref())?,
            amount: validate_amount(request.amount.as_ref())?,
            game: text_field(request.game.as_ref()),
            desc: text_field(request.desc.as_ref()),
        })
    }
}

/// POST `/game/charge` - Debit a player, refused with `INSUFFICIENT_FUNDS` when short.
async fn charge(
    State(state): State<AppState>,
    body: Result<Json<GameRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let m = GameMove::try_from(body_or_default(body))?;

    let balance = run_ledger(&state, move |ledger| {
        ledger.charge(&m.username, &m.game, m.amount, &m.desc)
    })
    .await?;

    Ok(Json(json!({ "ok": true, "balance": balance })))
}

/// POST `/game/payout` - Credit a player.
async fn payout(
    State(state): State<AppState>,
    body: Result<Json<GameRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let m = GameMove::try_from(body_or_default(body))?;

    let balance = run_ledger(&state, move |ledger| {
        ledger.payout(&m.username, &m.game, m.amount, &m.desc)
    })
    .await?;

    Ok(Json(json!({ "ok": true, "balance": balance })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipledger_shared::AppError;

    #[test]
    fn test_username_checked_before_amount() {
        let err = GameMove::try_from(GameRequest {
            amount: Some(json!(-1)),
            ..GameRequest::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err.0, AppError::UsernameRequired));
    }

    #[test]
    fn test_missing_game_and_desc_become_blank() {
        let m = GameMove::try_from(GameRequest {
            username: Some(" alice ".to_string()),
            amount: Some(json!("25")),
            ..GameRequest::default()
        })
        .unwrap();
        assert_eq!(m.username, "alice");
        assert_eq!(m.amount, 25);
        assert!(m.game.is_empty());
        assert!(m.desc.is_empty());
    }

    #[test]
    fn test_non_string_game_is_stringified() {
        let request: GameRequest = serde_json::from_value(json!({
            "username": "alice",
            "amount": 5,
            "game": 7,
            "desc": null
        }))
        .unwrap();
        let m = GameMove::try_from(request).unwrap();
        assert_eq!(m.game, "7");
        assert!(m.desc.is_empty());
    }
}
