//! Error responses for ledger routes.

use axum::{
    Json,
    extract::{
        Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chipledger_core::ledger::LedgerError;
use chipledger_shared::AppError;
use serde_json::json;
use tracing::{debug, error};

/// Application error rendered as `{ "ok": false, "error": "<CODE>" }`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, "Ledger request failed");
        } else {
            debug!(error = %self.0, code = self.0.error_code(), "Ledger request refused");
        }

        (
            status,
            Json(json!({
                "ok": false,
                "error": self.0.error_code()
            })),
        )
            .into_response()
    }
}

/// Unwraps a JSON body, treating an unreadable one as empty.
///
/// An empty body then fails field validation with the usual codes.
pub(crate) fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> T {
    match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "Unreadable request body, treating as empty");
            T::default()
        }
    }
}

/// Unwraps a query string, treating an unreadable one as empty.
pub(crate) fn query_or_default<T: Default>(query: Result<Query<T>, QueryRejection>) -> T {
    match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "Unreadable query string, treating as empty");
            T::default()
        }
    }
}
