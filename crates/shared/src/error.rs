//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Each variant maps to a stable code that clients match on.
#[derive(Debug, Error)]
pub enum AppError {
    /// Username missing or blank after trimming.
    #[error("Username is required")]
    UsernameRequired,

    /// Balance is not a non-negative base-10 integer.
    #[error("Invalid balance: {0}")]
    InvalidBalance(String),

    /// Amount is not a positive base-10 integer.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Debit refused because the player cannot cover it.
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Balance at the time of the request.
        balance: i64,
        /// Amount the caller tried to charge.
        requested: i64,
    },

    /// Ledger file could not be read, parsed or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    ///
    /// Insufficient funds is a business outcome, not a transport failure, so it stays 200.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::UsernameRequired | Self::InvalidBalance(_) | Self::InvalidAmount(_) => 400,
            Self::InsufficientFunds { .. } => 200,
            Self::Storage(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UsernameRequired => "USERNAME_REQUIRED",
            Self::InvalidBalance(_) => "INVALID_BALANCE",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insufficient() -> AppError {
        AppError::InsufficientFunds {
            balance: 850,
            requested: 1000,
        }
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::UsernameRequired.status_code(), 400);
        assert_eq!(AppError::InvalidBalance(String::new()).status_code(), 400);
        assert_eq!(AppError::InvalidAmount(String::new()).status_code(), 400);
        assert_eq!(insufficient().status_code(), 200);
        assert_eq!(AppError::Storage(String::new()).status_code(), 500);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::UsernameRequired.error_code(), "USERNAME_REQUIRED");
        assert_eq!(
            AppError::InvalidBalance(String::new()).error_code(),
            "INVALID_BALANCE"
        );
        assert_eq!(
            AppError::InvalidAmount(String::new()).error_code(),
            "INVALID_AMOUNT"
        );
        assert_eq!(insufficient().error_code(), "INSUFFICIENT_FUNDS");
        assert_eq!(
            AppError::Storage(String::new()).error_code(),
            "STORAGE_ERROR"
        );
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::UsernameRequired.to_string(),
            "Username is required"
        );
        assert_eq!(
            AppError::InvalidBalance("msg".into()).to_string(),
            "Invalid balance: msg"
        );
        assert_eq!(
            AppError::InvalidAmount("msg".into()).to_string(),
            "Invalid amount: msg"
        );
        assert_eq!(
            insufficient().to_string(),
            "Insufficient funds: balance 850, requested 1000"
        );
        assert_eq!(
            AppError::Storage("msg".into()).to_string(),
            "Storage error: msg"
        );
        assert_eq!(
            AppError::Internal("msg".into()).to_string(),
            "Internal error: msg"
        );
    }
}
