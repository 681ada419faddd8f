//! Ledger error types for validation, business-rule and persistence errors.

use std::path::PathBuf;

use chipledger_shared::AppError;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Username missing or blank after trimming.
    #[error("Username is required")]
    UsernameRequired,

    /// Balance is not a non-negative integer.
    #[error("Invalid balance: {0}")]
    InvalidBalance(String),

    /// Amount is not a positive integer.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    // ========== Business Rule Errors ==========
    /// Charge would take the balance below zero.
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Balance before the refused charge.
        balance: i64,
        /// Requested charge.
        requested: i64,
    },

    /// Payout would overflow the balance.
    #[error("Balance {balance} cannot absorb a payout of {amount}")]
    BalanceOverflow {
        /// Balance before the refused payout.
        balance: i64,
        /// Requested payout.
        amount: i64,
    },

    /// Player vanished from the store between provisioning and use.
    #[error("Player {0} missing from the ledger")]
    MissingPlayer(String),

    // ========== Persistence Errors ==========
    /// Ledger file exists but is not a ledger, and the policy forbids resetting it.
    #[error("Ledger file {} is corrupted: {reason}", .path.display())]
    Corrupted {
        /// Backing file path.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// Reading or writing the ledger file failed.
    #[error("Ledger file I/O failed for {}: {source}", .path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Store could not be encoded as JSON.
    #[error("Failed to encode ledger: {0}")]
    Encode(#[from] serde_json::Error),
}

impl LedgerError {
    /// Creates an I/O error bound to a path.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::UsernameRequired => Self::UsernameRequired,
            LedgerError::InvalidBalance(msg) => Self::InvalidBalance(msg),
            LedgerError::InvalidAmount(msg) => Self::InvalidAmount(msg),
            LedgerError::BalanceOverflow { .. } => Self::InvalidAmount(err.to_string()),
            LedgerError::InsufficientFunds { balance, requested } => {
                Self::InsufficientFunds { balance, requested }
            }
            LedgerError::MissingPlayer(_) => Self::Internal(err.to_string()),
            LedgerError::Corrupted { .. } | LedgerError::Io { .. } | LedgerError::Encode(_) => {
                Self::Storage(err.to_string())
            }
        }
    }
}
