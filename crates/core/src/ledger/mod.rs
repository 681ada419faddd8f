//! Player balance ledger.
//!
//! This module implements the ledger functionality:
//! - Domain types for players and their history
//! - Error types for ledger operations
//! - The backing JSON file and its corruption handling
//! - Single-shot read-mutate-write operations on a loaded store
//! - Input validation shared by every caller
//! - Ledger service serializing operations within the process

pub mod error;
pub mod file;
pub mod operations;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;

pub use chipledger_shared::CorruptionPolicy;
pub use error::LedgerError;
pub use file::LedgerFile;
pub use service::LedgerService;
pub use types::{HistoryEntry, PlayerDetail, PlayerRecord, PlayerSummary, STARTING_BALANCE, Store};
pub use validation::{normalize_username, text_field, validate_amount, validate_balance};
