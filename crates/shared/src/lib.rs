//! Shared errors and configuration for Chipledger.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types with stable client-facing codes
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, CorruptionPolicy, LedgerConfig, ServerConfig, StaticFilesConfig};
pub use error::{AppError, AppResult};
