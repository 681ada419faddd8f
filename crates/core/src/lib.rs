//! Core ledger logic for Chipledger.
//!
//! This crate owns the player balance ledger with ZERO web dependencies:
//! domain types, validation rules, the JSON file store and the mutations
//! applied to it.
//!
//! # Modules
//!
//! - `ledger` - Player balances, history and their persistence

pub mod ledger;
