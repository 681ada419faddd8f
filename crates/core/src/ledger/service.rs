//! Ledger service serializing operations within the process.
//!
//! Every call reloads the store from disk, applies one operation and lets the
//! operation persist it. The lock spans that whole cycle, so requests handled
//! by this process never overwrite each other. Other processes writing the same
//! file still race with last-writer-wins semantics.

use std::sync::{Mutex, PoisonError};

use tracing::info;

use super::error::LedgerError;
use super::file::LedgerFile;
use super::operations;
use super::types::{PlayerDetail, PlayerSummary, Store};

/// Entry point for all ledger reads and writes.
#[derive(Debug)]
pub struct LedgerService {
    file: LedgerFile,
    lock: Mutex<()>,
}

impl LedgerService {
    /// Creates a service without touching the file.
    #[must_use]
    pub fn new(file: LedgerFile) -> Self {
        Self {
            file,
            lock: Mutex::new(()),
        }
    }

    /// Creates a service and loads the ledger once, materializing the file if absent.
    pub fn open(file: LedgerFile) -> Result<Self, LedgerError> {
        let service = Self::new(file);
        let players = service.with_store(|store, _| Ok(store.players.len()))?;
        info!(
            path = %service.file.path().display(),
            policy = ?service.file.policy(),
            players,
            "Ledger opened"
        );
        Ok(service)
    }

    /// The backing file.
    #[must_use]
    pub fn file(&self) -> &LedgerFile {
        &self.file
    }

    fn with_store<T>(
        &self,
        op: impl FnOnce(&mut Store, &LedgerFile) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        // Guards no data, so a poisoned lock is still usable
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut store = self.file.load()?;
        op(&mut store, &self.file)
    }

    /// Returns the player's balance, provisioning them if absent.
    pub fn profile(&self, username: &str) -> Result<PlayerSummary, LedgerError> {
        self.with_store(|store, file| {
            let player = operations::get_or_create(store, file, username)?;
            Ok(PlayerSummary {
                username: username.to_string(),
                balance: player.balance,
            })
        })
    }

    /// Overwrites the balance with a client session save.
    pub fn save_session(&self, username: &str, balance: i64) -> Result<(), LedgerError> {
        self.with_store(|store, file| operations::record_save(store, file, username, balance))
    }

    /// Debits a player. Returns the new balance.
    pub fn charge(
        &self,
        username: &str,
        game: &str,
        amount: i64,
        desc: &str,
    ) -> Result<i64, LedgerError> {
        self.with_store(|store, file| {
            operations::charge(store, file, username, game, amount, desc)
        })
    }

    /// Credits a player. Returns the new balance.
    pub fn payout(
        &self,
        username: &str,
        game: &str,
        amount: i64,
        desc: &str,
    ) -> Result<i64, LedgerError> {
        self.with_store(|store, file| {
            operations::payout(store, file, username, game, amount, desc)
        })
    }

    /// Lists every player and balance.
    pub fn list_users(&self) -> Result<Vec<PlayerSummary>, LedgerError> {
        self.with_store(|store, _| Ok(operations::list_users(store)))
    }

    /// Returns a player's full record, provisioning them if absent.
    pub fn user_detail(&self, username: &str) -> Result<PlayerDetail, LedgerError> {
        self.with_store(|store, file| operations::get_user_detail(store, file, username))
    }

    /// Administrative balance override. Returns the new balance.
    pub fn set_balance(&self, username: &str, balance: i64, note: &str) -> Result<i64, LedgerError> {
        self.with_store(|store, file| {
            operations::admin_set_balance(store, file, username, balance, note)
        })
    }

    /// Removes a player. Succeeds whether or not they existed.
    pub fn delete_user(&self, username: &str) -> Result<(), LedgerError> {
        self.with_store(|store, file| operations::admin_delete(store, file, username))
            .map(|_| ())
    }
}
