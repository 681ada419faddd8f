//! Backing JSON file for the ledger.
//!
//! The whole store is read on every load and rewritten on every persist.
//! Writes go to a sibling temp file that is then renamed over the ledger.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::error::LedgerError;
use super::types::{HistoryEntry, PlayerRecord, Store};
use chipledger_shared::CorruptionPolicy;

/// Handle on the ledger file and its recovery policy.
#[derive(Debug, Clone)]
pub struct LedgerFile {
    path: PathBuf,
    policy: CorruptionPolicy,
}

impl LedgerFile {
    /// Creates a handle. Nothing is touched on disk until `load` or `persist`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, policy: CorruptionPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Recovery policy applied to unparseable files.
    #[must_use]
    pub const fn policy(&self) -> CorruptionPolicy {
        self.policy
    }

    /// Reads the full store.
    ///
    /// A missing file is created empty. A file that is not a JSON object is
    /// handled by the corruption policy. A missing or non-object `players`
    /// field is read as an empty ledger without rewriting the file.
    pub fn load(&self) -> Result<Store, LedgerError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "Ledger file missing, creating empty ledger");
                let store = Store::default();
                self.persist(&store)?;
                return Ok(store);
            }
            Err(err) => return Err(LedgerError::io(&self.path, err)),
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(root)) => Ok(materialize(root)),
            Ok(other) => self.recover(format!("expected a JSON object, found {}", kind(&other))),
            Err(err) => self.recover(err.to_string()),
        }
    }

    /// Replaces the backing file with the pretty-printed store.
    pub fn persist(&self, store: &Store) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| LedgerError::io(parent, err))?;
        }

        let payload = serde_json::to_vec_pretty(store)?;
        let temp_path = self
            .path
            .with_extension(format!("{}.tmp", Uuid::new_v4().simple()));

        fs::write(&temp_path, payload).map_err(|err| LedgerError::io(&temp_path, err))?;
        if let Err(err) = fs::rename(&temp_path, &self.path) {
            // Leftover temp files are never read back
            let _ = fs::remove_file(&temp_path);
            return Err(LedgerError::io(&self.path, err));
        }

        debug!(
            path = %self.path.display(),
            players = store.players.len(),
            "Ledger persisted"
        );
        Ok(())
    }

    fn recover(&self, reason: String) -> Result<Store, LedgerError> {
        match self.policy {
            CorruptionPolicy::ResetToEmpty => {
                warn!(
                    path = %self.path.display(),
                    reason = %reason,
                    "Ledger file unparseable, resetting to an empty ledger"
                );
                let store = Store::default();
                self.persist(&store)?;
                Ok(store)
            }
            CorruptionPolicy::FailFast => {
                error!(path = %self.path.display(), reason = %reason, "Ledger file unparseable");
                Err(LedgerError::Corrupted {
                    path: self.path.clone(),
                    reason,
                })
            }
        }
    }
}

fn materialize(mut root: Map<String, Value>) -> Store {
    let players = match root.remove("players") {
        Some(Value::Object(players)) => players
            .into_iter()
            .filter_map(|(username, value)| {
                materialize_player(&username, value).map(|record| (username, record))
            })
            .collect(),
        Some(other) => {
            warn!(found = kind(&other), "Ledger players field is not an object, ignoring it");
            BTreeMap::new()
        }
        None => BTreeMap::new(),
    };

    Store { players }
}

/// Reads one player record. A record without a non-negative integer balance
/// is dropped; unreadable history entries are skipped and the rest kept.
fn materialize_player(username: &str, value: Value) -> Option<PlayerRecord> {
    let mut fields = match value {
        Value::Object(fields) => fields,
        other => {
            warn!(player = %username, found = kind(&other), "Dropping malformed player record");
            return None;
        }
    };

    let balance = match fields.get("balance").and_then(Value::as_i64) {
        Some(balance) if balance >= 0 => balance,
        _ => {
            warn!(
                player = %username,
                balance = ?fields.get("balance"),
                "Dropping player record without a valid balance"
            );
            return None;
        }
    };

    let history = match fields.remove("history") {
        Some(Value::Array(entries)) => entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<HistoryEntry>(entry) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(player = %username, index, error = %err, "Skipping malformed history entry");
                    None
                }
            })
            .collect(),
        None | Some(Value::Null) => Vec::new(),
        Some(other) => {
            warn!(player = %username, found = kind(&other), "Player history is not an array, ignoring it");
            Vec::new()
        }
    };

    Some(PlayerRecord { balance, history })
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
