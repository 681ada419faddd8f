//! Domain types for the player ledger.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Balance every lazily created player starts with.
pub const STARTING_BALANCE: i64 = 1000;

/// Game tag for entries written by the ledger itself.
pub const SYSTEM_GAME: &str = "system";
/// Game tag for direct session saves.
pub const MANUAL_SAVE_GAME: &str = "manual-save";
/// Game tag for administrative overrides.
pub const ADMIN_ADJUST_GAME: &str = "admin-adjust";
/// Game tag used when a caller leaves the game blank.
pub const UNKNOWN_GAME: &str = "unknown";

/// Root persisted object: every player keyed by username.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Player records keyed by trimmed, case-sensitive username.
    #[serde(default)]
    pub players: BTreeMap<String, PlayerRecord>,
}

/// Balance and audit trail of one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Current balance, never negative after a committed mutation.
    pub balance: i64,
    /// Chronological, append-only history.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl PlayerRecord {
    /// Creates the default profile handed to a player on first reference.
    #[must_use]
    pub fn new_profile(now: DateTime<Utc>) -> Self {
        Self {
            balance: STARTING_BALANCE,
            history: vec![HistoryEntry {
                ts: now,
                game: SYSTEM_GAME.to_string(),
                delta: 0,
                desc: "auto-created profile".to_string(),
            }],
        }
    }

    /// Sets the balance and appends the entry describing the change.
    pub(crate) fn apply(&mut self, new_balance: i64, entry: HistoryEntry) {
        self.balance = new_balance;
        self.history.push(entry);
    }
}

/// One immutable audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the mutation happened.
    #[serde(with = "lenient_ts")]
    pub ts: DateTime<Utc>,
    /// Source of the mutation.
    pub game: String,
    /// Signed balance change, 0 for informational entries.
    #[serde(with = "lenient_delta")]
    pub delta: i64,
    /// Free-text description.
    pub desc: String,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time.
    #[must_use]
    pub fn now(game: impl Into<String>, delta: i64, desc: impl Into<String>) -> Self {
        Self {
            ts: Utc::now(),
            game: game.into(),
            delta,
            desc: desc.into(),
        }
    }
}

/// Timestamps written as RFC 3339, read back from any ISO-8601 date or
/// date-time. Offset-less values are taken as UTC.
mod lenient_ts {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("unrecognized timestamp {raw:?}")))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

/// Deltas written as JSON integers, read back from integers or numeric strings.
mod lenient_delta {
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
    use serde_json::Value;

    use crate::ledger::validation::parse_integer;

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S>(delta: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        delta.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        parse_integer(&raw).ok_or_else(|| de::Error::custom(format!("delta is not an integer: {raw}")))
    }
}

/// Listing view of a player, history excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    /// Username.
    pub username: String,
    /// Current balance.
    pub balance: i64,
}

/// Full view of a player including history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerDetail {
    /// Username.
    pub username: String,
    /// Current balance.
    pub balance: i64,
    /// Complete history, oldest first.
    pub history: Vec<HistoryEntry>,
}
