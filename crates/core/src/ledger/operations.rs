//! Single-shot ledger mutations.
//!
//! Each operation works on a store the caller loaded and persists it through
//! the given file before returning. Callers validate usernames and numbers
//! first; amounts and balances are re-checked here so the invariants hold for
//! every caller.

use chrono::Utc;
use tracing::info;

use super::error::LedgerError;
use super::file::LedgerFile;
use super::types::{
    ADMIN_ADJUST_GAME, HistoryEntry, MANUAL_SAVE_GAME, PlayerDetail, PlayerRecord, PlayerSummary,
    Store, UNKNOWN_GAME,
};
use super::validation::{ensure_amount, ensure_balance, or_default};

/// Returns the player's record, creating and persisting a default profile first if absent.
pub fn get_or_create<'a>(
    store: &'a mut Store,
    file: &LedgerFile,
    username: &str,
) -> Result<&'a mut PlayerRecord, LedgerError> {
    if !store.players.contains_key(username) {
        store
            .players
            .insert(username.to_string(), PlayerRecord::new_profile(Utc::now()));
        file.persist(store)?;
        info!(player = %username, "Player profile auto-created");
    }

    store
        .players
        .get_mut(username)
        .ok_or_else(|| LedgerError::MissingPlayer(username.to_string()))
}

/// Overwrites the balance with a client session save.
pub fn record_save(
    store: &mut Store,
    file: &LedgerFile,
    username: &str,
    new_balance: i64,
) -> Result<(), LedgerError> {
    ensure_balance(new_balance)?;

    let player = get_or_create(store, file, username)?;
    player.apply(
        new_balance,
        HistoryEntry::now(MANUAL_SAVE_GAME, 0, "session save"),
    );
    file.persist(store)?;

    info!(player = %username, balance = new_balance, "Session saved");
    Ok(())
}

/// Debits `amount` if the player can cover it. Returns the new balance.
pub fn charge(
    store: &mut Store,
    file: &LedgerFile,
    username: &str,
    game: &str,
    amount: i64,
    desc: &str,
) -> Result<i64, LedgerError> {
    ensure_amount(amount)?;

    let player = get_or_create(store, file, username)?;
    if player.balance < amount {
        info!(
            player = %username,
            balance = player.balance,
            amount,
            "Charge refused, insufficient funds"
        );
        return Err(LedgerError::InsufficientFunds {
            balance: player.balance,
            requested: amount,
        });
    }

    let game = or_default(game, UNKNOWN_GAME);
    let balance = player.balance - amount;
    player.apply(
        balance,
        HistoryEntry::now(game, -amount, or_default(desc, "game charge")),
    );
    file.persist(store)?;

    info!(player = %username, game = %game, amount, balance, "Player charged");
    Ok(balance)
}

/// Credits `amount` unconditionally. Returns the new balance.
pub fn payout(
    store: &mut Store,
    file: &LedgerFile,
    username: &str,
    game: &str,
    amount: i64,
    desc: &str,
) -> Result<i64, LedgerError> {
    ensure_amount(amount)?;

    let player = get_or_create(store, file, username)?;
    let balance = player
        .balance
        .checked_add(amount)
        .ok_or(LedgerError::BalanceOverflow {
            balance: player.balance,
            amount,
        })?;

    let game = or_default(game, UNKNOWN_GAME);
    player.apply(
        balance,
        HistoryEntry::now(game, amount, or_default(desc, "game payout")),
    );
    file.persist(store)?;

    info!(player = %username, game = %game, amount, balance, "Player paid out");
    Ok(balance)
}

/// Administrative override of the balance in either direction. Returns the new balance.
pub fn admin_set_balance(
    store: &mut Store,
    file: &LedgerFile,
    username: &str,
    new_balance: i64,
    note: &str,
) -> Result<i64, LedgerError> {
    ensure_balance(new_balance)?;

    let player = get_or_create(store, file, username)?;
    let delta = new_balance.checked_sub(player.balance).ok_or_else(|| {
        LedgerError::InvalidBalance(format!(
            "cannot adjust stored balance {} to {new_balance}",
            player.balance
        ))
    })?;
    player.apply(
        new_balance,
        HistoryEntry::now(ADMIN_ADJUST_GAME, delta, or_default(note, "admin adjustment")),
    );
    file.persist(store)?;

    info!(player = %username, delta, balance = new_balance, "Balance adjusted by admin");
    Ok(new_balance)
}

/// Removes a player and their history. Deleting an unknown player succeeds.
///
/// Returns whether a record was removed.
pub fn admin_delete(
    store: &mut Store,
    file: &LedgerFile,
    username: &str,
) -> Result<bool, LedgerError> {
    if store.players.remove(username).is_none() {
        return Ok(false);
    }

    file.persist(store)?;
    info!(player = %username, "Player deleted");
    Ok(true)
}

/// Lists every player with their balance, ordered by username.
#[must_use]
pub fn list_users(store: &Store) -> Vec<PlayerSummary> {
    store
        .players
        .iter()
        .map(|(username, record)| PlayerSummary {
            username: username.clone(),
            balance: record.balance,
        })
        .collect()
}

/// Returns the full record of a player, provisioning them if absent.
pub fn get_user_detail(
    store: &mut Store,
    file: &LedgerFile,
    username: &str,
) -> Result<PlayerDetail, LedgerError> {
    let player = get_or_create(store, file, username)?;
    Ok(PlayerDetail {
        username: username.to_string(),
        balance: player.balance,
        history: player.history.clone(),
    })
}
