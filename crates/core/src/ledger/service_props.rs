//! Property-based tests for the ledger.
//!
//! - Balances never go negative, whatever sequence of mutations is applied
//! - History is append-only: one entry per successful mutation, prefix untouched
//! - Persisting then loading a store yields the same store

use chrono::DateTime;
use proptest::prelude::*;

use super::error::LedgerError;
use super::file::LedgerFile;
use super::service::LedgerService;
use super::types::{HistoryEntry, PlayerRecord, Store};
use chipledger_shared::CorruptionPolicy;

/// A mutation a client or admin can apply to one player.
#[derive(Debug, Clone)]
enum Mutation {
    Charge(i64),
    Payout(i64),
    Save(i64),
    AdminSet(i64),
}

/// Strategy to generate mutations with amounts around the starting balance.
fn mutation_strategy() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        (1i64..2_000).prop_map(Mutation::Charge),
        (1i64..2_000).prop_map(Mutation::Payout),
        (0i64..3_000).prop_map(Mutation::Save),
        (0i64..3_000).prop_map(Mutation::AdminSet),
    ]
}

/// Strategy to generate history entries with second-precision timestamps.
fn history_entry_strategy() -> impl Strategy<Value = HistoryEntry> {
    (
        0i64..4_000_000_000,
        "[a-z-]{1,12}",
        -5_000i64..5_000,
        "[ -~]{0,24}",
    )
        .prop_map(|(secs, game, delta, desc)| HistoryEntry {
            ts: DateTime::from_timestamp(secs, 0).unwrap_or_default(),
            game,
            delta,
            desc,
        })
}

/// Strategy to generate whole stores.
fn store_strategy() -> impl Strategy<Value = Store> {
    prop::collection::btree_map(
        "[A-Za-z0-9_]{1,10}",
        (
            0i64..1_000_000,
            prop::collection::vec(history_entry_strategy(), 0..5),
        )
            .prop_map(|(balance, history)| PlayerRecord { balance, history }),
        0..6,
    )
    .prop_map(|players| Store { players })
}

fn apply(service: &LedgerService, mutation: &Mutation) -> Result<i64, LedgerError> {
    match *mutation {
        Mutation::Charge(amount) => service.charge("prop", "slots", amount, "bet"),
        Mutation::Payout(amount) => service.payout("prop", "slots", amount, "win"),
        Mutation::Save(balance) => service.save_session("prop", balance).map(|()| balance),
        Mutation::AdminSet(balance) => service.set_balance("prop", balance, "audit"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Property: balance stays non-negative and refused charges change nothing.
    #[test]
    fn prop_balance_never_negative(
        mutations in prop::collection::vec(mutation_strategy(), 1..20),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let service = LedgerService::open(LedgerFile::new(
            dir.path().join("ledger.json"),
            CorruptionPolicy::FailFast,
        )).unwrap();

        for mutation in &mutations {
            let before = service.profile("prop").unwrap().balance;
            match apply(&service, mutation) {
                Ok(balance) => prop_assert!(balance >= 0),
                Err(LedgerError::InsufficientFunds { balance, requested }) => {
                    prop_assert_eq!(balance, before);
                    prop_assert!(requested > before);
                }
                Err(other) => {
                    return Err(TestCaseError::fail(format!("unexpected error: {other}")));
                }
            }
            prop_assert!(service.profile("prop").unwrap().balance >= 0);
        }
    }

    /// Property: each successful mutation appends exactly one entry and keeps the prefix.
    #[test]
    fn prop_history_append_only(
        mutations in prop::collection::vec(mutation_strategy(), 1..20),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let service = LedgerService::open(LedgerFile::new(
            dir.path().join("ledger.json"),
            CorruptionPolicy::FailFast,
        )).unwrap();

        for mutation in &mutations {
            let before = service.user_detail("prop").unwrap();
            let succeeded = apply(&service, mutation).is_ok();
            let after = service.user_detail("prop").unwrap();

            let expected_len = before.history.len() + usize::from(succeeded);
            prop_assert_eq!(after.history.len(), expected_len);
            prop_assert_eq!(&after.history[..before.history.len()], &before.history[..]);
            if succeeded && !matches!(mutation, Mutation::Save(_)) {
                let last = &after.history[after.history.len() - 1];
                prop_assert_eq!(before.balance + last.delta, after.balance);
            } else if !succeeded {
                prop_assert_eq!(before.balance, after.balance);
            }
        }
    }

    /// Property: persisting then loading yields a structurally identical store.
    #[test]
    fn prop_persist_load_round_trip(store in store_strategy()) {
        let dir = tempfile::tempdir().unwrap();
        let file = LedgerFile::new(dir.path().join("ledger.json"), CorruptionPolicy::FailFast);

        file.persist(&store).unwrap();

        prop_assert_eq!(file.load().unwrap(), store);
    }
}
