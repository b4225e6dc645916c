/// Property tests over arbitrary keys and values
///
/// Run with: cargo test --test property_tests

use proptest::prelude::*;
use txkv::{RollbackOutcome, TransactionalStore, Value};

fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9_]{0,16}").expect("Invalid regex")
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        prop::string::string_regex("[ -~]{0,24}")
            .expect("Invalid regex")
            .prop_map(Value::Text),
    ]
}

/// A batch of writes, possibly touching the same key more than once
fn writes_strategy() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec((key_strategy(), value_strategy()), 0..32)
}

proptest! {
    #[test]
    fn staged_write_is_readable_before_commit(k in key_strategy(), v in value_strategy()) {
        let mut store = TransactionalStore::new();
        store.begin().unwrap();
        store.put(k.clone(), v.clone()).unwrap();
        prop_assert_eq!(store.get(&k), Some(&v));
    }

    #[test]
    fn rollback_discards_write(k in key_strategy(), v in value_strategy()) {
        let mut store = TransactionalStore::new();
        store.begin().unwrap();
        store.put(k.clone(), v).unwrap();
        prop_assert_eq!(store.rollback(), RollbackOutcome::RolledBack { discarded: 1 });
        prop_assert_eq!(store.get(&k), None);
    }

    #[test]
    fn commit_makes_write_durable(k in key_strategy(), v in value_strategy()) {
        let mut store = TransactionalStore::new();
        store.begin().unwrap();
        store.put(k.clone(), v.clone()).unwrap();
        store.commit().unwrap();
        prop_assert_eq!(store.get(&k), Some(&v));

        prop_assert_eq!(store.rollback(), RollbackOutcome::NothingToRollBack);
        prop_assert_eq!(store.get(&k), Some(&v));
    }

    #[test]
    fn put_while_idle_never_changes_state(
        committed in writes_strategy(),
        k in key_strategy(),
        v in value_strategy(),
    ) {
        let mut store = TransactionalStore::new();
        store.begin().unwrap();
        for (key, value) in &committed {
            store.put(key.as_str(), value.clone()).unwrap();
        }
        store.commit().unwrap();

        let before = store.get(&k).cloned();
        let len_before = store.len();
        prop_assert!(store.put(k.clone(), v).is_err());
        prop_assert_eq!(store.get(&k).cloned(), before);
        prop_assert_eq!(store.len(), len_before);
    }

    #[test]
    fn commit_matches_last_write_per_key(first in writes_strategy(), second in writes_strategy()) {
        let mut store = TransactionalStore::new();
        let mut expected = std::collections::HashMap::new();

        for batch in [&first, &second] {
            store.begin().unwrap();
            for (key, value) in batch {
                store.put(key.as_str(), value.clone()).unwrap();
                expected.insert(key.clone(), value.clone());
            }
            store.commit().unwrap();
        }

        prop_assert_eq!(store.len(), expected.len());
        for (key, value) in &expected {
            prop_assert_eq!(store.get(key), Some(value));
        }
    }

    #[test]
    fn rolled_back_batch_leaves_committed_state(base in writes_strategy(), discarded in writes_strategy()) {
        let mut store = TransactionalStore::new();
        store.begin().unwrap();
        for (key, value) in &base {
            store.put(key.as_str(), value.clone()).unwrap();
        }
        store.commit().unwrap();

        let snapshot: Vec<_> = discarded.iter().map(|(k, _)| store.get(k).cloned()).collect();

        store.begin().unwrap();
        for (key, value) in &discarded {
            store.put(key.as_str(), value.clone()).unwrap();
        }
        store.rollback();

        let after: Vec<_> = discarded.iter().map(|(k, _)| store.get(k).cloned()).collect();
        prop_assert_eq!(snapshot, after);
    }
}
