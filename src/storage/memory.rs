use crate::config::StoreConfig;
use crate::core::{Result, TransactionError, Value};
use crate::transaction::{RollbackOutcome, TransactionState};
use log::debug;
use std::collections::HashMap;

/// Single-actor key-value store with one read/write transaction at a time.
///
/// Writes go to a staging overlay and only reach committed state on
/// [`commit`](Self::commit). Reads consult the overlay first while a
/// transaction is open, then committed state.
///
/// # Examples
///
/// ```
/// use txkv::{TransactionalStore, Value};
///
/// let mut store = TransactionalStore::new();
/// store.begin().unwrap();
/// store.put("a", 5).unwrap();
/// assert_eq!(store.get("a"), Some(&Value::Integer(5)));
/// store.commit().unwrap();
/// assert_eq!(store.get("a"), Some(&Value::Integer(5)));
/// ```
#[derive(Debug, Default)]
pub struct TransactionalStore {
    /// Visible to every reader; only `commit` writes here
    committed: HashMap<String, Value>,
    /// Writes of the open transaction; empty whenever the store is idle
    staging: HashMap<String, Value>,
    state: TransactionState,
}

impl TransactionalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &StoreConfig) -> Self {
        Self {
            committed: HashMap::with_capacity(config.initial_capacity),
            staging: HashMap::new(),
            state: TransactionState::Idle,
        }
    }

    /// Open a transaction.
    ///
    /// # Errors
    /// `TransactionConflict` if one is already open; the open transaction
    /// and its staged writes are left untouched.
    pub fn begin(&mut self) -> Result<()> {
        if self.state.is_active() {
            return Err(TransactionError::TransactionConflict);
        }

        self.staging.clear();
        self.state = TransactionState::InTransaction;
        debug!("transaction started");
        Ok(())
    }

    /// Stage `key -> value` in the open transaction. Last write wins.
    ///
    /// # Errors
    /// `NoActiveTransaction` if no transaction is open.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        if !self.state.is_active() {
            return Err(TransactionError::NoActiveTransaction);
        }

        self.staging.insert(key.into(), value.into());
        Ok(())
    }

    /// Look up `key`, preferring the open transaction's own writes.
    pub fn get(&self, key: &str) -> Option<&Value> {
        if self.state.is_active() {
            if let Some(value) = self.staging.get(key) {
                return Some(value);
            }
        }
        self.committed.get(key)
    }

    /// Merge staged writes into committed state and close the transaction.
    ///
    /// Returns the number of keys written.
    ///
    /// # Errors
    /// `NoActiveTransaction` if no transaction is open.
    pub fn commit(&mut self) -> Result<usize> {
        if !self.state.is_active() {
            return Err(TransactionError::NoActiveTransaction);
        }

        let written = self.staging.len();
        self.committed.extend(self.staging.drain());
        self.state = TransactionState::Idle;
        debug!("transaction committed, {} keys written", written);
        Ok(written)
    }

    /// Discard staged writes and close the transaction, if one is open.
    pub fn rollback(&mut self) -> RollbackOutcome {
        if !self.state.is_active() {
            debug!("rollback requested with no open transaction");
            return RollbackOutcome::NothingToRollBack;
        }

        let discarded = self.staging.len();
        self.staging.clear();
        self.state = TransactionState::Idle;
        debug!("transaction rolled back, {} staged writes discarded", discarded);
        RollbackOutcome::RolledBack { discarded }
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    pub fn in_transaction(&self) -> bool {
        self.state.is_active()
    }

    /// Number of committed keys
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }
}
