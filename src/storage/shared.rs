// ============================================================================
// Shared Store
// ============================================================================
//
// Concurrent form of the transactional store. Committed state sits behind a
// Copy-on-Write `Arc<HashMap>` so that a reader either sees the map from
// before a commit or the one after it, never a partial merge. A single
// writer mutex enforces one open transaction process-wide.
//
// ============================================================================

use crate::config::{ExclusionPolicy, StoreConfig};
use crate::core::{Result, TransactionError, Value};
use crate::transaction::RollbackOutcome;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::{Level, debug, event};

pub struct SharedStore {
    committed: RwLock<Arc<HashMap<String, Value>>>,
    /// Held by the open `WriteTransaction` for its whole lifetime
    writer: Mutex<()>,
    /// Mirrors whether `writer` is held, so observers never touch the mutex
    active: AtomicBool,
    policy: ExclusionPolicy,
    /// Number of commits applied so far
    version: AtomicU64,
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedStore {
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::default())
    }

    pub fn with_config(config: &StoreConfig) -> Self {
        Self {
            committed: RwLock::new(Arc::new(HashMap::with_capacity(config.initial_capacity))),
            writer: Mutex::new(()),
            active: AtomicBool::new(false),
            policy: config.exclusion,
            version: AtomicU64::new(0),
        }
    }

    pub fn policy(&self) -> ExclusionPolicy {
        self.policy
    }

    /// Open the store's write transaction.
    ///
    /// Under `ExclusionPolicy::FailFast` this fails immediately with
    /// `TransactionConflict` while another transaction is open; under
    /// `ExclusionPolicy::Serialize` it waits for that transaction to end.
    pub async fn begin(&self) -> Result<WriteTransaction<'_>> {
        let guard = match self.policy {
            ExclusionPolicy::FailFast => self
                .writer
                .try_lock()
                .map_err(|_| TransactionError::TransactionConflict)?,
            ExclusionPolicy::Serialize => self.writer.lock().await,
        };
        self.active.store(true, Ordering::SeqCst);

        debug!(policy = ?self.policy, "transaction started");
        Ok(WriteTransaction {
            store: self,
            staging: HashMap::new(),
            finished: false,
            _writer: guard,
        })
    }

    /// Read the committed value for `key`.
    pub async fn get(&self, key: &str) -> Option<Value> {
        self.committed.read().await.get(key).cloned()
    }

    /// Read several keys from one committed snapshot.
    pub async fn get_many<K: AsRef<str>>(&self, keys: &[K]) -> Vec<Option<Value>> {
        let snapshot = Arc::clone(&*self.committed.read().await);
        keys.iter()
            .map(|key| snapshot.get(key.as_ref()).cloned())
            .collect()
    }

    /// Check whether a write transaction is currently open
    pub fn is_locked(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Number of committed keys
    pub async fn len(&self) -> usize {
        self.committed.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.committed.read().await.is_empty()
    }
}

/// The open write transaction of a [`SharedStore`].
///
/// Holding the handle is what "a transaction is in progress" means; puts and
/// commits are only reachable through it. Dropping it without committing
/// discards the staged writes.
pub struct WriteTransaction<'a> {
    store: &'a SharedStore,
    staging: HashMap<String, Value>,
    finished: bool,
    _writer: MutexGuard<'a, ()>,
}

impl WriteTransaction<'_> {
    /// Stage `key -> value`. Last write wins.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.staging.insert(key.into(), value.into());
    }

    /// Read `key`, preferring this transaction's own writes.
    pub async fn get(&self, key: &str) -> Option<Value> {
        match self.staging.get(key) {
            Some(value) => Some(value.clone()),
            None => self.store.get(key).await,
        }
    }

    /// Number of distinct keys staged so far
    pub fn staged_len(&self) -> usize {
        self.staging.len()
    }

    /// Publish staged writes to committed state and end the transaction.
    ///
    /// Returns the number of keys written.
    pub async fn commit(mut self) -> usize {
        let staged = std::mem::take(&mut self.staging);
        let written = staged.len();

        let version = {
            let mut committed = self.store.committed.write().await;
            // Clones only if a reader still holds the previous snapshot
            Arc::make_mut(&mut *committed).extend(staged);
            self.store.version.fetch_add(1, Ordering::SeqCst) + 1
        };

        self.finished = true;
        event!(Level::DEBUG, written, version, "transaction committed");
        written
    }

    /// Discard staged writes and end the transaction.
    pub fn rollback(mut self) -> RollbackOutcome {
        let discarded = self.staging.len();
        self.staging.clear();
        self.finished = true;
        debug!(discarded, "transaction rolled back");
        RollbackOutcome::RolledBack { discarded }
    }
}

impl Drop for WriteTransaction<'_> {
    fn drop(&mut self) {
        // Runs before `_writer` is released
        self.store.active.store(false, Ordering::SeqCst);
        if !self.finished {
            debug!(
                discarded = self.staging.len(),
                "transaction dropped without commit, staged writes discarded"
            );
        }
    }
}
