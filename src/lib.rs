// ============================================================================
// txkv Library
// ============================================================================
//
// In-memory key-value store with a single read/write transaction. Writes are
// staged until commit; reads fall through staging to committed state.
//
// ============================================================================

pub mod cli;
pub mod config;
pub mod core;
pub mod storage;
pub mod transaction;

// Re-export main types for convenience
pub use config::{ConfigError, ExclusionPolicy, StoreConfig, ValueMode};
pub use crate::core::{Result, TransactionError, Value};
pub use storage::{SharedStore, TransactionalStore, WriteTransaction};
pub use transaction::{RollbackOutcome, TransactionState};
