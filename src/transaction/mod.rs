// ============================================================================
// Transaction Module
// ============================================================================
//
// Lifecycle types shared by the single-actor store and the shared store.
//
// ============================================================================

pub mod state;

pub use state::{RollbackOutcome, TransactionState};
