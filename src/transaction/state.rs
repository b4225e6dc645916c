// ============================================================================
// Transaction State
// ============================================================================
//
// A store is always in one of two states:
//
//   Idle ──begin──> InTransaction
//     ^                  │
//     └─commit/rollback──┘
//
// Rollback while Idle is a reported no-op, not a transition.
//
// ============================================================================

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionState {
    /// No transaction is open; writes are rejected
    #[default]
    Idle,

    /// A transaction is open and accepting writes into staging
    InTransaction,
}

impl TransactionState {
    /// Check if a transaction is currently open
    pub fn is_active(&self) -> bool {
        matches!(self, TransactionState::InTransaction)
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionState::Idle => write!(f, "IDLE"),
            TransactionState::InTransaction => write!(f, "IN TRANSACTION"),
        }
    }
}

/// What a rollback actually did.
///
/// Rolling back with nothing open is not an error, so callers get an
/// outcome to act on instead of a `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackOutcome {
    /// An open transaction was discarded along with its staged writes
    RolledBack { discarded: usize },

    /// There was no open transaction
    NothingToRollBack,
}

impl RollbackOutcome {
    pub fn is_rolled_back(&self) -> bool {
        matches!(self, RollbackOutcome::RolledBack { .. })
    }
}

impl fmt::Display for RollbackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollbackOutcome::RolledBack { .. } => write!(f, "Transaction rolled back."),
            RollbackOutcome::NothingToRollBack => write!(f, "No transaction to roll back."),
        }
    }
}
