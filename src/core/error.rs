use thiserror::Error;

/// Failures reported by transaction control operations.
///
/// Both kinds are recoverable: the store is left exactly as it was before
/// the rejected call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionError {
    /// `begin` was called while a transaction is already open
    #[error("transaction already in progress")]
    TransactionConflict,

    /// `put` or `commit` was called with no open transaction
    #[error("no transaction in progress")]
    NoActiveTransaction,
}

pub type Result<T> = std::result::Result<T, TransactionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TransactionError::TransactionConflict.to_string(),
            "transaction already in progress"
        );
        assert_eq!(
            TransactionError::NoActiveTransaction.to_string(),
            "no transaction in progress"
        );
    }
}
