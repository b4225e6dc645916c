use crate::core::TransactionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid integer value '{0}'")]
    InvalidValue(String),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

impl ReplError {
    /// Errors the session reports to the user and then keeps going after
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ReplError::Io(_))
    }
}
