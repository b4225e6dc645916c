pub mod error;
pub mod value;

pub use error::{Result, TransactionError};
pub use value::Value;
