//! Interactive driver: reads action names, prompts for arguments and prints
//! results against an owned [`TransactionalStore`](crate::TransactionalStore).

pub mod action;
pub mod error;
pub mod repl;

pub use action::Action;
pub use error::ReplError;
pub use repl::Repl;
