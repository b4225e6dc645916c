pub mod memory;
pub mod shared;

pub use memory::TransactionalStore;
pub use shared::{SharedStore, WriteTransaction};
