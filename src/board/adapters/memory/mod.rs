//! In-memory adapters for tests and ephemeral use.

mod board_store;
mod key_value;

pub use board_store::InMemoryBoardStore;
pub use key_value::InMemoryKeyValueStore;
