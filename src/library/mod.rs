pub mod firestore;
mod filter;
mod memory;
mod store;

pub use filter::GameFilter;
pub use memory::MemoryGameStore;
pub use store::{validate_id, GameStore};
