//! Cross-session progress: the persisted record, its store, and derived levels.

pub mod levels;
pub mod store;
pub mod types;

pub use store::{JsonFileStore, MemoryStore, ProgressStore};
pub use types::ProgressRecord;
