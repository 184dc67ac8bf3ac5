//! Puzzle data: definitions handed to the engine and the dated catalog they come from.

pub mod catalog;
pub mod types;

pub use catalog::Catalog;
pub use types::*;
