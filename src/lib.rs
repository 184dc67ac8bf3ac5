//! Daily chess puzzle library.
//!
//! The attempt engine, puzzle catalog, progress store, and the terminal
//! front end built on top of them. The binary in `main.rs` only wires
//! these together.

pub mod app;
pub mod cli;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod oracle;
pub mod progress;
pub mod puzzle;
pub mod score;
pub mod telemetry;
pub mod ui;

pub use error::{Error, Result};
