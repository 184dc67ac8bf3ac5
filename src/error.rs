//! Crate-wide error type for the edges (config, catalog, store, CLI).
//!
//! The puzzle engine itself never returns these: wrong moves and premature
//! commands are reported as [`crate::engine::EngineEvent`] values instead.

use derive_more::{Display, Error, From};

#[derive(Debug, Display, Error, From)]
pub enum Error {
    #[display("I/O error: {source}")]
    Io { source: std::io::Error },

    #[display("JSON error: {source}")]
    Json { source: serde_json::Error },

    #[display("TOML error: {source}")]
    Toml { source: toml::de::Error },

    #[display("invalid square '{square}'")]
    #[from(skip)]
    InvalidSquare { square: String },

    #[display("invalid solution move '{text}'")]
    #[from(skip)]
    InvalidMove { text: String },

    #[display("invalid position '{position}'")]
    #[from(skip)]
    InvalidPosition { position: String },

    #[display("puzzle '{id}' has no solution moves")]
    #[from(skip)]
    EmptySolution { id: String },

    #[display("no puzzle matches '{key}'")]
    #[from(skip)]
    PuzzleNotFound { key: String },

    #[display("could not determine home directory")]
    #[from(skip)]
    NoHomeDir,
}

pub type Result<T> = std::result::Result<T, Error>;
