//! Puzzle attempt engine: the state machine behind a single daily puzzle.

pub mod feedback;
pub mod logic;
pub mod types;

pub use feedback::FeedbackTimer;
pub use logic::PuzzleEngine;
pub use types::*;
