//! Attempt state and the events the engine reports back to its caller.

use crate::puzzle::{PuzzleDefinition, SolutionMove};
use crate::score::compute_score;
use std::collections::BTreeSet;

/// Where the attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    InProgress,
    /// The user played the whole line
    Solved,
    /// The line was shown; never counts as a solve
    SolutionRevealed,
}

/// Snapshot of one attempt session. Only `PuzzleEngine` mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineState {
    pub(super) puzzle: PuzzleDefinition,
    pub(super) position: String,
    pub(super) move_index: usize,
    pub(super) applied_notations: Vec<String>,
    pub(super) hints_used: usize,
    pub(super) status: AttemptStatus,
    pub(super) previously_solved: bool,
}

impl EngineState {
    /// Fresh attempt at `puzzle`. Puzzles listed in `solved_ids` stay playable.
    pub fn new(puzzle: PuzzleDefinition, solved_ids: &BTreeSet<String>) -> Self {
        let previously_solved = solved_ids.contains(&puzzle.id);
        Self {
            position: puzzle.start_position.clone(),
            puzzle,
            move_index: 0,
            applied_notations: Vec::new(),
            hints_used: 0,
            status: AttemptStatus::InProgress,
            previously_solved,
        }
    }

    pub fn puzzle(&self) -> &PuzzleDefinition {
        &self.puzzle
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    /// Number of solution moves applied so far.
    pub fn move_index(&self) -> usize {
        self.move_index
    }

    pub fn applied_notations(&self) -> &[String] {
        &self.applied_notations
    }

    pub fn hints_used(&self) -> usize {
        self.hints_used
    }

    pub fn status(&self) -> AttemptStatus {
        self.status
    }

    /// The puzzle id was already in the progress record when the attempt began.
    pub fn previously_solved(&self) -> bool {
        self.previously_solved
    }

    pub fn is_terminal(&self) -> bool {
        self.status != AttemptStatus::InProgress
    }

    /// The move the user must play next, if the attempt is still open.
    pub fn expected_move(&self) -> Option<&SolutionMove> {
        match self.status {
            AttemptStatus::InProgress => self.puzzle.solution.get(self.move_index),
            _ => None,
        }
    }

    pub fn revealed_hints(&self) -> &[String] {
        &self.puzzle.hints[..self.hints_used]
    }

    pub fn hints_remaining(&self) -> usize {
        self.puzzle.hints.len() - self.hints_used
    }

    pub fn total_moves(&self) -> usize {
        self.puzzle.solution.len()
    }

    /// Points for this attempt, recomputed on every call.
    pub fn score(&self) -> u32 {
        compute_score(
            self.hints_used as u32,
            self.status == AttemptStatus::SolutionRevealed,
        )
    }
}

/// Why a move attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The oracle refused the move
    Illegal,
    /// Legal, but not the solution move
    WrongMove,
    /// The attempt is already over
    Inactive,
}

/// Outcome of a single engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Advanced {
        notation: String,
    },
    Solved {
        notation: String,
        /// The solve was new and counted in the progress record
        recorded: bool,
    },
    Rejected(RejectReason),
    HintRevealed {
        index: usize,
    },
    SolutionRevealed,
    Restarted,
    /// Command was outside its precondition; nothing changed
    Ignored,
}

impl EngineEvent {
    /// Whether a move attempt was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, EngineEvent::Advanced { .. } | EngineEvent::Solved { .. })
    }

    /// Wrong and illegal moves trigger the short rejection feedback.
    pub fn raises_feedback(&self) -> bool {
        matches!(
            self,
            EngineEvent::Rejected(RejectReason::Illegal | RejectReason::WrongMove)
        )
    }
}
