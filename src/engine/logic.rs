//! Puzzle attempt engine: move validation, hints, solution reveal, restart.

use super::types::{AttemptStatus, EngineEvent, EngineState, RejectReason};
use crate::clock::Clock;
use crate::oracle::{replay_line, MoveOracle, MoveRequest};
use crate::progress::{ProgressRecord, ProgressStore};
use crate::puzzle::{Promotion, PuzzleDefinition, Square};
use tracing::{debug, error, info, warn};

/// Owns one attempt session. Commands take `&mut self`, so callers are
/// serialized by construction.
pub struct PuzzleEngine {
    state: EngineState,
    oracle: Box<dyn MoveOracle>,
    store: Box<dyn ProgressStore>,
    clock: Box<dyn Clock>,
    default_promotion: Promotion,
    /// Last loaded record with decay applied, for display
    progress: ProgressRecord,
}

impl PuzzleEngine {
    /// Load progress once and start a fresh attempt at `puzzle`.
    pub fn start(
        puzzle: PuzzleDefinition,
        oracle: Box<dyn MoveOracle>,
        store: Box<dyn ProgressStore>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let progress = store.load().decayed(clock.today());
        let state = EngineState::new(puzzle, &progress.solved_puzzle_ids);
        info!(
            target: "engine",
            puzzle = %state.puzzle.id,
            moves = state.total_moves(),
            previously_solved = state.previously_solved,
            "Attempt started"
        );
        Self {
            state,
            oracle,
            store,
            clock,
            default_promotion: Promotion::default(),
            progress,
        }
    }

    /// Piece used when a promotion is not spelled out by the solution or the caller.
    pub fn with_default_promotion(mut self, promotion: Promotion) -> Self {
        self.default_promotion = promotion;
        self
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn progress(&self) -> &ProgressRecord {
        &self.progress
    }

    pub fn oracle(&self) -> &dyn MoveOracle {
        self.oracle.as_ref()
    }

    pub fn default_promotion(&self) -> Promotion {
        self.default_promotion
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    /// Try the next solution move.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> EngineEvent {
        self.attempt(from, to, None)
    }

    /// Like `attempt_move`, with an explicit promotion piece. When the
    /// solution names a promotion piece, `promotion` must match it.
    pub fn attempt_move_with(
        &mut self,
        from: Square,
        to: Square,
        promotion: Promotion,
    ) -> EngineEvent {
        self.attempt(from, to, Some(promotion))
    }

    fn attempt(&mut self, from: Square, to: Square, chosen: Option<Promotion>) -> EngineEvent {
        let Some(expected) = self.state.expected_move().copied() else {
            debug!(target: "engine", status = ?self.state.status, "Move attempted on finished attempt");
            return EngineEvent::Rejected(RejectReason::Inactive);
        };

        let squares_match = expected.matches_squares(from, to);
        let promotion = chosen
            .or(if squares_match { expected.promotion } else { None })
            .unwrap_or(self.default_promotion);

        let request = MoveRequest {
            from,
            to,
            promotion,
        };
        let applied = match self.oracle.apply_move(&self.state.position, request) {
            Ok(applied) => applied,
            Err(rejection) => {
                debug!(target: "engine", %from, %to, %rejection, "Illegal move");
                return EngineEvent::Rejected(RejectReason::Illegal);
            }
        };

        let promotion_matches = match (chosen, expected.promotion) {
            (Some(chosen), Some(wanted)) => chosen == wanted,
            _ => true,
        };
        if !squares_match || !promotion_matches {
            // Legal but not the line: the oracle's position is discarded
            debug!(target: "engine", %from, %to, expected = %expected, "Wrong move");
            return EngineEvent::Rejected(RejectReason::WrongMove);
        }

        let notation = applied.notation;
        self.state.position = applied.position;
        self.state.applied_notations.push(notation.clone());
        self.state.move_index += 1;

        if self.state.move_index < self.state.total_moves() {
            debug!(target: "engine", %notation, index = self.state.move_index, "Solution move played");
            return EngineEvent::Advanced { notation };
        }

        self.state.status = AttemptStatus::Solved;
        let recorded = self.record_completion();
        info!(
            target: "engine",
            puzzle = %self.state.puzzle.id,
            hints = self.state.hints_used,
            score = self.state.score(),
            recorded,
            "Puzzle solved"
        );
        EngineEvent::Solved { notation, recorded }
    }

    /// Count the solve in the progress record unless this puzzle is already in it.
    fn record_completion(&mut self) -> bool {
        let today = self.clock.today();
        let mut record = self.store.load();
        let recorded = record.record_solve(&self.state.puzzle.id, today);

        if recorded {
            if let Err(e) = self.store.save(&record) {
                warn!(target: "engine", error = %e, "Failed to save progress, keeping solve in memory");
            }
        } else {
            debug!(target: "engine", puzzle = %self.state.puzzle.id, "Puzzle already recorded, stats unchanged");
        }

        self.progress = record.decayed(today);
        recorded
    }

    /// Reveal the next hint, in order.
    pub fn use_hint(&mut self) -> EngineEvent {
        if self.state.is_terminal() || self.state.hints_remaining() == 0 {
            return EngineEvent::Ignored;
        }
        self.state.hints_used += 1;
        debug!(target: "engine", used = self.state.hints_used, "Hint revealed");
        EngineEvent::HintRevealed {
            index: self.state.hints_used - 1,
        }
    }

    /// Replay the whole line from the start position and end the attempt.
    pub fn reveal_solution(&mut self) -> EngineEvent {
        if self.state.is_terminal() {
            return EngineEvent::Ignored;
        }

        let puzzle = &self.state.puzzle;
        let replay = match replay_line(
            self.oracle.as_ref(),
            &puzzle.start_position,
            &puzzle.solution,
            self.default_promotion,
        ) {
            Ok(replay) => replay,
            Err((index, rejection)) => {
                error!(
                    target: "engine",
                    puzzle = %puzzle.id,
                    index,
                    %rejection,
                    "Solution does not replay, leaving attempt unchanged"
                );
                return EngineEvent::Ignored;
            }
        };

        self.state.position = replay.position;
        self.state.applied_notations = replay.notations;
        self.state.move_index = self.state.total_moves();
        self.state.status = AttemptStatus::SolutionRevealed;
        info!(target: "engine", puzzle = %self.state.puzzle.id, "Solution revealed");
        EngineEvent::SolutionRevealed
    }

    /// Start over on the same puzzle. Progress is not touched.
    pub fn restart(&mut self) -> EngineEvent {
        let puzzle = self.state.puzzle.clone();
        self.state = EngineState::new(puzzle, &self.progress.solved_puzzle_ids);
        debug!(target: "engine", puzzle = %self.state.puzzle.id, "Attempt restarted");
        EngineEvent::Restarted
    }
}
