//! Terminal session state: cursor, selection, and feedback around the engine.
//!
//! Nothing here knows chess rules or puzzle logic; moves go through
//! `PuzzleEngine` and piece queries through its oracle.

use crate::engine::{EngineEvent, FeedbackTimer, PuzzleEngine};
use crate::oracle::Side;
use crate::puzzle::Square;
use std::time::Instant;

/// Input actions (UI-agnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleInput {
    Up,
    Down,
    Left,
    Right,
    Select,
    Cancel,
    Hint,
    Reveal,
    Restart,
    Quit,
    Other,
}

pub struct App {
    pub engine: PuzzleEngine,
    /// Cursor as (file, rank), both 0-7
    pub cursor: (u8, u8),
    pub selected: Option<Square>,
    pub legal_destinations: Vec<Square>,
    pub feedback: FeedbackTimer,
    pub last_move: Option<(Square, Square)>,
    pub last_event: Option<EngineEvent>,
    /// Board drawn from Black's side
    pub flipped: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(engine: PuzzleEngine, feedback: FeedbackTimer) -> Self {
        let start = engine.state().puzzle().start_position.clone();
        let flipped = engine.oracle().side_to_move(&start) == Some(Side::Black);
        Self {
            engine,
            cursor: if flipped { (4, 4) } else { (4, 3) },
            selected: None,
            legal_destinations: Vec::new(),
            feedback,
            last_move: None,
            last_event: None,
            flipped,
            should_quit: false,
        }
    }

    pub fn cursor_square(&self) -> Option<Square> {
        Square::new(self.cursor.0, self.cursor.1)
    }

    /// Move the cursor in screen directions; ranks invert when the board is flipped.
    pub fn move_cursor(&mut self, dx: i8, dy: i8) {
        let (dx, dy) = if self.flipped { (-dx, -dy) } else { (dx, dy) };
        let new_x = (self.cursor.0 as i8 + dx).clamp(0, 7) as u8;
        let new_y = (self.cursor.1 as i8 + dy).clamp(0, 7) as u8;
        self.cursor = (new_x, new_y);
    }

    /// Process one input. Returns false when the input was ignored.
    pub fn process_input(&mut self, input: PuzzleInput, now: Instant) -> bool {
        match input {
            PuzzleInput::Up => self.move_cursor(0, 1),
            PuzzleInput::Down => self.move_cursor(0, -1),
            PuzzleInput::Left => self.move_cursor(-1, 0),
            PuzzleInput::Right => self.move_cursor(1, 0),
            PuzzleInput::Select => self.process_select(now),
            PuzzleInput::Cancel => {
                if self.selected.is_some() {
                    self.clear_selection();
                } else {
                    self.should_quit = true;
                }
            }
            PuzzleInput::Hint => {
                let event = self.engine.use_hint();
                self.record(event, now);
            }
            PuzzleInput::Reveal => {
                let event = self.engine.reveal_solution();
                if event == EngineEvent::SolutionRevealed {
                    self.clear_selection();
                    self.last_move = None;
                }
                self.record(event, now);
            }
            PuzzleInput::Restart => {
                let event = self.engine.restart();
                self.clear_selection();
                self.last_move = None;
                self.record(event, now);
            }
            PuzzleInput::Quit => self.should_quit = true,
            PuzzleInput::Other => return false,
        }
        true
    }

    /// Expire the rejection feedback.
    pub fn tick(&mut self, now: Instant) {
        self.feedback.poll(now);
    }

    fn record(&mut self, event: EngineEvent, now: Instant) {
        self.feedback.observe(&event, now);
        self.last_event = Some(event);
    }

    fn process_select(&mut self, now: Instant) {
        let Some(cursor) = self.cursor_square() else {
            return;
        };
        match self.selected {
            Some(from) if self.legal_destinations.contains(&cursor) => {
                let event = self.engine.attempt_move(from, cursor);
                if event.is_accepted() {
                    self.last_move = Some((from, cursor));
                }
                self.clear_selection();
                self.record(event, now);
            }
            Some(from) if from != cursor && self.cursor_on_mover_piece(cursor) => {
                self.select(cursor);
            }
            Some(from) if from != cursor => {
                // Not a legal destination: let the engine reject it
                let event = self.engine.attempt_move(from, cursor);
                self.clear_selection();
                self.record(event, now);
            }
            Some(_) => self.clear_selection(),
            None => self.select(cursor),
        }
    }

    fn cursor_on_mover_piece(&self, square: Square) -> bool {
        let state = self.engine.state();
        let oracle = self.engine.oracle();
        match (
            oracle.piece_at(state.position(), square),
            oracle.side_to_move(state.position()),
        ) {
            (Some(piece), Some(side)) => piece.side == side,
            _ => false,
        }
    }

    fn select(&mut self, square: Square) {
        if self.engine.state().is_terminal() || !self.cursor_on_mover_piece(square) {
            return;
        }
        self.selected = Some(square);
        self.legal_destinations = self
            .engine
            .oracle()
            .legal_destinations(self.engine.state().position(), square);
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.legal_destinations.clear();
    }
}
