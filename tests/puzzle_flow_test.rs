//! Integration test: puzzle attempt flow
//!
//! Catalog lookup -> engine session -> moves, hints, reveal, restart.

use chrono::NaiveDate;
use dailychess::clock::FixedClock;
use dailychess::engine::{AttemptStatus, EngineEvent, PuzzleEngine, RejectReason};
use dailychess::oracle::ChessOracle;
use dailychess::progress::{MemoryStore, ProgressStore};
use dailychess::puzzle::{Catalog, PuzzleDefinition, Square};
use std::sync::Arc;

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
}

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn session(puzzle: PuzzleDefinition, store: Arc<MemoryStore>) -> PuzzleEngine {
    PuzzleEngine::start(
        puzzle,
        Box::new(ChessOracle::new()),
        Box::new(store),
        Box::new(FixedClock(day(16))),
    )
}

fn opening_line() -> PuzzleDefinition {
    PuzzleDefinition::new(
        "opening",
        START,
        PuzzleDefinition::parse_solution(&["e2e4", "e7e5", "g1f3"]).unwrap(),
        vec!["Control the center".to_string()],
    )
    .unwrap()
}

#[test]
fn test_todays_puzzle_solved_in_one_move() {
    let catalog = Catalog::builtin();
    let puzzle = catalog.for_date(day(16)).unwrap().clone();
    assert_eq!(puzzle.id, "puzzle-2026-01-16");

    let store = Arc::new(MemoryStore::new());
    let mut engine = session(puzzle, store.clone());

    let event = engine.attempt_move(sq("h5"), sq("f7"));
    assert_eq!(
        event,
        EngineEvent::Solved {
            notation: "Qxf7#".to_string(),
            recorded: true
        }
    );
    assert_eq!(engine.score(), 100);

    let saved = store.snapshot().unwrap();
    assert_eq!(saved.streak, 1);
    assert_eq!(saved.total_solved, 1);
    assert_eq!(saved.last_solved_date, Some(day(16)));
    assert!(saved.has_solved("puzzle-2026-01-16"));
}

#[test]
fn test_multi_move_line_advances_then_solves() {
    let catalog = Catalog::builtin();
    let puzzle = catalog.by_id("puzzle-2026-01-15").unwrap().clone();
    let mut engine = session(puzzle, Arc::new(MemoryStore::new()));

    assert!(matches!(
        engine.attempt_move(sq("e5"), sq("f7")),
        EngineEvent::Advanced { .. }
    ));
    assert!(matches!(
        engine.attempt_move(sq("d8"), sq("e7")),
        EngineEvent::Advanced { .. }
    ));
    assert!(matches!(
        engine.attempt_move(sq("f7"), sq("h8")),
        EngineEvent::Solved { recorded: true, .. }
    ));
    assert_eq!(engine.state().applied_notations().len(), 3);
    assert_eq!(engine.state().status(), AttemptStatus::Solved);
}

#[test]
fn test_playing_the_line_matches_reveal() {
    let mut played = session(opening_line(), Arc::new(MemoryStore::new()));
    played.attempt_move(sq("e2"), sq("e4"));
    played.attempt_move(sq("e7"), sq("e5"));
    played.attempt_move(sq("g1"), sq("f3"));

    let mut revealed = session(opening_line(), Arc::new(MemoryStore::new()));
    assert_eq!(revealed.reveal_solution(), EngineEvent::SolutionRevealed);

    assert_eq!(played.state().applied_notations(), ["e4", "e5", "Nf3"]);
    assert_eq!(
        played.state().applied_notations(),
        revealed.state().applied_notations()
    );
    assert_eq!(played.state().position(), revealed.state().position());
    assert_eq!(revealed.score(), 0);
}

#[test]
fn test_rejections_leave_state_untouched() {
    let catalog = Catalog::builtin();
    let puzzle = catalog.by_id("puzzle-2026-01-16").unwrap().clone();
    let start = puzzle.start_position.clone();
    let mut engine = session(puzzle, Arc::new(MemoryStore::new()));

    // Legal but not the solution
    assert_eq!(
        engine.attempt_move(sq("c4"), sq("b5")),
        EngineEvent::Rejected(RejectReason::WrongMove)
    );
    // Blocked by the h7 pawn
    assert_eq!(
        engine.attempt_move(sq("h5"), sq("h8")),
        EngineEvent::Rejected(RejectReason::Illegal)
    );
    // Empty square
    assert_eq!(
        engine.attempt_move(sq("d4"), sq("d5")),
        EngineEvent::Rejected(RejectReason::Illegal)
    );

    assert_eq!(engine.state().position(), start);
    assert_eq!(engine.state().move_index(), 0);
    assert!(engine.state().applied_notations().is_empty());
    assert_eq!(engine.state().status(), AttemptStatus::InProgress);
}

#[test]
fn test_hints_reduce_score() {
    let catalog = Catalog::builtin();
    let puzzle = catalog.by_id("puzzle-2026-01-16").unwrap().clone();
    let mut engine = session(puzzle, Arc::new(MemoryStore::new()));

    assert_eq!(engine.use_hint(), EngineEvent::HintRevealed { index: 0 });
    assert_eq!(engine.use_hint(), EngineEvent::HintRevealed { index: 1 });
    assert_eq!(engine.state().revealed_hints().len(), 2);

    engine.attempt_move(sq("h5"), sq("f7"));
    assert_eq!(engine.score(), 70);
}

#[test]
fn test_all_hints_then_solve_keeps_floor() {
    let catalog = Catalog::builtin();
    let puzzle = catalog.by_id("puzzle-2026-01-16").unwrap().clone();
    let mut engine = session(puzzle, Arc::new(MemoryStore::new()));

    while engine.use_hint() != EngineEvent::Ignored {}
    assert_eq!(engine.state().hints_used(), 3);

    engine.attempt_move(sq("h5"), sq("f7"));
    assert_eq!(engine.score(), 55);
}

#[test]
fn test_restart_after_solve_does_not_double_count() {
    let catalog = Catalog::builtin();
    let puzzle = catalog.by_id("puzzle-2026-01-16").unwrap().clone();
    let store = Arc::new(MemoryStore::new());
    let mut engine = session(puzzle, store.clone());

    engine.attempt_move(sq("h5"), sq("f7"));
    assert_eq!(engine.restart(), EngineEvent::Restarted);
    assert!(engine.state().previously_solved());
    assert_eq!(engine.state().status(), AttemptStatus::InProgress);

    assert_eq!(
        engine.attempt_move(sq("h5"), sq("f7")),
        EngineEvent::Solved {
            notation: "Qxf7#".to_string(),
            recorded: false
        }
    );
    assert_eq!(store.load().total_solved, 1);
    assert_eq!(store.save_count(), 1);
}

#[test]
fn test_second_session_sees_previous_solve() {
    let catalog = Catalog::builtin();
    let puzzle = catalog.by_id("puzzle-2026-01-14").unwrap().clone();
    let store = Arc::new(MemoryStore::new());

    let mut first = session(puzzle.clone(), store.clone());
    assert!(!first.state().previously_solved());
    first.attempt_move(sq("d8"), sq("h4"));

    let mut second = session(puzzle, store.clone());
    assert!(second.state().previously_solved());
    assert!(matches!(
        second.attempt_move(sq("d8"), sq("h4")),
        EngineEvent::Solved {
            recorded: false,
            ..
        }
    ));
    assert_eq!(store.load().total_solved, 1);
    assert_eq!(store.load().streak, 1);
}

#[test]
fn test_commands_after_reveal_are_inert() {
    let mut engine = session(opening_line(), Arc::new(MemoryStore::new()));
    engine.reveal_solution();

    assert_eq!(engine.use_hint(), EngineEvent::Ignored);
    assert_eq!(engine.reveal_solution(), EngineEvent::Ignored);
    assert_eq!(
        engine.attempt_move(sq("e2"), sq("e4")),
        EngineEvent::Rejected(RejectReason::Inactive)
    );
    assert_eq!(engine.state().status(), AttemptStatus::SolutionRevealed);
}

#[test]
fn test_legal_off_line_reply_is_wrong_move() {
    let mut engine = session(opening_line(), Arc::new(MemoryStore::new()));
    assert_eq!(
        engine.attempt_move(sq("e2"), sq("e4")),
        EngineEvent::Advanced {
            notation: "e4".to_string()
        }
    );
    let position = engine.state().position().to_string();

    assert_eq!(
        engine.attempt_move(sq("d7"), sq("d5")),
        EngineEvent::Rejected(RejectReason::WrongMove)
    );
    assert_eq!(engine.state().position(), position);
    assert_eq!(engine.state().move_index(), 1);
    assert_eq!(engine.state().applied_notations(), ["e4"]);

    // The correct reply still works afterwards
    assert!(matches!(
        engine.attempt_move(sq("e7"), sq("e5")),
        EngineEvent::Advanced { .. }
    ));
}
