//! Daily puzzle board rendering.

use crate::app::App;
use crate::engine::{AttemptStatus, EngineEvent, RejectReason};
use crate::oracle::{BoardPiece, PieceKind, Side};
use crate::progress::levels::{current_level, next_badge, next_level};
use crate::puzzle::Square;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const PANEL_WIDTH: u16 = 30;
const BOARD_HEIGHT: u16 = 18;

/// Regions of the puzzle screen, inside the outer border.
struct SceneAreas {
    title: Rect,
    board: Rect,
    status: Rect,
    panel: Rect,
}

/// Draw the outer frame (red while a rejection is showing) and carve it up:
/// title, board and two status rows on the left, progress panel on the right.
fn scene_areas(frame: &mut Frame, area: Rect, app: &App) -> SceneAreas {
    frame.render_widget(Clear, area);

    let border = if app.feedback.is_active() {
        Color::Red
    } else {
        Color::LightGreen
    };
    let outer = Block::default()
        .title(" Daily Chess Puzzle ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(PANEL_WIDTH)])
        .split(inner);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(BOARD_HEIGHT),
            Constraint::Length(2),
        ])
        .split(columns[0]);

    SceneAreas {
        title: rows[0],
        board: rows[1],
        status: rows[2],
        panel: columns[1],
    }
}

/// Render the whole puzzle screen.
pub fn render_puzzle_scene(frame: &mut Frame, area: Rect, app: &App) {
    let areas = scene_areas(frame, area, app);

    render_puzzle_title(frame, areas.title, app);
    render_board(frame, areas.board, app);
    render_status(frame, areas.status, app);
    render_info_panel(frame, areas.panel, app);
    render_outcome(frame, areas.board, app);
}

/// Result strip over the bottom of the board once the attempt is over.
fn render_outcome(frame: &mut Frame, board: Rect, app: &App) {
    let (color, title, score_line, detail) = match app.engine.state().status() {
        AttemptStatus::Solved => (
            Color::Green,
            "SOLVED!",
            format!("Score: {}", app.engine.score()),
            solved_detail(app),
        ),
        AttemptStatus::SolutionRevealed => (
            Color::Yellow,
            "SOLUTION REVEALED",
            "Score: 0".to_string(),
            app.engine.state().applied_notations().join(" "),
        ),
        AttemptStatus::InProgress => return,
    };

    let mut lines = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(score_line, Style::default().fg(Color::White))),
    ];
    if !detail.is_empty() {
        lines.push(Line::from(Span::styled(
            detail,
            Style::default().fg(Color::Cyan),
        )));
    }

    let height = (lines.len() as u16 + 1).min(board.height);
    let strip = Rect {
        y: board.y + board.height.saturating_sub(height),
        height,
        ..board
    };
    frame.render_widget(Clear, strip);
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(color));
    let text = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(text, strip);
}

fn solved_detail(app: &App) -> String {
    match &app.last_event {
        Some(EngineEvent::Solved { recorded: true, .. }) => {
            format!("Streak: {}", app.engine.progress().streak)
        }
        _ if app.engine.state().previously_solved() => "Already solved, not counted".to_string(),
        _ => String::new(),
    }
}

fn render_puzzle_title(frame: &mut Frame, area: Rect, app: &App) {
    let puzzle = app.engine.state().puzzle();
    let mut spans = vec![Span::styled(
        format!("\"{}\"", puzzle.description),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    )];
    if app.engine.state().previously_solved() {
        spans.push(Span::styled(
            "  \u{2713} solved",
            Style::default().fg(Color::Green),
        ));
    }
    let text = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(text, area);
}

/// Rank/file order from top-left, honoring board orientation.
fn board_order(flipped: bool) -> ([u8; 8], [u8; 8]) {
    let ascending = [0, 1, 2, 3, 4, 5, 6, 7];
    let descending = [7, 6, 5, 4, 3, 2, 1, 0];
    if flipped {
        (ascending, descending)
    } else {
        (descending, ascending)
    }
}

fn grid_line(left: char, mid: char, right: char) -> String {
    let mut line = String::from("  ");
    line.push(left);
    for i in 0..8 {
        line.push_str("\u{2500}\u{2500}\u{2500}\u{2500}");
        if i < 7 {
            line.push(mid);
        }
    }
    line.push(right);
    line
}

fn render_board(frame: &mut Frame, area: Rect, app: &App) {
    let cell_width: u16 = 5;
    let board_width: u16 = 3 + (cell_width * 8) + 1;

    // Nudge the board sideways while the wrong-move feedback is showing
    let shake: u16 = if app.feedback.is_active() { 1 } else { 0 };
    let x_offset = area.x + (area.width.saturating_sub(board_width)) / 2 + shake;
    let y_offset = area.y + (area.height.saturating_sub(BOARD_HEIGHT)) / 2;

    let border_color = if app.feedback.is_active() {
        Color::Rgb(160, 60, 60)
    } else {
        Color::Rgb(80, 80, 80)
    };
    let from_move_color = Color::Rgb(180, 140, 80);
    let to_move_color = Color::Rgb(255, 255, 100);

    let state = app.engine.state();
    let oracle = app.engine.oracle();
    let (ranks, files) = board_order(app.flipped);

    let top = Paragraph::new(grid_line('\u{250C}', '\u{252C}', '\u{2510}'))
        .style(Style::default().fg(border_color));
    frame.render_widget(top, Rect::new(x_offset, y_offset, board_width, 1));

    for (row_index, &rank) in ranks.iter().enumerate() {
        let y = y_offset + 1 + (row_index as u16 * 2);

        let label = Paragraph::new(format!("{} ", rank + 1))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(label, Rect::new(x_offset, y, 2, 1));

        let left_border = Paragraph::new("\u{2502}").style(Style::default().fg(border_color));
        frame.render_widget(left_border, Rect::new(x_offset + 2, y, 1, 1));

        for (col_index, &file) in files.iter().enumerate() {
            let x = x_offset + 3 + (col_index as u16 * cell_width);
            let Some(square) = Square::new(file, rank) else {
                continue;
            };

            let is_cursor = app.cursor == (file, rank);
            let is_selected = app.selected == Some(square);
            let is_legal_destination = app.legal_destinations.contains(&square);
            let highlight = app.last_move.and_then(|(from, to)| {
                if square == from {
                    Some(from_move_color)
                } else if square == to {
                    Some(to_move_color)
                } else {
                    None
                }
            });

            let piece = oracle.piece_at(state.position(), square);
            let glyph = piece.map(piece_glyph);

            let (content, fg_color) = if is_cursor {
                let color = highlight.unwrap_or_else(|| {
                    piece.map(piece_color).unwrap_or(Color::Rgb(100, 100, 100))
                });
                match glyph {
                    Some(c) => (format!("[{}]", c), color),
                    None if is_legal_destination => {
                        (" \u{25C6}  ".to_string(), Color::Rgb(200, 100, 200))
                    }
                    None => (" \u{25A1}  ".to_string(), color),
                }
            } else if is_selected {
                match glyph {
                    Some(c) => (format!("<{}>", c), Color::Rgb(100, 200, 100)),
                    None => ("    ".to_string(), Color::Reset),
                }
            } else if is_legal_destination {
                match (glyph, piece) {
                    (Some(c), Some(p)) => (format!(" {}  ", c), piece_color(p)),
                    _ => (" \u{00B7}  ".to_string(), Color::Rgb(200, 100, 200)),
                }
            } else if let Some(color) = highlight {
                match glyph {
                    Some(c) => (format!(" {}  ", c), color),
                    None if color == from_move_color => (" \u{00B7}  ".to_string(), color),
                    None => ("    ".to_string(), Color::Reset),
                }
            } else {
                match (glyph, piece) {
                    (Some(c), Some(p)) => (format!(" {}  ", c), piece_color(p)),
                    _ => ("    ".to_string(), Color::Reset),
                }
            };

            let cell = Paragraph::new(content).style(Style::default().fg(fg_color));
            frame.render_widget(cell, Rect::new(x, y, 4, 1));

            let sep = Paragraph::new("\u{2502}").style(Style::default().fg(border_color));
            frame.render_widget(sep, Rect::new(x + 4, y, 1, 1));
        }

        if row_index < 7 {
            let sep = Paragraph::new(grid_line('\u{251C}', '\u{253C}', '\u{2524}'))
                .style(Style::default().fg(border_color));
            frame.render_widget(sep, Rect::new(x_offset, y + 1, board_width, 1));
        }
    }

    let bottom = Paragraph::new(grid_line('\u{2514}', '\u{2534}', '\u{2518}'))
        .style(Style::default().fg(border_color));
    frame.render_widget(bottom, Rect::new(x_offset, y_offset + 16, board_width, 1));

    let file_labels: String = files
        .iter()
        .map(|&f| format!("    {}", (b'A' + f) as char))
        .collect();
    let labels = Paragraph::new(file_labels).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(labels, Rect::new(x_offset, y_offset + 17, board_width, 1));
}

/// Status line text and color for the current attempt.
pub fn status_message(app: &App) -> (&'static str, Color) {
    if app.feedback.is_active() {
        return match app.last_event {
            Some(EngineEvent::Rejected(RejectReason::Illegal)) => ("Illegal move", Color::Red),
            _ => ("Wrong move", Color::Red),
        };
    }
    match app.engine.state().status() {
        AttemptStatus::Solved => ("Correct!", Color::Green),
        AttemptStatus::SolutionRevealed => ("Solution shown", Color::Yellow),
        AttemptStatus::InProgress if app.selected.is_some() => ("Select destination", Color::Cyan),
        AttemptStatus::InProgress => ("Find the best move", Color::White),
    }
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let (status_text, status_color) = status_message(app);

    let controls: &[(&str, &str)] = if app.engine.state().is_terminal() {
        &[("[R]", "Restart"), ("[Q]", "Quit")]
    } else if app.selected.is_some() {
        &[
            ("[Arrows]", "Move"),
            ("[Enter]", "Confirm"),
            ("[Esc]", "Cancel"),
        ]
    } else {
        &[
            ("[Arrows]", "Move"),
            ("[Enter]", "Select"),
            ("[H]", "Hint"),
            ("[S]", "Solution"),
            ("[R]", "Restart"),
            ("[Q]", "Quit"),
        ]
    };

    let mut keys = Vec::new();
    for (key, action) in controls {
        if !keys.is_empty() {
            keys.push(Span::raw("  "));
        }
        keys.push(Span::styled(*key, Style::default().fg(Color::White)));
        keys.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let lines = vec![
        Line::from(Span::styled(status_text, Style::default().fg(status_color))),
        Line::from(keys),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn labeled(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn render_info_panel(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Progress ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let state = app.engine.state();
    let puzzle = state.puzzle();
    let progress = app.engine.progress();

    let mut lines = vec![heading("PUZZLE")];
    if let (Some(white), Some(black)) = (&puzzle.white, &puzzle.black) {
        lines.push(Line::from(Span::styled(
            format!("{} vs {}", white, black),
            Style::default().fg(Color::White),
        )));
    }
    if let Some(event) = &puzzle.event {
        lines.push(Line::from(Span::styled(
            event.clone(),
            Style::default().fg(Color::Gray),
        )));
    }
    if let Some(date) = puzzle.date {
        lines.push(labeled("Date", date.to_string(), Color::Gray));
    }
    lines.push(labeled(
        "Move",
        format!("{}/{}", state.move_index(), state.total_moves()),
        Color::White,
    ));

    if !state.applied_notations().is_empty() {
        lines.push(Line::from(""));
        lines.push(heading("MOVES"));
        lines.push(Line::from(Span::styled(
            state.applied_notations().join(" "),
            Style::default().fg(Color::White),
        )));
    }

    lines.push(Line::from(""));
    lines.push(heading("HINTS"));
    for (i, hint) in state.revealed_hints().iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!("{}. {}", i + 1, hint),
            Style::default().fg(Color::Cyan),
        )));
    }
    lines.push(labeled(
        "Remaining",
        state.hints_remaining().to_string(),
        Color::Gray,
    ));

    if state.is_terminal() {
        lines.push(labeled("Score", app.engine.score().to_string(), Color::Green));
    }

    lines.push(Line::from(""));
    lines.push(heading("STATS"));
    lines.push(labeled(
        "Streak",
        format!("{} \u{1F525}", progress.streak),
        Color::LightRed,
    ));
    lines.push(labeled("Solved", progress.total_solved.to_string(), Color::White));

    let level = current_level(progress.total_solved);
    lines.push(labeled(
        "Level",
        format!("{} {}", level.icon, level.name),
        Color::LightGreen,
    ));
    if let Some(next) = next_level(progress.total_solved) {
        lines.push(labeled(
            "Next",
            format!("{} at {}", next.name, next.min_total),
            Color::DarkGray,
        ));
    }
    if let Some(badge) = next_badge(progress) {
        lines.push(labeled(
            "Badge",
            format!(
                "{} {} {}/{}",
                badge.id.icon(),
                badge.id.name(),
                badge.progress,
                badge.target
            ),
            Color::Gray,
        ));
    }

    let text = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(text, inner);
}

fn piece_color(piece: BoardPiece) -> Color {
    match piece.side {
        Side::White => Color::White,
        Side::Black => Color::Rgb(140, 140, 140),
    }
}

/// Filled glyphs for White, outlined for Black.
pub fn piece_glyph(piece: BoardPiece) -> char {
    match (piece.side, piece.kind) {
        (Side::White, PieceKind::King) => '\u{265A}',
        (Side::White, PieceKind::Queen) => '\u{265B}',
        (Side::White, PieceKind::Rook) => '\u{265C}',
        (Side::White, PieceKind::Bishop) => '\u{265D}',
        (Side::White, PieceKind::Knight) => '\u{265E}',
        (Side::White, PieceKind::Pawn) => '\u{265F}',
        (Side::Black, PieceKind::King) => '\u{2654}',
        (Side::Black, PieceKind::Queen) => '\u{2655}',
        (Side::Black, PieceKind::Rook) => '\u{2656}',
        (Side::Black, PieceKind::Bishop) => '\u{2657}',
        (Side::Black, PieceKind::Knight) => '\u{2658}',
        (Side::Black, PieceKind::Pawn) => '\u{2659}',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::engine::{FeedbackTimer, PuzzleEngine};
    use crate::oracle::ChessOracle;
    use crate::progress::MemoryStore;
    use crate::puzzle::Catalog;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Instant;

    fn app() -> App {
        let catalog = Catalog::builtin();
        let puzzle = catalog.by_id("puzzle-2026-01-16").unwrap().clone();
        let engine = PuzzleEngine::start(
            puzzle,
            Box::new(ChessOracle),
            Box::new(MemoryStore::new()),
            Box::new(FixedClock(NaiveDate::from_ymd_opt(2026, 1, 16).unwrap())),
        );
        App::new(engine, FeedbackTimer::default())
    }

    #[test]
    fn test_board_order() {
        let (ranks, files) = board_order(false);
        assert_eq!(ranks[0], 7);
        assert_eq!(files[0], 0);
        let (ranks, files) = board_order(true);
        assert_eq!(ranks[0], 0);
        assert_eq!(files[0], 7);
    }

    #[test]
    fn test_piece_glyphs() {
        let white_king = BoardPiece {
            kind: PieceKind::King,
            side: Side::White,
        };
        let black_pawn = BoardPiece {
            kind: PieceKind::Pawn,
            side: Side::Black,
        };
        assert_eq!(piece_glyph(white_king), '\u{265A}');
        assert_eq!(piece_glyph(black_pawn), '\u{2659}');
    }

    #[test]
    fn test_status_message_follows_attempt() {
        let mut app = app();
        assert_eq!(status_message(&app).0, "Find the best move");

        app.engine.attempt_move("h5".parse().unwrap(), "h4".parse().unwrap());
        app.feedback.raise(Instant::now());
        app.last_event = Some(EngineEvent::Rejected(RejectReason::WrongMove));
        assert_eq!(status_message(&app), ("Wrong move", Color::Red));

        app.feedback.cancel();
        app.engine.reveal_solution();
        assert_eq!(status_message(&app).0, "Solution shown");
    }

    #[test]
    fn test_renders_without_panic() {
        let app = app();
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_puzzle_scene(frame, frame.size(), &app))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Daily Chess Puzzle"));
        assert!(text.contains("Find the best move"));
        assert!(text.contains("Progress"));
        assert!(text.contains("[H] Hint"));
    }

    #[test]
    fn test_solved_outcome_drawn_over_board() {
        let mut app = app();
        app.engine.attempt_move("h5".parse().unwrap(), "f7".parse().unwrap());
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_puzzle_scene(frame, frame.size(), &app))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("SOLVED!"));
        assert!(text.contains("Score: 100"));
        assert!(text.contains("[R] Restart"));
    }
}
