//! Move legality oracle: the only place chess rules live.
//!
//! The engine treats positions as opaque strings and asks the oracle whether a
//! move is legal, what it is called, and where it leads. Oracles are stateless
//! (`&self` everywhere), so replaying a line is plain sequential application.

pub mod chess_oracle;

pub use chess_oracle::ChessOracle;

use crate::puzzle::{Promotion, SolutionMove, Square};
use derive_more::Display;

/// A candidate move as the engine hands it to the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    /// Used only when the move is a pawn reaching the last rank.
    pub promotion: Promotion,
}

/// An accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    /// Standard algebraic notation, e.g. `Qxf7#`
    pub notation: String,
    /// Position after the move
    pub position: String,
}

/// Why the oracle refused a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MoveRejection {
    #[display("position could not be parsed")]
    InvalidPosition,
    #[display("move is not legal in this position")]
    Illegal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardPiece {
    pub kind: PieceKind,
    pub side: Side,
}

pub trait MoveOracle {
    /// Validate and apply a move. Never mutates the oracle.
    fn apply_move(&self, position: &str, request: MoveRequest)
        -> Result<AppliedMove, MoveRejection>;

    fn piece_at(&self, position: &str, square: Square) -> Option<BoardPiece>;

    fn side_to_move(&self, position: &str) -> Option<Side>;

    /// Destinations of every legal move starting on `from` (for highlighting).
    fn legal_destinations(&self, position: &str, from: Square) -> Vec<Square>;
}

/// Result of replaying a full line from a start position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    pub position: String,
    pub notations: Vec<String>,
}

/// Apply `moves` one after another from `start`, stopping at the first rejection.
///
/// Returns the index of the failing move alongside the rejection.
pub fn replay_line(
    oracle: &dyn MoveOracle,
    start: &str,
    moves: &[SolutionMove],
    default_promotion: Promotion,
) -> Result<Replay, (usize, MoveRejection)> {
    let mut position = start.to_string();
    let mut notations = Vec::with_capacity(moves.len());

    for (index, m) in moves.iter().enumerate() {
        let request = MoveRequest {
            from: m.from,
            to: m.to,
            promotion: m.promotion.unwrap_or(default_promotion),
        };
        let applied = oracle
            .apply_move(&position, request)
            .map_err(|rejection| (index, rejection))?;
        position = applied.position;
        notations.push(applied.notation);
    }

    Ok(Replay {
        position,
        notations,
    })
}
