//! `MoveOracle` backed by the `chess` crate: FEN positions, SAN notation.

use super::{AppliedMove, BoardPiece, MoveOracle, MoveRejection, MoveRequest, PieceKind, Side};
use crate::puzzle::{Promotion, Square};
use chess::{Board, BoardBuilder, BoardStatus, ChessMove, MoveGen, Piece, Rank, ALL_SQUARES};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default)]
pub struct ChessOracle;

impl ChessOracle {
    pub fn new() -> Self {
        Self
    }

    /// Whether `position` is a FEN this oracle can play from.
    pub fn is_valid_position(position: &str) -> bool {
        Self::parse(position).is_some()
    }

    /// Parse a FEN. Positions without exactly one king per side are refused
    /// before `Board` sees them, since its pin setup indexes by king square.
    fn parse(position: &str) -> Option<Board> {
        let builder = BoardBuilder::from_str(position).ok()?;
        let kings = |color: chess::Color| {
            ALL_SQUARES
                .iter()
                .filter(|&&sq| builder[sq] == Some((Piece::King, color)))
                .count()
        };
        if kings(chess::Color::White) != 1 || kings(chess::Color::Black) != 1 {
            return None;
        }
        Board::try_from(builder).ok()
    }
}

fn to_chess_square(sq: Square) -> chess::Square {
    chess::Square::make_square(
        Rank::from_index(sq.rank() as usize),
        chess::File::from_index(sq.file() as usize),
    )
}

fn from_chess_square(sq: chess::Square) -> Option<Square> {
    Square::new(
        sq.get_file().to_index() as u8,
        sq.get_rank().to_index() as u8,
    )
}

fn to_chess_piece(promotion: Promotion) -> Piece {
    match promotion {
        Promotion::Queen => Piece::Queen,
        Promotion::Rook => Piece::Rook,
        Promotion::Bishop => Piece::Bishop,
        Promotion::Knight => Piece::Knight,
    }
}

fn piece_kind(piece: Piece) -> PieceKind {
    match piece {
        Piece::Pawn => PieceKind::Pawn,
        Piece::Knight => PieceKind::Knight,
        Piece::Bishop => PieceKind::Bishop,
        Piece::Rook => PieceKind::Rook,
        Piece::Queen => PieceKind::Queen,
        Piece::King => PieceKind::King,
    }
}

fn piece_letter(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'P',
        Piece::Knight => 'N',
        Piece::Bishop => 'B',
        Piece::Rook => 'R',
        Piece::Queen => 'Q',
        Piece::King => 'K',
    }
}

fn file_char(sq: chess::Square) -> char {
    (b'a' + sq.get_file().to_index() as u8) as char
}

fn rank_char(sq: chess::Square) -> char {
    (b'1' + sq.get_rank().to_index() as u8) as char
}

/// Minimal origin prefix that makes a piece move unambiguous (`Rad1`, `N5c3`).
fn disambiguation(board: &Board, mv: ChessMove, piece: Piece) -> String {
    let from = mv.get_source();
    let rivals: Vec<chess::Square> = MoveGen::new_legal(board)
        .filter(|m| {
            m.get_dest() == mv.get_dest()
                && m.get_source() != from
                && board.piece_on(m.get_source()) == Some(piece)
        })
        .map(|m| m.get_source())
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|s| s.get_file() != from.get_file()) {
        file_char(from).to_string()
    } else if rivals.iter().all(|s| s.get_rank() != from.get_rank()) {
        rank_char(from).to_string()
    } else {
        format!("{}{}", file_char(from), rank_char(from))
    }
}

/// Standard algebraic notation for a legal move on `board`.
fn san(board: &Board, mv: ChessMove) -> String {
    let from = mv.get_source();
    let to = mv.get_dest();
    let file_delta = to.get_file().to_index() as i32 - from.get_file().to_index() as i32;
    let mut text = String::new();

    match board.piece_on(from) {
        Some(Piece::King) if file_delta.abs() == 2 => {
            text.push_str(if file_delta > 0 { "O-O" } else { "O-O-O" });
        }
        Some(Piece::Pawn) => {
            // A pawn changing file always captures, en passant included
            if file_delta != 0 {
                text.push(file_char(from));
                text.push('x');
            }
            text.push_str(&to.to_string());
            if let Some(promo) = mv.get_promotion() {
                text.push('=');
                text.push(piece_letter(promo));
            }
        }
        Some(piece) => {
            text.push(piece_letter(piece));
            text.push_str(&disambiguation(board, mv, piece));
            if board.piece_on(to).is_some() {
                text.push('x');
            }
            text.push_str(&to.to_string());
        }
        None => text.push_str(&format!("{}{}", from, to)),
    }

    let after = board.make_move_new(mv);
    if after.status() == BoardStatus::Checkmate {
        text.push('#');
    } else if after.checkers().popcnt() > 0 {
        text.push('+');
    }
    text
}

impl MoveOracle for ChessOracle {
    fn apply_move(
        &self,
        position: &str,
        request: MoveRequest,
    ) -> Result<AppliedMove, MoveRejection> {
        let board = Self::parse(position).ok_or(MoveRejection::InvalidPosition)?;
        let from = to_chess_square(request.from);
        let to = to_chess_square(request.to);

        let promotion = match board.piece_on(from) {
            Some(Piece::Pawn) if to.get_rank() == Rank::First || to.get_rank() == Rank::Eighth => {
                Some(to_chess_piece(request.promotion))
            }
            _ => None,
        };
        let mv = ChessMove::new(from, to, promotion);
        if !board.legal(mv) {
            return Err(MoveRejection::Illegal);
        }

        let notation = san(&board, mv);
        let next = board.make_move_new(mv);
        Ok(AppliedMove {
            notation,
            position: next.to_string(),
        })
    }

    fn piece_at(&self, position: &str, square: Square) -> Option<BoardPiece> {
        let board = Self::parse(position)?;
        let sq = to_chess_square(square);
        let piece = board.piece_on(sq)?;
        let side = match board.color_on(sq)? {
            chess::Color::White => Side::White,
            chess::Color::Black => Side::Black,
        };
        Some(BoardPiece {
            kind: piece_kind(piece),
            side,
        })
    }

    fn side_to_move(&self, position: &str) -> Option<Side> {
        Self::parse(position).map(|board| match board.side_to_move() {
            chess::Color::White => Side::White,
            chess::Color::Black => Side::Black,
        })
    }

    fn legal_destinations(&self, position: &str, from: Square) -> Vec<Square> {
        let Some(board) = Self::parse(position) else {
            return Vec::new();
        };
        let source = to_chess_square(from);
        let mut destinations: Vec<Square> = MoveGen::new_legal(&board)
            .filter(|m| m.get_source() == source)
            .filter_map(|m| from_chess_square(m.get_dest()))
            .collect();
        // Promotions yield one move per piece
        destinations.sort();
        destinations.dedup();
        destinations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    const SCHOLAR: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn request(from: &str, to: &str) -> MoveRequest {
        MoveRequest {
            from: sq(from),
            to: sq(to),
            promotion: Promotion::Queen,
        }
    }

    fn notation(position: &str, from: &str, to: &str, promotion: Promotion) -> String {
        let req = MoveRequest {
            promotion,
            ..request(from, to)
        };
        ChessOracle.apply_move(position, req).unwrap().notation
    }

    #[test]
    fn test_pawn_and_knight_notation() {
        assert_eq!(notation(START, "e2", "e4", Promotion::Queen), "e4");
        assert_eq!(notation(START, "g1", "f3", Promotion::Queen), "Nf3");
    }

    #[test]
    fn test_scholars_mate_notation() {
        assert_eq!(notation(SCHOLAR, "h5", "f7", Promotion::Queen), "Qxf7#");
    }

    #[test]
    fn test_castling_notation() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        assert_eq!(notation(fen, "e1", "g1", Promotion::Queen), "O-O");
        assert_eq!(notation(fen, "e1", "c1", Promotion::Queen), "O-O-O");
    }

    #[test]
    fn test_promotion_notation() {
        let fen = "7k/P7/8/8/8/8/8/K7 w - - 0 1";
        assert_eq!(notation(fen, "a7", "a8", Promotion::Queen), "a8=Q+");
        assert_eq!(notation(fen, "a7", "a8", Promotion::Knight), "a8=N");
    }

    #[test]
    fn test_file_disambiguation() {
        let fen = "7k/8/8/8/8/8/8/R4R1K w - - 0 1";
        assert_eq!(notation(fen, "a1", "d1", Promotion::Queen), "Rad1");
    }

    #[test]
    fn test_illegal_move_rejected() {
        assert_eq!(
            ChessOracle.apply_move(START, request("e2", "e5")),
            Err(MoveRejection::Illegal)
        );
        // Black piece while white is to move
        assert_eq!(
            ChessOracle.apply_move(START, request("e7", "e5")),
            Err(MoveRejection::Illegal)
        );
    }

    #[test]
    fn test_invalid_position_rejected() {
        assert_eq!(
            ChessOracle.apply_move("not a fen", request("e2", "e4")),
            Err(MoveRejection::InvalidPosition)
        );
    }

    #[test]
    fn test_kingless_positions_rejected() {
        let empty = "8/8/8/8/8/8/8/8 w - - 0 1";
        let seven_ranks = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1";
        for fen in [empty, seven_ranks] {
            assert!(!ChessOracle::is_valid_position(fen));
            assert_eq!(
                ChessOracle.apply_move(fen, request("e2", "e4")),
                Err(MoveRejection::InvalidPosition)
            );
            assert_eq!(ChessOracle.side_to_move(fen), None);
            assert_eq!(ChessOracle.piece_at(fen, sq("e2")), None);
            assert!(ChessOracle.legal_destinations(fen, sq("e2")).is_empty());
        }
        assert!(ChessOracle::is_valid_position(START));
    }

    #[test]
    fn test_apply_move_changes_side_to_move() {
        let applied = ChessOracle.apply_move(START, request("e2", "e4")).unwrap();
        assert_eq!(ChessOracle.side_to_move(START), Some(Side::White));
        assert_eq!(ChessOracle.side_to_move(&applied.position), Some(Side::Black));
        assert_eq!(
            ChessOracle.piece_at(&applied.position, sq("e4")),
            Some(BoardPiece {
                kind: PieceKind::Pawn,
                side: Side::White
            })
        );
        assert_eq!(ChessOracle.piece_at(&applied.position, sq("e2")), None);
    }

    #[test]
    fn test_legal_destinations() {
        let destinations = ChessOracle.legal_destinations(START, sq("e2"));
        assert_eq!(destinations, vec![sq("e3"), sq("e4")]);
        assert!(ChessOracle.legal_destinations(START, sq("e4")).is_empty());
    }

    #[test]
    fn test_promotion_destinations_deduplicated() {
        let fen = "7k/P7/8/8/8/8/8/K7 w - - 0 1";
        assert_eq!(ChessOracle.legal_destinations(fen, sq("a7")), vec![sq("a8")]);
    }
}
