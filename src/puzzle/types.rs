//! Puzzle definitions: squares, solution moves, and the immutable puzzle record.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A board square. File 0-7 = a-h, rank 0-7 = ranks 1-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Build a square from zero-based file and rank. Returns `None` off the board.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self { file, rank })
    }

    pub fn file(&self) -> u8 {
        self.file
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidSquare {
            square: s.to_string(),
        };
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = bytes[0].to_ascii_lowercase().wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::new(file, rank).ok_or_else(invalid)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, (b'1' + self.rank) as char)
    }
}

/// Piece a pawn becomes when it reaches the last rank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Promotion {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'q' => Some(Self::Queen),
            'r' => Some(Self::Rook),
            'b' => Some(Self::Bishop),
            'n' => Some(Self::Knight),
            _ => None,
        }
    }

    /// SAN letter (always uppercase).
    pub fn letter(&self) -> char {
        match self {
            Self::Queen => 'Q',
            Self::Rook => 'R',
            Self::Bishop => 'B',
            Self::Knight => 'N',
        }
    }
}

/// One move of the solution line, parsed from UCI text like `h5f7` or `e7e8n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolutionMove {
    pub from: Square,
    pub to: Square,
    /// Explicit promotion piece. `None` means "use the configured default".
    pub promotion: Option<Promotion>,
}

impl SolutionMove {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn matches_squares(&self, from: Square, to: Square) -> bool {
        self.from == from && self.to == to
    }
}

impl FromStr for SolutionMove {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidMove {
            text: s.to_string(),
        };
        let s = s.trim();
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(invalid());
        }
        let from: Square = s[0..2].parse().map_err(|_| invalid())?;
        let to: Square = s[2..4].parse().map_err(|_| invalid())?;
        let promotion = match s[4..].chars().next() {
            Some(c) => Some(Promotion::from_char(c).ok_or_else(invalid)?),
            None => None,
        };
        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Display for SolutionMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(p) = self.promotion {
            write!(f, "{}", p.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// A single puzzle as handed to the engine. Immutable for the whole attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleDefinition {
    pub id: String,
    /// Opaque position encoding understood by the oracle (FEN for `ChessOracle`).
    pub start_position: String,
    /// The only accepted line, both sides' moves in order. Never empty.
    pub solution: Vec<SolutionMove>,
    pub hints: Vec<String>,

    // Display-only metadata
    pub date: Option<chrono::NaiveDate>,
    pub description: String,
    pub white: Option<String>,
    pub black: Option<String>,
    pub event: Option<String>,
}

impl PuzzleDefinition {
    /// Build a puzzle with no display metadata. Fails if `solution` is empty.
    pub fn new(
        id: impl Into<String>,
        start_position: impl Into<String>,
        solution: Vec<SolutionMove>,
        hints: Vec<String>,
    ) -> Result<Self> {
        let id = id.into();
        if solution.is_empty() {
            return Err(Error::EmptySolution { id });
        }
        Ok(Self {
            id,
            start_position: start_position.into(),
            solution,
            hints,
            date: None,
            description: String::new(),
            white: None,
            black: None,
            event: None,
        })
    }

    /// Parse the UCI solution strings used by catalogs.
    pub fn parse_solution<S: AsRef<str>>(moves: &[S]) -> Result<Vec<SolutionMove>> {
        moves.iter().map(|m| m.as_ref().parse()).collect()
    }
}
