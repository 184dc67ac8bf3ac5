//! Dated puzzle collection and "today's puzzle" lookup.
//!
//! The engine never sees the catalog; it only receives the resolved
//! `PuzzleDefinition`. Catalogs come from the compiled-in set below or from a
//! TOML file:
//!
//! ```toml
//! [[puzzles]]
//! id = "puzzle-2026-01-16"
//! date = "2026-01-16"
//! fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4"
//! solution = ["h5f7"]
//! hints = ["Look at f7"]
//! description = "Scholar's mate"
//! ```

use super::types::PuzzleDefinition;
use crate::error::{Error, Result};
use crate::oracle::ChessOracle;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// A compiled-in puzzle (static data).
struct BuiltinPuzzle {
    id: &'static str,
    date: &'static str,
    fen: &'static str,
    /// UCI moves, both sides, in order
    solution: &'static [&'static str],
    hints: &'static [&'static str],
    description: &'static str,
    white: Option<&'static str>,
    black: Option<&'static str>,
    event: Option<&'static str>,
}

static BUILTIN_PUZZLES: &[BuiltinPuzzle] = &[
    // 1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6?? => Qxf7#
    BuiltinPuzzle {
        id: "puzzle-2026-01-16",
        date: "2026-01-16",
        fen: "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        solution: &["h5f7"],
        hints: &[
            "Look for a direct attack on the black king.",
            "The f7 square is only defended by the king...",
            "The queen takes on f7 with mate: Qxf7#",
        ],
        description: "Scholar's mate! A lightning strike on f7, Black's weak spot. \
                      A reminder to guard the squares around an uncastled king.",
        white: Some("Amateur"),
        black: Some("Amateur"),
        event: Some("Training game"),
    },
    // Knight lands on f7, forking queen and rook; after Qe7 it collects the rook.
    BuiltinPuzzle {
        id: "puzzle-2026-01-15",
        date: "2026-01-15",
        fen: "r2qkbnr/ppp2ppp/2np4/4N3/2B1P3/2N5/PPPP1PPP/R1BQK2R w KQkq - 0 6",
        solution: &["e5f7", "d8e7", "f7h8"],
        hints: &[
            "The knight can reach a critical square...",
            "After the capture, queen and rook are both attacked.",
            "Nxf7! then after Qe7, Nxh8 wins the exchange.",
        ],
        description: "A classic raid on f7 against the uncastled king: the knight \
                      forks queen and rook and walks away with material.",
        white: Some("Paul Morphy"),
        black: Some("Duke of Brunswick"),
        event: Some("Paris 1858"),
    },
    // 1. f3? e5 2. g4?? => Qh4#
    BuiltinPuzzle {
        id: "puzzle-2026-01-14",
        date: "2026-01-14",
        fen: "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2",
        solution: &["d8h4"],
        hints: &[
            "White has opened the diagonal to the king.",
            "The queen strikes along e1-h4.",
            "Qh4# is fool's mate.",
        ],
        description: "Fool's mate: the fastest possible checkmate, punishing two \
                      careless pawn moves in front of the king.",
        white: None,
        black: None,
        event: None,
    },
];

/// One `[[puzzles]]` table in a TOML catalog.
#[derive(Debug, Clone, Deserialize)]
struct CatalogEntry {
    id: String,
    #[serde(default)]
    date: Option<NaiveDate>,
    fen: String,
    solution: Vec<String>,
    #[serde(default)]
    hints: Vec<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    white: Option<String>,
    #[serde(default)]
    black: Option<String>,
    #[serde(default)]
    event: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    puzzles: Vec<CatalogEntry>,
}

impl CatalogEntry {
    fn into_definition(self) -> Result<PuzzleDefinition> {
        let solution = PuzzleDefinition::parse_solution(&self.solution)?;
        if !ChessOracle::is_valid_position(&self.fen) {
            return Err(Error::InvalidPosition { position: self.fen });
        }
        let mut puzzle = PuzzleDefinition::new(self.id, self.fen, solution, self.hints)?;
        puzzle.date = self.date;
        puzzle.description = self.description;
        puzzle.white = self.white;
        puzzle.black = self.black;
        puzzle.event = self.event;
        Ok(puzzle)
    }
}

impl From<&BuiltinPuzzle> for CatalogEntry {
    fn from(p: &BuiltinPuzzle) -> Self {
        Self {
            id: p.id.to_string(),
            date: NaiveDate::parse_from_str(p.date, "%Y-%m-%d").ok(),
            fen: p.fen.to_string(),
            solution: p.solution.iter().map(|s| s.to_string()).collect(),
            hints: p.hints.iter().map(|s| s.to_string()).collect(),
            description: p.description.to_string(),
            white: p.white.map(str::to_string),
            black: p.black.map(str::to_string),
            event: p.event.map(str::to_string),
        }
    }
}

/// An ordered puzzle collection.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    puzzles: Vec<PuzzleDefinition>,
}

impl Catalog {
    /// The compiled-in puzzles.
    pub fn builtin() -> Self {
        let puzzles = BUILTIN_PUZZLES
            .iter()
            .filter_map(|p| match CatalogEntry::from(p).into_definition() {
                Ok(def) => Some(def),
                Err(e) => {
                    debug_assert!(false, "Built-in puzzle {} is invalid: {}", p.id, e);
                    None
                }
            })
            .collect();
        Self { puzzles }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(s)?;
        let puzzles = file
            .puzzles
            .into_iter()
            .map(CatalogEntry::into_definition)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { puzzles })
    }

    /// Load a TOML catalog from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&text)?;
        info!(target: "catalog", path = %path.display(), count = catalog.len(), "Loaded puzzle catalog");
        Ok(catalog)
    }

    /// Load `path` if given, falling back to the built-in set on any error.
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        match path.map(Self::load) {
            Some(Ok(catalog)) if !catalog.is_empty() => catalog,
            Some(Ok(_)) => {
                warn!(target: "catalog", "Catalog file is empty, using built-in puzzles");
                Self::builtin()
            }
            Some(Err(e)) => {
                warn!(target: "catalog", error = %e, "Failed to load catalog, using built-in puzzles");
                Self::builtin()
            }
            None => Self::builtin(),
        }
    }

    pub fn puzzles(&self) -> &[PuzzleDefinition] {
        &self.puzzles
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    /// The puzzle dated `date`, or the first puzzle when none matches.
    pub fn for_date(&self, date: NaiveDate) -> Option<&PuzzleDefinition> {
        self.puzzles
            .iter()
            .find(|p| p.date == Some(date))
            .or_else(|| self.puzzles.first())
    }

    pub fn by_id(&self, id: &str) -> Result<&PuzzleDefinition> {
        self.puzzles
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::PuzzleNotFound { key: id.to_string() })
    }
}
