//! Command-line interface for dailychess.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Daily chess puzzles in the terminal
#[derive(Parser, Debug)]
#[command(name = "dailychess")]
#[command(about = "Solve the daily chess puzzle in your terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ~/.dailychess/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Puzzle catalog in TOML, replacing the built-in puzzles
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Play today's puzzle
    Play {
        /// Treat this date (YYYY-MM-DD) as today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Play a specific puzzle by id
        #[arg(long)]
        puzzle: Option<String>,
    },

    /// Print streak, total solves, level, and badges
    Stats,

    /// Print the puzzle catalog
    List,
}

impl Cli {
    /// The chosen subcommand, `play` with no options when omitted.
    pub fn command(&self) -> Command {
        match &self.command {
            Some(Command::Play { date, puzzle }) => Command::Play {
                date: *date,
                puzzle: puzzle.clone(),
            },
            Some(Command::Stats) => Command::Stats,
            Some(Command::List) => Command::List,
            None => Command::Play {
                date: None,
                puzzle: None,
            },
        }
    }
}
