//! Command-line surface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "studypal", about = "StudyPal: spaced repetition flashcards", version)]
pub struct Cli {
    /// Deck file to use (default: $STUDYPAL_DECK or the user data directory)
    #[arg(long, global = true)]
    pub deck: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, value_parser = crate::date_utils::parse_date, hide = true)]
    pub today: Option<chrono::NaiveDate>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new card
    Add {
        question: String,
        answer: String,
    },

    /// Review due cards
    Practice,

    /// Show deck statistics
    Stats {
        /// Days to forecast, today included
        #[arg(long)]
        days: Option<usize>,
    },

    /// List all cards
    List,

    /// List cards due today in review order
    Due,

    /// Edit a card by id
    Edit {
        id: i64,
        #[arg(long)]
        question: Option<String>,
        #[arg(long)]
        answer: Option<String>,
    },

    /// Delete a card by id
    Delete {
        id: i64,
    },
}
