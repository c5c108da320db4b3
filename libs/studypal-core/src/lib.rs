//! Core library for the StudyPal flashcard tool.
//!
//! Provides:
//! - The deck collection with id assignment, edits and deletion
//! - SM-2 scheduling of a card after a 0-5 grade
//! - Due-card selection, deck statistics and review forecasts
//! - A practice session tally
//!
//! Nothing here touches the filesystem or the clock: callers pass in the
//! deck and the date they consider "today".

pub mod algorithm;
pub mod deck;
pub mod error;
pub mod query;
pub mod session;
pub mod types;

pub use algorithm::{apply_grade, Grade, SchedulingResult, Sm2};
pub use deck::{Deck, DeckRepairs};
pub use error::{CoreError, Result};
pub use query::{due_cards, due_count, forecast, stats, MAX_FORECAST_DAYS};
pub use session::ReviewSession;
pub use types::{Card, CardEdit, DeckStats, ForecastDay, INITIAL_EASE, MINIMUM_EASE};
