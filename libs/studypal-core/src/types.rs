//! Core types for the flashcard deck.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ease factor given to every new card.
pub const INITIAL_EASE: f64 = 2.5;

/// Lowest ease factor a card may ever carry.
pub const MINIMUM_EASE: f64 = 1.3;

/// A flashcard together with its scheduling state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub repetitions: u32,
    pub interval: u32,
    #[serde(rename = "ease")]
    pub ease_factor: f64,
    #[serde(rename = "due")]
    pub due_date: NaiveDate,
    pub created: NaiveDate,
    #[serde(rename = "last_review", default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<NaiveDate>,
}

impl Card {
    /// Create a never-reviewed card that is due on `today`.
    pub fn new(id: i64, question: String, answer: String, today: NaiveDate) -> Self {
        Self {
            id,
            question,
            answer,
            repetitions: 0,
            interval: 0,
            ease_factor: INITIAL_EASE,
            due_date: today,
            created: today,
            last_reviewed: None,
        }
    }

    /// Whether the card is eligible for review on `today`.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.due_date <= today
    }

    /// Whether the card has never had a successful review.
    pub fn is_new(&self) -> bool {
        self.repetitions == 0
    }
}

/// Question/answer changes for an existing card.
///
/// Scheduling fields cannot be edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardEdit {
    pub question: Option<String>,
    pub answer: Option<String>,
}

impl CardEdit {
    pub fn is_empty(&self) -> bool {
        self.question.is_none() && self.answer.is_none()
    }
}

/// Aggregate counts over a deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckStats {
    pub total_cards: usize,
    pub due_today: usize,
    pub new_cards: usize,
    pub learned_cards: usize,
    pub average_ease: f64,
}

/// Number of cards falling due on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub due: usize,
}
