//! Spaced repetition scheduling.

pub mod sm2;

pub use sm2::Sm2;

use crate::error::{CoreError, Result};
use crate::types::Card;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recall quality for a review, 0 (blackout) through 5 (perfect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Grade(u8);

impl Grade {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 5;

    /// Lowest grade that counts as a successful recall.
    pub const PASSING: u8 = 3;

    /// Validate a raw grade.
    pub fn new(value: i64) -> Result<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(CoreError::InvalidGrade { grade: value })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Grades of 3 and above are successes; anything lower is a lapse.
    pub fn is_success(self) -> bool {
        self.0 >= Self::PASSING
    }
}

impl TryFrom<i64> for Grade {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        grade.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of scheduling a card after review.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulingResult {
    pub card: Card,
    pub grade: Grade,
    pub interval_before: u32,
    pub ease_before: f64,
}

impl SchedulingResult {
    pub fn next_due(&self) -> NaiveDate {
        self.card.due_date
    }

    pub fn is_lapse(&self) -> bool {
        !self.grade.is_success()
    }
}

/// Apply a raw grade to a card with the default SM-2 parameters.
///
/// Fails with [`CoreError::InvalidGrade`] before any computation when the
/// grade is outside 0..=5, and with [`CoreError::InvalidArgument`] when the
/// next due date does not fit in the calendar.
pub fn apply_grade(card: &Card, grade: i64, today: NaiveDate) -> Result<Card> {
    let grade = Grade::new(grade)?;
    Ok(Sm2::default().schedule(card, grade, today)?.card)
}
