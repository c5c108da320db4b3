//! Running tally for a practice session.

use crate::algorithm::Grade;
use serde::Serialize;

/// Counts of graded cards in one sitting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReviewSession {
    pub reviewed: usize,
    pub successful: usize,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, grade: Grade) {
        self.reviewed += 1;
        if grade.is_success() {
            self.successful += 1;
        }
    }

    /// Percentage of reviews graded 3 or higher; 0.0 before any review.
    pub fn accuracy(&self) -> f64 {
        if self.reviewed == 0 {
            return 0.0;
        }
        100.0 * self.successful as f64 / self.reviewed as f64
    }
}
