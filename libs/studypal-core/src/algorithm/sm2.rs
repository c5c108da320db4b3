//! SM-2 spaced repetition algorithm.
//!
//! Based on SuperMemo 2. Every review adjusts the ease factor by
//! `0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)`, clamped at the minimum ease.
//! A grade below 3 is a lapse and restarts the card at a one day interval.

use super::{Grade, SchedulingResult};
use crate::error::{CoreError, Result};
use crate::types::{Card, INITIAL_EASE, MINIMUM_EASE};
use chrono::{Days, NaiveDate};

/// Interval after the first successful review.
const FIRST_INTERVAL: u32 = 1;

/// Interval after the second consecutive successful review.
const SECOND_INTERVAL: u32 = 6;

/// Interval after a lapse.
const RELEARN_INTERVAL: u32 = 1;

/// SM-2 algorithm parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: INITIAL_EASE,
            minimum_ease: MINIMUM_EASE,
        }
    }
}

impl Sm2 {
    /// Compute the card's state after a review on `today`.
    ///
    /// The input card is left untouched; the caller decides whether to keep
    /// the returned state. Fails with [`CoreError::InvalidArgument`] when the
    /// next due date would fall outside the calendar range.
    pub fn schedule(
        &self,
        card: &Card,
        grade: Grade,
        today: NaiveDate,
    ) -> Result<SchedulingResult> {
        let ease_factor = self.next_ease(card.ease_factor, grade);

        let (repetitions, interval) = if grade.is_success() {
            let repetitions = card.repetitions.saturating_add(1);
            let interval = match repetitions {
                1 => FIRST_INTERVAL,
                2 => SECOND_INTERVAL,
                _ => grow_interval(card.interval, ease_factor),
            };
            (repetitions, interval)
        } else {
            (0, RELEARN_INTERVAL)
        };

        let due_date = today
            .checked_add_days(Days::new(u64::from(interval)))
            .ok_or_else(|| {
                CoreError::InvalidArgument(format!(
                    "card {}: next due date {} days after {} is out of range",
                    card.id, interval, today
                ))
            })?;

        Ok(SchedulingResult {
            card: Card {
                repetitions,
                interval,
                ease_factor,
                due_date,
                last_reviewed: Some(today),
                ..card.clone()
            },
            grade,
            interval_before: card.interval,
            ease_before: card.ease_factor,
        })
    }

    /// Ease factor after a review with `grade`, never below `minimum_ease`.
    pub fn next_ease(&self, ease_factor: f64, grade: Grade) -> f64 {
        let miss = f64::from(Grade::MAX - grade.value());
        let updated = ease_factor + (0.1 - miss * (0.08 + miss * 0.02));
        updated.max(self.minimum_ease)
    }
}

// Ties round to even so a 2.5 ease on a 5 day interval gives 12, not 13.
fn grow_interval(previous: u32, ease_factor: f64) -> u32 {
    let grown = (f64::from(previous) * ease_factor).round_ties_even();
    if grown >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        (grown as u32).max(FIRST_INTERVAL)
    }
}
