//! Read-only queries over a deck: due selection, statistics and forecasts.

use crate::deck::Deck;
use crate::error::{CoreError, Result};
use crate::types::{Card, DeckStats, ForecastDay};
use chrono::{Days, NaiveDate};

/// Cards due on or before `today`, oldest due date first, ties by id.
pub fn due_cards(deck: &Deck, today: NaiveDate) -> impl Iterator<Item = &Card> {
    let mut due: Vec<&Card> = deck.cards().iter().filter(|c| c.is_due(today)).collect();
    due.sort_by_key(|c| (c.due_date, c.id));
    due.into_iter()
}

/// Number of cards due on or before `today`.
pub fn due_count(deck: &Deck, today: NaiveDate) -> usize {
    deck.cards().iter().filter(|c| c.is_due(today)).count()
}

/// Aggregate counts for a deck.
///
/// An empty deck reports an average ease of 0.0.
pub fn stats(deck: &Deck, today: NaiveDate) -> DeckStats {
    let cards = deck.cards();
    let total_cards = cards.len();

    let average_ease = if total_cards == 0 {
        0.0
    } else {
        cards.iter().map(|c| c.ease_factor).sum::<f64>() / total_cards as f64
    };

    DeckStats {
        total_cards,
        due_today: due_count(deck, today),
        new_cards: cards.iter().filter(|c| c.is_new()).count(),
        learned_cards: cards.iter().filter(|c| c.repetitions >= 2).count(),
        average_ease,
    }
}

/// Longest forecast [`forecast`] accepts, in days.
pub const MAX_FORECAST_DAYS: usize = 3660;

/// Cards falling due on each of the `horizon_days` days starting at `today`.
///
/// Days without due cards are included with a zero count. Overdue cards
/// are not counted on any day. The horizon must be between 1 and
/// [`MAX_FORECAST_DAYS`] and must end inside the calendar range.
pub fn forecast(deck: &Deck, today: NaiveDate, horizon_days: usize) -> Result<Vec<ForecastDay>> {
    if horizon_days == 0 {
        return Err(CoreError::InvalidArgument(
            "forecast horizon must be at least 1 day".to_string(),
        ));
    }
    if horizon_days > MAX_FORECAST_DAYS {
        return Err(CoreError::InvalidArgument(format!(
            "forecast horizon of {horizon_days} days exceeds {MAX_FORECAST_DAYS}"
        )));
    }
    let last_day = today
        .checked_add_days(Days::new(horizon_days as u64 - 1))
        .ok_or_else(|| {
            CoreError::InvalidArgument(format!(
                "forecast of {horizon_days} days from {today} runs past the calendar"
            ))
        })?;

    let mut counts = vec![0usize; horizon_days];
    for card in deck.cards() {
        if card.due_date < today || card.due_date > last_day {
            continue;
        }
        let offset = (card.due_date - today).num_days() as usize;
        counts[offset] += 1;
    }

    // Every offset is within the horizon checked above.
    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(offset, due)| ForecastDay {
            date: today + Days::new(offset as u64),
            due,
        })
        .collect())
}
