//! The card collection and its id-addressed operations.

use crate::algorithm::{Grade, SchedulingResult, Sm2};
use crate::error::{CoreError, Result};
use crate::types::{Card, CardEdit, MINIMUM_EASE};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

/// All cards owned by the user, plus the id counter.
///
/// Ids come from `next_id`, which only ever moves forward, so an id is never
/// handed out twice even after the card carrying it is deleted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deck {
    next_id: i64,
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// Repairs made while validating a loaded deck.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeckRepairs {
    /// Cards whose ease was raised to the minimum.
    pub clamped_ease: Vec<i64>,
    /// Set when `next_id` had to be moved past the highest id.
    pub next_id_bumped: bool,
}

impl DeckRepairs {
    pub fn is_empty(&self) -> bool {
        self.clamped_ease.is_empty() && !self.next_id_bumped
    }
}

impl Deck {
    /// Create an empty deck whose first card gets id 1.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            cards: Vec::new(),
        }
    }

    /// Build a deck from loaded data, validating it.
    pub fn from_parts(next_id: i64, cards: Vec<Card>) -> Result<(Self, DeckRepairs)> {
        let mut deck = Self { next_id, cards };
        let repairs = deck.validate()?;
        Ok((deck, repairs))
    }

    /// Check id uniqueness and repair out-of-range scheduling data.
    ///
    /// Duplicate ids cannot be repaired and fail with
    /// [`CoreError::DuplicateId`].
    pub fn validate(&mut self) -> Result<DeckRepairs> {
        let mut seen = HashSet::with_capacity(self.cards.len());
        for card in &self.cards {
            if !seen.insert(card.id) {
                return Err(CoreError::DuplicateId(card.id));
            }
        }

        let mut repairs = DeckRepairs::default();

        let max_id = self.cards.iter().map(|c| c.id).max().unwrap_or(0);
        if self.next_id <= max_id || self.next_id < 1 {
            self.next_id = max_id.max(0).checked_add(1).ok_or_else(id_space_exhausted)?;
            repairs.next_id_bumped = true;
        }

        for card in &mut self.cards {
            if card.ease_factor.is_nan() || card.ease_factor < MINIMUM_EASE {
                card.ease_factor = MINIMUM_EASE;
                repairs.clamped_ease.push(card.id);
            }
        }

        self.cards.sort_by_key(|c| c.id);
        Ok(repairs)
    }

    /// Id the next added card will receive.
    pub fn next_id(&self) -> i64 {
        self.next_id
    }

    /// All cards, id ascending.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Add a new card due on `today`.
    pub fn add(&mut self, question: &str, answer: &str, today: NaiveDate) -> Result<&Card> {
        let question = non_empty("question", question)?;
        let answer = non_empty("answer", answer)?;

        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or_else(id_space_exhausted)?;
        // Ids are handed out in increasing order, so pushing keeps the sort.
        self.cards.push(Card::new(id, question, answer, today));
        Ok(&self.cards[self.cards.len() - 1])
    }

    /// Look up a card by id.
    pub fn get(&self, id: i64) -> Result<&Card> {
        self.position(id).map(|idx| &self.cards[idx])
    }

    /// Change a card's question and/or answer.
    pub fn edit(&mut self, id: i64, edit: CardEdit) -> Result<&Card> {
        let idx = self.position(id)?;
        let question = edit
            .question
            .as_deref()
            .map(|q| non_empty("question", q))
            .transpose()?;
        let answer = edit
            .answer
            .as_deref()
            .map(|a| non_empty("answer", a))
            .transpose()?;

        let card = &mut self.cards[idx];
        if let Some(question) = question {
            card.question = question;
        }
        if let Some(answer) = answer {
            card.answer = answer;
        }
        Ok(&self.cards[idx])
    }

    /// Remove a card, returning it.
    pub fn delete(&mut self, id: i64) -> Result<Card> {
        let idx = self.position(id)?;
        Ok(self.cards.remove(idx))
    }

    /// Review a card and keep its new scheduling state.
    pub fn review(
        &mut self,
        id: i64,
        grade: Grade,
        today: NaiveDate,
        algorithm: &Sm2,
    ) -> Result<SchedulingResult> {
        let idx = self.position(id)?;
        let result = algorithm.schedule(&self.cards[idx], grade, today)?;
        self.cards[idx] = result.card.clone();
        Ok(result)
    }

    fn position(&self, id: i64) -> Result<usize> {
        self.cards
            .binary_search_by_key(&id, |c| c.id)
            .map_err(|_| CoreError::NotFound(id))
    }
}

fn id_space_exhausted() -> CoreError {
    CoreError::InvalidArgument(format!("no card ids left after {}", i64::MAX))
}

fn non_empty(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidArgument(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn sample_deck() -> Deck {
        let mut deck = Deck::new();
        deck.add("Q1", "A1", today()).unwrap();
        deck.add("Q2", "A2", today()).unwrap();
        deck.add("Q3", "A3", today()).unwrap();
        deck
    }

    #[test]
    fn add_assigns_increasing_ids() {
        let deck = sample_deck();
        let ids: Vec<i64> = deck.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(deck.next_id(), 4);
    }

    #[test]
    fn add_trims_text() {
        let mut deck = Deck::new();
        let card = deck.add("  What is Rust?  ", "\tA language\n", today()).unwrap();
        assert_eq!(card.question, "What is Rust?");
        assert_eq!(card.answer, "A language");
        assert_eq!(card.due_date, today());
    }

    #[test]
    fn add_rejects_blank_text() {
        let mut deck = Deck::new();
        assert!(matches!(
            deck.add("   ", "A", today()),
            Err(CoreError::InvalidArgument(_))
        ));
        assert!(deck.is_empty());
        assert_eq!(deck.next_id(), 1);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut deck = sample_deck();
        deck.delete(3).unwrap();
        let card = deck.add("Q4", "A4", today()).unwrap();
        assert_eq!(card.id, 4);
    }

    #[test]
    fn get_missing_card_is_not_found() {
        let deck = sample_deck();
        assert_eq!(deck.get(2).unwrap().question, "Q2");
        assert_eq!(deck.get(42), Err(CoreError::NotFound(42)));
    }

    #[test]
    fn edit_changes_text_only() {
        let mut deck = sample_deck();
        let sm2 = Sm2::default();
        deck.review(1, Grade::new(5).unwrap(), today(), &sm2).unwrap();
        let before = deck.get(1).unwrap().clone();

        let edit = CardEdit {
            question: Some(" New question ".into()),
            answer: None,
        };
        let card = deck.edit(1, edit).unwrap();

        assert_eq!(card.question, "New question");
        assert_eq!(card.answer, before.answer);
        assert_eq!(card.interval, before.interval);
        assert_eq!(card.ease_factor, before.ease_factor);
        assert_eq!(card.repetitions, before.repetitions);
        assert_eq!(card.due_date, before.due_date);
        assert_eq!(card.last_reviewed, before.last_reviewed);
    }

    #[test]
    fn edit_with_blank_answer_changes_nothing() {
        let mut deck = sample_deck();
        let edit = CardEdit {
            question: Some("Changed".into()),
            answer: Some(" ".into()),
        };
        assert!(deck.edit(2, edit).is_err());
        assert_eq!(deck.get(2).unwrap().question, "Q2");
    }

    #[test]
    fn delete_missing_card_is_not_found() {
        let mut deck = sample_deck();
        assert_eq!(deck.delete(9), Err(CoreError::NotFound(9)));
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.delete(2).unwrap().question, "Q2");
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn review_stores_new_state() {
        let mut deck = sample_deck();
        let result = deck
            .review(2, Grade::new(4).unwrap(), today(), &Sm2::default())
            .unwrap();
        assert_eq!(result.card.repetitions, 1);
        assert_eq!(deck.get(2).unwrap(), &result.card);
        assert_eq!(deck.get(1).unwrap().repetitions, 0);
    }

    #[test]
    fn review_unknown_card_is_not_found() {
        let mut deck = sample_deck();
        let before = deck.clone();
        let result = deck.review(99, Grade::new(4).unwrap(), today(), &Sm2::default());
        assert_eq!(result, Err(CoreError::NotFound(99)));
        assert_eq!(deck, before);
    }

    #[test]
    fn from_parts_rejects_duplicate_ids() {
        let cards = vec![
            Card::new(1, "Q".into(), "A".into(), today()),
            Card::new(1, "Q".into(), "A".into(), today()),
        ];
        assert_eq!(Deck::from_parts(3, cards), Err(CoreError::DuplicateId(1)));
    }

    #[test]
    fn from_parts_repairs_counter_and_ease() {
        let mut low = Card::new(5, "Q".into(), "A".into(), today());
        low.ease_factor = 0.9;
        let cards = vec![low, Card::new(2, "Q".into(), "A".into(), today())];

        let (deck, repairs) = Deck::from_parts(3, cards).unwrap();
        assert_eq!(deck.next_id(), 6);
        assert!(repairs.next_id_bumped);
        assert_eq!(repairs.clamped_ease, vec![5]);
        assert_eq!(deck.get(5).unwrap().ease_factor, MINIMUM_EASE);
        assert_eq!(deck.cards()[0].id, 2);
    }

    #[test]
    fn from_parts_with_max_id_fails() {
        let cards = vec![Card::new(i64::MAX, "Q".into(), "A".into(), today())];
        assert!(matches!(
            Deck::from_parts(1, cards),
            Err(CoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn add_at_last_id_fails_without_change() {
        let (mut deck, _) = Deck::from_parts(i64::MAX, Vec::new()).unwrap();
        assert!(matches!(
            deck.add("Q", "A", today()),
            Err(CoreError::InvalidArgument(_))
        ));
        assert!(deck.is_empty());
        assert_eq!(deck.next_id(), i64::MAX);
    }

    #[test]
    fn review_out_of_calendar_keeps_card() {
        let far = Card {
            repetitions: 5,
            interval: 40_000_000,
            ..Card::new(1, "Q".into(), "A".into(), today())
        };
        let (mut deck, _) = Deck::from_parts(2, vec![far]).unwrap();
        let before = deck.clone();

        let result = deck.review(1, Grade::new(5).unwrap(), today(), &Sm2::default());
        assert!(matches!(result, Err(CoreError::InvalidArgument(_))));
        assert_eq!(deck, before);
    }

    #[test]
    fn deck_serializes_with_counter() {
        let deck = sample_deck();
        let json = serde_json::to_value(&deck).unwrap();
        assert_eq!(json["next_id"], 4);
        assert_eq!(json["cards"].as_array().unwrap().len(), 3);
    }
}
