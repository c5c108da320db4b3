//! Dates and decks used across tests.

use chrono::{Duration, NaiveDate};

use super::TestContext;

/// Day `n` of the test calendar.
pub fn day(n: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 1).unwrap() + Duration::days(n)
}

/// Add cards with the given questions on day 0, answers derived from them.
pub fn seed_cards(ctx: &TestContext, questions: &[&str]) {
    for &question in questions {
        let answer = format!("answer to {question}");
        ctx.ok(day(0), &["add", question, answer.as_str()]);
    }
}
