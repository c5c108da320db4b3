//! Card management commands.

use super::{write_json, CommandContext};
use crate::cli::OutputFormat;
use anyhow::Context;
use std::io::Write;
use studypal_core::{due_cards, Card, CardEdit};

/// Add a card due today.
pub fn add<W: Write>(
    ctx: &CommandContext,
    question: &str,
    answer: &str,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut deck = ctx.store.load()?;
    let id = deck.add(question, answer, ctx.today)?.id;
    ctx.store.save(&deck)?;

    tracing::info!("Added card {} to {}", id, ctx.store.path().display());
    writeln!(out, "[+] Added card #{id}")?;
    Ok(())
}

/// Print every card, id ascending.
pub fn list<W: Write>(ctx: &CommandContext, out: &mut W) -> anyhow::Result<()> {
    let deck = ctx.store.load()?;

    if ctx.format == OutputFormat::Json {
        return write_json(out, &deck.cards());
    }

    if deck.is_empty() {
        writeln!(out, "No cards yet. Use 'add' to create one.")?;
        return Ok(());
    }
    for card in deck.cards() {
        write_card(out, card)?;
    }
    Ok(())
}

/// Print the cards due today in the order practice shows them.
pub fn due<W: Write>(ctx: &CommandContext, out: &mut W) -> anyhow::Result<()> {
    let deck = ctx.store.load()?;
    let cards: Vec<&Card> = due_cards(&deck, ctx.today).collect();

    if ctx.format == OutputFormat::Json {
        return write_json(out, &cards);
    }

    if cards.is_empty() {
        writeln!(out, "No cards due today.")?;
        return Ok(());
    }
    for card in cards {
        write_card(out, card)?;
    }
    Ok(())
}

/// Change a card's question and/or answer.
pub fn edit<W: Write>(
    ctx: &CommandContext,
    id: i64,
    question: Option<String>,
    answer: Option<String>,
    out: &mut W,
) -> anyhow::Result<()> {
    let edit = CardEdit { question, answer };
    if edit.is_empty() {
        anyhow::bail!("nothing to edit: pass --question and/or --answer");
    }

    let mut deck = ctx.store.load()?;
    deck.edit(id, edit)?;
    ctx.store.save(&deck)?;

    tracing::info!("Edited card {}", id);
    writeln!(out, "Edited card #{id}.")?;
    Ok(())
}

/// Remove a card.
pub fn delete<W: Write>(ctx: &CommandContext, id: i64, out: &mut W) -> anyhow::Result<()> {
    let mut deck = ctx.store.load()?;
    deck.delete(id)?;
    ctx.store
        .save(&deck)
        .with_context(|| format!("card #{id} was not deleted"))?;

    tracing::info!("Deleted card {}", id);
    writeln!(out, "Deleted card #{id}.")?;
    Ok(())
}

fn write_card<W: Write>(out: &mut W, card: &Card) -> std::io::Result<()> {
    writeln!(
        out,
        "#{} | due {} | rep {} | ease {:.2}\nQ: {}\nA: {}\n",
        card.id, card.due_date, card.repetitions, card.ease_factor, card.question, card.answer
    )
}
