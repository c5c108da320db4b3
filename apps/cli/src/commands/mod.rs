//! Subcommand handlers.
//!
//! Handlers load the deck, call into studypal-core, persist when something
//! changed and render to the given writer.

pub mod deck;
pub mod stats;
pub mod study;

use crate::cli::{Command, OutputFormat};
use crate::storage::DeckStore;
use chrono::NaiveDate;
use std::io::{BufRead, Write};

/// What every handler needs for one invocation.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub store: DeckStore,
    pub today: NaiveDate,
    pub forecast_days: usize,
    pub format: OutputFormat,
}

/// Dispatch a parsed command.
pub fn run<R: BufRead, W: Write>(
    command: Command,
    ctx: &CommandContext,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::Add { question, answer } => deck::add(ctx, &question, &answer, out),
        Command::Practice => study::practice(ctx, input, out).map(|_| ()),
        Command::Stats { .. } => stats::stats(ctx, out),
        Command::List => deck::list(ctx, out),
        Command::Due => deck::due(ctx, out),
        Command::Edit {
            id,
            question,
            answer,
        } => deck::edit(ctx, id, question, answer, out),
        Command::Delete { id } => deck::delete(ctx, id, out),
    }
}

fn write_json<W: Write, T: serde::Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
