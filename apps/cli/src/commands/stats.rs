//! Deck statistics command.

use super::{write_json, CommandContext};
use crate::cli::OutputFormat;
use serde::Serialize;
use std::io::Write;
use studypal_core::{forecast, stats as deck_stats, DeckStats, ForecastDay};

#[derive(Debug, Serialize)]
struct StatsReport {
    #[serde(flatten)]
    stats: DeckStats,
    forecast: Vec<ForecastDay>,
}

/// Print totals and the upcoming review load.
pub fn stats<W: Write>(ctx: &CommandContext, out: &mut W) -> anyhow::Result<()> {
    let deck = ctx.store.load()?;
    let report = StatsReport {
        stats: deck_stats(&deck, ctx.today),
        forecast: forecast(&deck, ctx.today, ctx.forecast_days)?,
    };

    if ctx.format == OutputFormat::Json {
        return write_json(out, &report);
    }

    let s = &report.stats;
    writeln!(out, "== StudyPal Stats ==")?;
    writeln!(out, "Total cards: {}", s.total_cards)?;
    writeln!(out, "Due today: {}", s.due_today)?;
    writeln!(out, "Learned (rep>=2): {}", s.learned_cards)?;
    writeln!(out, "Never reviewed: {}", s.new_cards)?;
    writeln!(out, "Average ease: {:.2}", s.average_ease)?;

    writeln!(out, "\nReviews coming up (next {} days):", report.forecast.len())?;
    for (offset, day) in report.forecast.iter().enumerate() {
        let label = if offset == 0 {
            "today".to_string()
        } else {
            format!("+{offset}d")
        };
        writeln!(out, "{label:>5}: {:3} {}", day.due, "█".repeat(day.due))?;
    }
    Ok(())
}
