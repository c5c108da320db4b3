pub mod cli;
pub mod commands;
pub mod config;
pub mod date_utils;
pub mod storage;

use std::io;

use crate::cli::{Cli, Command};
use crate::commands::CommandContext;
use crate::config::Settings;
use crate::storage::DeckStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr log subscriber, filtered by `RUST_LOG` (default `warn`).
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Resolve settings for a parsed command line.
pub fn resolve_context(cli: &Cli, settings: Settings) -> anyhow::Result<CommandContext> {
    let days = match cli.command {
        Command::Stats { days } => days,
        _ => None,
    };
    let settings = settings.with_overrides(cli.deck.clone(), days)?;
    let today = cli
        .today
        .unwrap_or_else(|| date_utils::get_adjusted_today(settings.daily_reset_hour));

    tracing::debug!("Using deck {} for {}", settings.deck_path.display(), today);

    Ok(CommandContext {
        store: DeckStore::new(settings.deck_path),
        today,
        forecast_days: settings.forecast_days,
        format: cli.format,
    })
}

/// Run one command against stdin/stdout.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::from_env()?;
    let ctx = resolve_context(&cli, settings)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    commands::run(cli.command, &ctx, &mut stdin.lock(), &mut stdout.lock())
}
