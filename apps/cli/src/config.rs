//! Runtime settings: defaults, environment overrides, command-line overrides.

use anyhow::{bail, Context};
use std::path::PathBuf;
use studypal_core::MAX_FORECAST_DAYS;

const APP_DIR: &str = "studypal";
const DECK_FILE: &str = "deck.json";
const FALLBACK_DECK_PATH: &str = "studypal_deck.json";

pub const ENV_DECK: &str = "STUDYPAL_DECK";
pub const ENV_RESET_HOUR: &str = "STUDYPAL_RESET_HOUR";
pub const ENV_FORECAST_DAYS: &str = "STUDYPAL_FORECAST_DAYS";

/// Effective settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub deck_path: PathBuf,
    /// Hour of day (0-23) when a new study day begins.
    pub daily_reset_hour: u32,
    /// Days shown in the stats forecast, today included.
    pub forecast_days: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            deck_path: default_deck_path(),
            daily_reset_hour: 0,
            forecast_days: 8,
        }
    }
}

impl Settings {
    /// Defaults overridden by `STUDYPAL_*` environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(path) = lookup(ENV_DECK).filter(|p| !p.trim().is_empty()) {
            settings.deck_path = PathBuf::from(path);
        }
        if let Some(hour) = lookup(ENV_RESET_HOUR) {
            settings.daily_reset_hour = hour
                .trim()
                .parse()
                .with_context(|| format!("{ENV_RESET_HOUR} must be a number, got {hour:?}"))?;
        }
        if let Some(days) = lookup(ENV_FORECAST_DAYS) {
            settings.forecast_days = days
                .trim()
                .parse()
                .with_context(|| format!("{ENV_FORECAST_DAYS} must be a number, got {days:?}"))?;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(
        mut self,
        deck_path: Option<PathBuf>,
        forecast_days: Option<usize>,
    ) -> anyhow::Result<Self> {
        if let Some(path) = deck_path {
            self.deck_path = path;
        }
        if let Some(days) = forecast_days {
            self.forecast_days = days;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.daily_reset_hour > 23 {
            bail!(
                "daily reset hour must be between 0 and 23, got {}",
                self.daily_reset_hour
            );
        }
        if self.forecast_days == 0 || self.forecast_days > MAX_FORECAST_DAYS {
            bail!(
                "forecast must cover between 1 and {MAX_FORECAST_DAYS} days, got {}",
                self.forecast_days
            );
        }
        Ok(())
    }
}

fn default_deck_path() -> PathBuf {
    // Use the user's data directory, fall back to the working directory
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR).join(DECK_FILE))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DECK_PATH))
}
