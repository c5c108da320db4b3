//! Shared setup for command tests.
//!
//! Each `TestContext` owns a temporary directory holding its own deck file,
//! so tests never touch the user's real deck.

#![allow(dead_code)]

pub mod fixtures;

use chrono::NaiveDate;
use clap::Parser;
use std::io::Cursor;
use std::path::PathBuf;
use studypal::cli::Cli;
use studypal::commands::{self, CommandContext};
use studypal::config::Settings;
use studypal::storage::DeckStore;
use studypal_core::Deck;
use tempfile::TempDir;

pub struct TestContext {
    _dir: TempDir,
    pub deck_path: PathBuf,
}

/// Output of one command run.
pub struct RunOutput {
    pub result: anyhow::Result<()>,
    pub stdout: String,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let deck_path = dir.path().join("deck.json");
        Self {
            _dir: dir,
            deck_path,
        }
    }

    pub fn store(&self) -> DeckStore {
        DeckStore::new(&self.deck_path)
    }

    pub fn deck(&self) -> Deck {
        self.store().load().expect("load deck")
    }

    /// Run `studypal <args>` on `today`, feeding `input` as stdin.
    pub fn run_with_input(&self, today: NaiveDate, args: &[&str], input: &str) -> RunOutput {
        let deck = self.deck_path.to_string_lossy().into_owned();
        let today = today.format("%Y-%m-%d").to_string();
        let argv = ["studypal", "--deck", deck.as_str(), "--today", today.as_str()]
            .into_iter()
            .chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).expect("valid arguments");

        let ctx: CommandContext =
            studypal::resolve_context(&cli, Settings::default()).expect("resolve context");

        let mut stdin = Cursor::new(input.as_bytes().to_vec());
        let mut stdout = Vec::new();
        let result = commands::run(cli.command, &ctx, &mut stdin, &mut stdout);
        RunOutput {
            result,
            stdout: String::from_utf8(stdout).expect("utf-8 output"),
        }
    }

    pub fn run(&self, today: NaiveDate, args: &[&str]) -> RunOutput {
        self.run_with_input(today, args, "")
    }

    /// Run a command that must succeed and return its output.
    pub fn ok(&self, today: NaiveDate, args: &[&str]) -> String {
        let output = self.run(today, args);
        if let Err(e) = output.result {
            panic!("studypal {args:?} failed: {e:#}");
        }
        output.stdout
    }
}
