//! JSON persistence for the deck.

mod error;

pub use error::StorageError;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use studypal_core::{Card, Deck};

type Result<T> = std::result::Result<T, StorageError>;

/// On-disk shape of the deck file.
#[derive(Debug, Deserialize)]
struct DeckFile {
    #[serde(default)]
    next_id: Option<i64>,
    #[serde(default)]
    cards: Vec<Card>,
}

/// Reads and writes a deck at a fixed path.
#[derive(Debug, Clone)]
pub struct DeckStore {
    path: PathBuf,
}

impl DeckStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the deck, or an empty one if the file does not exist yet.
    pub fn load(&self) -> Result<Deck> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No deck at {}, starting empty", self.path.display());
                return Ok(Deck::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let file: DeckFile = serde_json::from_str(&content).map_err(|source| StorageError::Format {
            path: self.path.clone(),
            source,
        })?;

        // Older files may lack the counter; validation moves it past the highest id.
        let next_id = file.next_id.unwrap_or(0);
        let (deck, repairs) = Deck::from_parts(next_id, file.cards)?;

        if !repairs.is_empty() {
            if repairs.next_id_bumped && file.next_id.is_some() {
                tracing::warn!("Deck counter was behind its cards, moved to {}", deck.next_id());
            }
            if !repairs.clamped_ease.is_empty() {
                tracing::warn!(
                    "Raised ease to the minimum for cards {:?}",
                    repairs.clamped_ease
                );
            }
        }
        tracing::debug!("Loaded {} cards from {}", deck.len(), self.path.display());
        Ok(deck)
    }

    /// Write the deck, replacing the file atomically.
    pub fn save(&self, deck: &Deck) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(deck).map_err(|source| StorageError::Format {
            path: self.path.clone(),
            source,
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        if let Err(e) = replace_with(&tmp_path, &self.path, json.as_bytes()) {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Could not remove {}: {}", tmp_path.display(), cleanup);
                }
            }
            return Err(self.io_error(e));
        }

        tracing::debug!("Saved {} cards to {}", deck.len(), self.path.display());
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Write `contents` to `tmp_path`, then move it over `path`.
fn replace_with(tmp_path: &Path, path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut tmp = fs::File::create(tmp_path)?;
    tmp.write_all(contents)?;
    tmp.write_all(b"\n")?;
    tmp.sync_all()?;
    drop(tmp);
    fs::rename(tmp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use studypal_core::{CoreError, Grade, Sm2};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn missing_file_loads_empty_deck() {
        let dir = tempfile::tempdir().unwrap();
        let store = DeckStore::new(dir.path().join("deck.json"));
        let deck = store.load().unwrap();
        assert!(deck.is_empty());
        assert_eq!(deck.next_id(), 1);
    }

    #[test]
    fn save_then_load_keeps_cards_and_counter() {
        let dir = tempfile::tempdir().unwrap();
        let store = DeckStore::new(dir.path().join("nested").join("deck.json"));

        let mut deck = Deck::new();
        deck.add("Q1", "A1", today()).unwrap();
        deck.add("Q2", "A2", today()).unwrap();
        deck.review(1, Grade::new(5).unwrap(), today(), &Sm2::default())
            .unwrap();
        deck.delete(2).unwrap();
        store.save(&deck).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.next_id(), 3);
        assert_eq!(loaded.len(), 1);
        let (saved, card) = (deck.get(1).unwrap(), loaded.get(1).unwrap());
        assert_eq!(card.question, saved.question);
        assert_eq!(card.repetitions, 1);
        assert_eq!(card.due_date, saved.due_date);
        assert_eq!(card.last_reviewed, Some(today()));
        assert!((card.ease_factor - saved.ease_factor).abs() < 1e-9);
        assert!(!dir.path().join("nested").join("deck.json.tmp").exists());
    }

    #[test]
    fn loads_file_without_counter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        fs::write(
            &path,
            r#"{"cards": [{"id": 4, "question": "Q", "answer": "A", "repetitions": 0,
                "interval": 0, "ease": 2.5, "due": "2024-06-01", "created": "2024-06-01",
                "last_review": null}]}"#,
        )
        .unwrap();

        let deck = DeckStore::new(&path).load().unwrap();
        assert_eq!(deck.next_id(), 5);
        assert_eq!(deck.get(4).unwrap().last_reviewed, None);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        let card = r#"{"id": 1, "question": "Q", "answer": "A", "repetitions": 0,
            "interval": 0, "ease": 2.5, "due": "2024-06-01", "created": "2024-06-01"}"#;
        fs::write(&path, format!(r#"{{"next_id": 2, "cards": [{card}, {card}]}}"#)).unwrap();

        let err = DeckStore::new(&path).load().unwrap_err();
        assert!(matches!(
            err,
            StorageError::InvalidData(CoreError::DuplicateId(1))
        ));
    }

    #[test]
    fn failed_save_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the deck's place makes the final rename fail.
        let path = dir.path().join("deck.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let mut deck = Deck::new();
        deck.add("Q1", "A1", today()).unwrap();
        let err = DeckStore::new(&path).save(&deck).unwrap_err();

        assert!(matches!(err, StorageError::Io { .. }));
        assert!(!dir.path().join("deck.json.tmp").exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn garbage_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            DeckStore::new(&path).load(),
            Err(StorageError::Format { .. })
        ));
    }
}
