use std::path::{Path, PathBuf};
use std::{env, fs};

use recite_core::{Deck, export_json, import_json};

use crate::error::{Result, StoreError};

/// Default base directory for all recite storage.
pub fn default_base_dir() -> PathBuf {
    dirs_home().join(".recite")
}

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// File-backed deck storage under one base directory.
///
/// Layout:
/// ```text
/// ~/.recite/
/// ├── deck.json       snapshot of both collections
/// ├── deck.json.tmp   transient, only during a save
/// ├── config.toml
/// └── examples.json   local example database
/// ```
pub struct DeckStore {
    base: PathBuf,
}

impl DeckStore {
    /// Open a store rooted at `base_dir` (or the default), creating the
    /// directory as needed.
    pub fn open(base_dir: Option<&Path>) -> Result<Self> {
        let base = base_dir.map(PathBuf::from).unwrap_or_else(default_base_dir);
        fs::create_dir_all(&base).map_err(|e| {
            StoreError::InvalidData(format!("failed to create {}: {e}", base.display()))
        })?;
        Ok(Self { base })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.base.join("deck.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.base.join("config.toml")
    }

    pub fn examples_path(&self) -> PathBuf {
        self.base.join("examples.json")
    }

    /// Load the deck snapshot.
    ///
    /// Missing, unreadable, or malformed files fail soft: the condition
    /// is logged and an empty deck is returned, so a damaged snapshot
    /// never takes the whole program down. A snapshot that parses but
    /// violates the mastery invariant is a hard error; resetting it
    /// would silently discard real learning state.
    pub fn load(&self) -> Result<Deck> {
        let path = self.snapshot_path();
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no snapshot at {}, starting empty", path.display());
                return Ok(Deck::new());
            }
            Err(e) => {
                tracing::warn!("unreadable snapshot {}: {e}, starting empty", path.display());
                return Ok(Deck::new());
            }
        };

        let deck = match import_json(&json) {
            Ok(deck) => deck,
            Err(e) => {
                tracing::warn!("malformed snapshot {}: {e}, starting empty", path.display());
                return Ok(Deck::new());
            }
        };

        deck.check_integrity()?;
        Ok(deck)
    }

    /// Persist the deck as one atomic snapshot-replace: write the full
    /// JSON to a sibling temp file, then rename over the target, so a
    /// crash mid-write cannot leave a half-written snapshot.
    pub fn save(&self, deck: &Deck) -> Result<()> {
        let path = self.snapshot_path();
        let tmp = path.with_extension("json.tmp");

        let json = export_json(deck)
            .map_err(|e| StoreError::InvalidData(format!("snapshot serialization failed: {e}")))?;
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(
            "saved snapshot: {} active, {} mastered",
            deck.active.len(),
            deck.mastered.len()
        );
        Ok(())
    }
}
