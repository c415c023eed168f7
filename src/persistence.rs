//! Snapshot stores
//!
//! A store keeps at most one saved game. [`JsonFileStore`] writes it to disk
//! as pretty JSON; [`MemoryStore`] keeps it in memory for tests and for
//! callers that only need an in-process checkpoint.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::game::GameSnapshot;

/// Somewhere a [`GameSnapshot`] can be saved and loaded again.
pub trait SnapshotStore {
    fn save(&mut self, snapshot: &GameSnapshot) -> Result<(), StoreError>;

    /// The last saved snapshot, or `None` if nothing usable is stored.
    fn load(&self) -> Option<GameSnapshot>;
}

/// Snapshot stored as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read(&self) -> Result<GameSnapshot, StoreError> {
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl SnapshotStore for JsonFileStore {
    fn save(&mut self, snapshot: &GameSnapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        // Write beside the target, then rename over it
        let tmp = self.temp_path();
        fs::write(&tmp, json)?;
        if let Err(err) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        info!(path = %self.path.display(), moves = snapshot.move_count, "game saved");
        Ok(())
    }

    fn load(&self) -> Option<GameSnapshot> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no save file");
            return None;
        }
        match self.read() {
            Ok(snapshot) => {
                info!(path = %self.path.display(), moves = snapshot.move_count, "game loaded");
                Some(snapshot)
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "unreadable save file");
                None
            }
        }
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Option<GameSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, snapshot: &GameSnapshot) -> Result<(), StoreError> {
        self.saved = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Option<GameSnapshot> {
        self.saved.clone()
    }
}
