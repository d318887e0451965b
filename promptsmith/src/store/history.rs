use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::Result;
use crate::models::{HistoryEntry, MAX_HISTORY_ITEMS};

const HISTORY_FILE: &str = "promptsmith-history.json";

/// File-backed, append-only execution log. Newest entry first, capped at
/// [`MAX_HISTORY_ITEMS`] with FIFO eviction.
pub struct HistoryStore {
    path: PathBuf,
    entries: Mutex<Vec<HistoryEntry>>,
}

impl HistoryStore {
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join(HISTORY_FILE);
        Self {
            entries: Mutex::new(load_entries(&path)),
            path,
        }
    }

    /// Prepend an entry, evicting the oldest past the cap.
    pub fn append(&self, entry: HistoryEntry) -> Result<HistoryEntry> {
        let mut entries = self.lock();
        entries.insert(0, entry.clone());
        entries.truncate(MAX_HISTORY_ITEMS);
        persist(&self.path, &entries)?;
        Ok(entry)
    }

    /// All entries, newest first.
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove one entry. Returns whether it existed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            return Ok(false);
        }

        persist(&self.path, &entries)?;
        Ok(true)
    }

    /// Drop everything, including the on-disk document.
    pub fn clear(&self) -> Result<()> {
        let mut entries = self.lock();
        entries.clear();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<HistoryEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn load_entries(path: &Path) -> Vec<HistoryEntry> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            if error.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %error, "Failed to read history, starting empty");
            }
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!(path = %path.display(), error = %error, "Corrupt history file, starting empty");
            Vec::new()
        }
    }
}

fn persist(path: &Path, entries: &[HistoryEntry]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(entries)?)?;
    Ok(())
}
