//! Durable session storage.
//!
//! Two entries are kept: [`TOKEN_KEY`] holds the bearer token and
//! [`USER_KEY`] holds the user record serialized as a JSON string. The file
//! store writes `~/.taskdeck/session.json` with permissions 0o600.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::errors::SessionError;

/// Key of the bearer token entry.
pub const TOKEN_KEY: &str = "auth_token";
/// Key of the serialized user entry.
pub const USER_KEY: &str = "auth_user";

/// Current on-disk format version.
const STORAGE_VERSION: u32 = 1;

/// Durable key/value storage for session entries.
///
/// Implementations are shared process-wide; writes are last-write-wins.
pub trait SessionStore: Send + Sync {
    /// Read an entry.
    fn get(&self, key: &str) -> Option<String>;

    /// Write an entry.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Delete an entry. Deleting a missing entry is not an error.
    fn remove(&self, key: &str) -> Result<(), SessionError>;

    /// Write several entries as one unit: on error, none of them change.
    ///
    /// The default writes one at a time and restores the earlier values
    /// when a write fails.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), SessionError> {
        let previous: Vec<(&str, Option<String>)> =
            entries.iter().map(|(key, _)| (*key, self.get(key))).collect();
        for (written, (key, value)) in entries.iter().enumerate() {
            if let Err(e) = self.set(key, value) {
                for (key, old) in &previous[..written] {
                    let restored = match old {
                        Some(old) => self.set(key, old),
                        None => self.remove(key),
                    };
                    if let Err(restore) = restored {
                        tracing::warn!(key, "failed to restore session entry: {restore}");
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File store
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntries {
    version: u32,
    entries: BTreeMap<String, String>,
    #[serde(default)]
    last_updated: String,
}

/// Session store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load entries. A missing, unreadable, or unsupported file reads as empty.
    fn load(&self) -> BTreeMap<String, String> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "failed to read session file: {e}");
                return BTreeMap::new();
            }
        };

        match serde_json::from_str::<StoredEntries>(&data) {
            Ok(stored) if stored.version == STORAGE_VERSION => stored.entries,
            Ok(stored) => {
                tracing::warn!("unsupported session file version: {}", stored.version);
                BTreeMap::new()
            }
            Err(e) => {
                tracing::warn!("failed to parse session file: {e}");
                BTreeMap::new()
            }
        }
    }

    fn save(&self, entries: BTreeMap<String, String>) -> Result<(), SessionError> {
        if entries.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(SessionError::Io(e)),
            };
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let stored = StoredEntries {
            version: STORAGE_VERSION,
            entries,
            last_updated: chrono::Utc::now().to_rfc3339(),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&self.path, perms);
        }

        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self.load();
        let _ = entries.insert(key.to_owned(), value.to_owned());
        self.save(entries)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = self.load();
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(entries)
    }

    fn set_many(&self, batch: &[(&str, &str)]) -> Result<(), SessionError> {
        let mut entries = self.load();
        for (key, value) in batch {
            let _ = entries.insert((*key).to_owned(), (*value).to_owned());
        }
        self.save(entries)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory store
// ─────────────────────────────────────────────────────────────────────────────

/// Session store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the store holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let _ = self
            .entries
            .lock()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let _ = self.entries.lock().remove(key);
        Ok(())
    }

    fn set_many(&self, batch: &[(&str, &str)]) -> Result<(), SessionError> {
        let mut entries = self.entries.lock();
        for (key, value) in batch {
            let _ = entries.insert((*key).to_owned(), (*value).to_owned());
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
