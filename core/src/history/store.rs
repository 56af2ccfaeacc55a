//! History persistence

use crate::error::{HistoryError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
#[cfg(any(test, feature = "testing"))]
use std::sync::Mutex;

/// Name of the JSON slot holding the history list
pub const HISTORY_SLOT: &str = "searchHistory";

const HISTORY_DIR_NAME: &str = "jumpsearch";
const HISTORY_FILE_NAME: &str = "history.json";

/// Persists the ordered list of search terms
pub trait HistoryStore {
    /// Stored terms, most recent first; empty when nothing was stored yet
    fn load(&self) -> Result<Vec<String>>;

    fn save(&self, entries: &[String]) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(rename = "searchHistory", default)]
    search_history: Vec<String>,
}

/// History kept in a small JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location under the user's config directory
    pub fn at_default_location() -> Self {
        Self::new(Self::default_path())
    }

    /// `<config dir>/jumpsearch/history.json`
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(HISTORY_DIR_NAME);
        path.push(HISTORY_FILE_NAME);
        path
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn path_string(&self) -> String {
        self.path.display().to_string()
    }
}

impl HistoryStore for JsonHistoryStore {
    fn load(&self) -> Result<Vec<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No history at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(HistoryError::Read {
                    path: self.path_string(),
                    message: e.to_string(),
                }
                .into())
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let file: HistoryFile = serde_json::from_str(&content).map_err(|e| HistoryError::Corrupt {
            path: self.path_string(),
            message: e.to_string(),
        })?;

        Ok(file.search_history)
    }

    fn save(&self, entries: &[String]) -> Result<()> {
        let write_error = |e: io::Error| HistoryError::Write {
            path: self.path_string(),
            message: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_error)?;
            }
        }

        let file = HistoryFile {
            search_history: entries.to_vec(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, content).map_err(write_error)?;

        tracing::debug!("Saved {} history entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

/// In-memory history for tests
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    entries: Mutex<Vec<String>>,
    fail_saves: bool,
}

#[cfg(any(test, feature = "testing"))]
impl MemoryHistoryStore {
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: Mutex::new(entries.into_iter().map(Into::into).collect()),
            fail_saves: false,
        }
    }

    /// A store whose saves always fail
    pub fn failing() -> Self {
        Self {
            entries: Mutex::default(),
            fail_saves: true,
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "testing"))]
impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Result<Vec<String>> {
        Ok(self.entries())
    }

    fn save(&self, entries: &[String]) -> Result<()> {
        if self.fail_saves {
            return Err(HistoryError::Write {
                path: "<memory>".to_string(),
                message: "store is read-only".to_string(),
            }
            .into());
        }
        if let Ok(mut stored) = self.entries.lock() {
            *stored = entries.to_vec();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonHistoryStore::new(dir.path().join("history.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_creates_parent_and_uses_history_slot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("history.json");
        let store = JsonHistoryStore::new(&path);

        store.save(&["b".to_string(), "a".to_string()]).unwrap();

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[HISTORY_SLOT], serde_json::json!(["b", "a"]));
        assert_eq!(store.load().unwrap(), vec!["b", "a"]);
    }

    #[test]
    fn test_missing_slot_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, r#"{"other": 1}"#).unwrap();

        assert!(JsonHistoryStore::new(&path).load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "not json").unwrap();

        let err = JsonHistoryStore::new(&path).load().unwrap_err();
        assert!(matches!(err, Error::History(HistoryError::Corrupt { .. })));
    }

    #[test]
    fn test_default_path_ends_with_history_file() {
        let path = JsonHistoryStore::default_path();
        assert!(path.ends_with("jumpsearch/history.json"));
    }

    #[test]
    fn test_failing_memory_store() {
        let store = MemoryHistoryStore::failing();
        assert!(store.save(&["x".to_string()]).is_err());
        assert!(store.entries().is_empty());
    }
}
