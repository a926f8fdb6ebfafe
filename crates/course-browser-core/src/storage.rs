// SPDX-License-Identifier: AGPL-3.0
// Course Browser Core - Key-value storage
//
// Selection slices are stored as JSON strings under one key each.
// FileStore keeps every key in a single local JSON file.

use crate::types::AppError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// String key-value store used to persist selection slices
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}

/// Volatile store, for tests and sessions that should not leave a trace
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let values = self.values.read().map_err(|_| lock_poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut values = self.values.write().map_err(|_| lock_poisoned())?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store, cached in memory and rewritten on every change
pub struct FileStore {
    values: RwLock<BTreeMap<String, String>>,
    file_path: PathBuf,
}

impl FileStore {
    /// Open the store at the default location in the user's config dir
    pub fn new() -> Result<Self, AppError> {
        let file_path = Self::get_state_path()?;
        Self::open(&file_path)
    }

    /// Open the store at an explicit path, loading it if it exists
    pub fn open(path: &Path) -> Result<Self, AppError> {
        tracing::info!("State file path: {:?}", path);

        let values = if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| AppError::FileIo(format!("Failed to read state: {}", e)))?;

            serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse state file, starting empty: {}", e);
                BTreeMap::new()
            })
        } else {
            tracing::info!("No state file found, starting empty");
            BTreeMap::new()
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::FileIo(format!("Failed to create state dir: {}", e)))?;
        }

        Ok(Self {
            values: RwLock::new(values),
            file_path: path.to_path_buf(),
        })
    }

    /// Get the path to the state file
    fn get_state_path() -> Result<PathBuf, AppError> {
        let config_dir = directories::ProjectDirs::from("org", "coursebrowser", "course-browser")
            .ok_or_else(|| AppError::FileIo("Could not determine config directory".to_string()))?
            .config_dir()
            .to_path_buf();

        Ok(config_dir.join("state.json"))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Persist all values to disk
    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), AppError> {
        let content = serde_json::to_string_pretty(values)
            .map_err(|e| AppError::Serialization(format!("Failed to serialize state: {}", e)))?;

        fs::write(&self.file_path, content)
            .map_err(|e| AppError::FileIo(format!("Failed to write state: {}", e)))?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let values = self.values.read().map_err(|_| lock_poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut values = self.values.write().map_err(|_| lock_poisoned())?;
        values.insert(key.to_string(), value.to_string());
        self.persist(&values)
    }
}

fn lock_poisoned() -> AppError {
    AppError::FileIo("State lock poisoned".to_string())
}
