//! Profile storage for Taskdeck
//!
//! The credential, the cached identity snapshot, and the theme preference
//! are persisted as a small key-value profile. Store logic depends only on
//! the [`ProfileStore`] trait so it can be tested without touching the real
//! profile file.

use crate::error::{Result, TaskdeckError};
use anyhow::Context;
use directories::ProjectDirs;
use serde_json::{Map, Value};
use std::path::PathBuf;

pub mod keys;

/// Key-value port over the persistent profile.
///
/// Implementations must treat a missing key as `Ok(None)` and make
/// `remove` of a missing key a no-op, so callers never need to probe
/// before writing or clearing.
pub trait ProfileStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Missing keys are ignored.
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-backed profile store.
///
/// The profile is a flat JSON object in the user's data directory. Each
/// operation reads or rewrites the whole file; the profile holds three
/// short strings, so there is nothing worth caching.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store over the default profile location.
    ///
    /// The path can be overridden with the `TASKDECK_PROFILE` environment
    /// variable, which makes it easy to point the binary at a throwaway
    /// profile in tests without touching the user's real one.
    pub fn new() -> Result<Self> {
        if let Ok(override_path) = std::env::var("TASKDECK_PROFILE") {
            return Self::new_with_path(override_path);
        }

        let proj_dirs = ProjectDirs::from("com", "taskdeck", "taskdeck")
            .ok_or_else(|| TaskdeckError::Storage("Could not determine data directory".into()))?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .context("Failed to create data directory")
            .map_err(|e| TaskdeckError::Storage(e.to_string()))?;

        Ok(Self {
            path: data_dir.join("profile.json"),
        })
    }

    /// Create a store over the specified profile file.
    ///
    /// Primarily useful for tests where the default application data
    /// directory is not desirable (for example, a temporary directory).
    ///
    /// # Examples
    ///
    /// ```
    /// use taskdeck::storage::FileStore;
    ///
    /// let store = FileStore::new_with_path("/tmp/taskdeck_test_profile.json").unwrap();
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create parent directory for profile")
                .map_err(|e| TaskdeckError::Storage(e.to_string()))?;
        }

        Ok(Self { path })
    }

    /// The profile file this store reads and writes.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| TaskdeckError::Storage(format!("Failed to read profile: {}", e)))?;

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        let value: Value = serde_json::from_str(&contents)
            .map_err(|e| TaskdeckError::Storage(format!("Malformed profile file: {}", e)))?;

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(TaskdeckError::Storage("Profile file is not a JSON object".into()).into()),
        }
    }

    fn save(&self, map: &Map<String, Value>) -> Result<()> {
        let contents = serde_json::to_string_pretty(&Value::Object(map.clone()))?;
        std::fs::write(&self.path, contents)
            .map_err(|e| TaskdeckError::Storage(format!("Failed to write profile: {}", e)))?;
        Ok(())
    }
}

impl ProfileStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.load()?;
        Ok(map.get(key).and_then(|v| v.as_str()).map(String::from))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.save(&map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.save(&map)?;
        }
        Ok(())
    }
}
