//! Test utilities for Taskdeck
//!
//! This module provides common test utilities: an in-memory profile store
//! and sample record builders.

use crate::error::Result;
use crate::storage::ProfileStore;
use crate::types::{Todo, User};
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory [`ProfileStore`] for tests that must not touch the
/// filesystem.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().expect("store lock").get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .expect("store lock")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.lock().expect("store lock").remove(key);
        Ok(())
    }
}

/// A user record with a fixed creation timestamp.
pub fn sample_user(id: i64, email: &str) -> User {
    User {
        id,
        email: email.to_string(),
        created_at: Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
    }
}

/// A pending medium-priority task owned by user 1.
pub fn sample_todo(id: i64, title: &str) -> Todo {
    Todo {
        id,
        user_id: 1,
        title: title.to_string(),
        description: None,
        completed: false,
        priority: Default::default(),
        tags: None,
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("k").unwrap().is_none());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn test_sample_builders() {
        let user = sample_user(3, "x@y.z");
        assert_eq!(user.id, 3);
        let todo = sample_todo(9, "Write tests");
        assert_eq!(todo.id, 9);
        assert!(!todo.completed);
    }
}
