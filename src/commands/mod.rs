/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes four command modules:

- `auth`  — register, login, logout, whoami
- `todos` — list, add, show, edit, toggle, delete
- `chat`  — the natural-language assistant
- `theme` — theme preference

These handlers are intentionally small and use the library components:
the API client, the session store, and the task store.
*/

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::storage::{FileStore, ProfileStore};

use std::sync::Arc;

pub mod auth;
pub mod chat;
pub mod theme;
pub mod todos;

/// Build the profile store configured for this invocation.
pub(crate) fn build_store(config: &Config) -> Result<Arc<dyn ProfileStore>> {
    let store: Arc<dyn ProfileStore> = match &config.profile.path {
        Some(path) => Arc::new(FileStore::new_with_path(path)?),
        None => Arc::new(FileStore::new()?),
    };
    Ok(store)
}

/// Build an API client over the given profile store.
pub(crate) fn build_client(config: &Config, store: Arc<dyn ProfileStore>) -> Result<ApiClient> {
    ApiClient::new(&config.api.base_url, config.api.timeout_seconds, store)
}

/// Read one line of input with the given prompt.
pub(crate) fn prompt_line(prompt: &str) -> Result<String> {
    let mut editor = rustyline::DefaultEditor::new()?;
    let line = editor.readline(prompt)?;
    Ok(line.trim().to_string())
}
