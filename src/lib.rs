//! Taskdeck - command-line client for the Taskdeck task-management service
//!
//! This library provides the client-side core of Taskdeck: the HTTP
//! request client, the session store, the task store, and the profile
//! persistence they share.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `client`: HTTP request dispatch with envelope parsing and error normalization
//! - `session`: authenticated identity, credential persistence, login/logout
//! - `todos`: in-memory task cache with CRUD and toggle operations
//! - `storage`: key-value profile persistence port and file implementation
//! - `types`: wire types for the API (envelope, user, task, chat)
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskdeck::client::ApiClient;
//! use taskdeck::session::Session;
//! use taskdeck::storage::FileStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(FileStore::new()?);
//!     let client = ApiClient::new("http://localhost:8000", 30, store.clone())?;
//!     let mut session = Session::new(client, store);
//!
//!     session.login("me@example.com", "hunter22").await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod todos;
pub mod types;

// Re-export commonly used types
pub use client::ApiClient;
pub use config::Config;
pub use error::{Result, TaskdeckError};
pub use session::Session;
pub use todos::TodoStore;
pub use types::{Priority, Todo, TodoDraft, TodoPatch, User};

#[cfg(test)]
pub mod test_utils;
