//! Task store for Taskdeck
//!
//! A thin consumer of [`ApiClient`] that caches the authenticated user's
//! task collection in memory. The cache is a possibly-stale mirror of
//! server state: every mutation takes the server's post-mutation record as
//! authoritative and reconciles the cache from it.
//!
//! All mutating operations share one loading flag for the duration of the
//! call. Ordering within the cache is whatever the server returned, except
//! that newly created tasks are prepended (newest-first display
//! convention).

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{Todo, TodoDraft, TodoPatch};

/// In-memory cache of the current user's tasks with derived state.
pub struct TodoStore {
    client: ApiClient,
    todos: Vec<Todo>,
    loading: bool,
    error: Option<String>,
}

impl TodoStore {
    /// Create an empty store over the given client.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            todos: Vec::new(),
            loading: false,
            error: None,
        }
    }

    /// Replace the entire cache with the server's current collection.
    ///
    /// No client-side resort; the server's order is preserved.
    pub async fn fetch_all(&mut self) -> Result<&[Todo]> {
        self.begin();
        match self.client.list_todos().await {
            Ok(todos) => {
                self.todos = todos;
                self.loading = false;
                Ok(&self.todos)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Create a task and prepend the server-confirmed record.
    pub async fn create(&mut self, draft: &TodoDraft) -> Result<Todo> {
        self.begin();
        match self.client.create_todo(draft).await {
            Ok(todo) => {
                self.todos.insert(0, todo.clone());
                self.loading = false;
                Ok(todo)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Fetch a single task by id without touching the loading flag.
    ///
    /// The record is not merged into the cache; callers that want the
    /// cache updated go through [`TodoStore::update`].
    pub async fn get(&mut self, id: i64) -> Result<Todo> {
        match self.client.get_todo(id).await {
            Ok(todo) => {
                self.error = None;
                Ok(todo)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Apply a partial update; the server's record replaces the cached one
    /// in place.
    pub async fn update(&mut self, id: i64, patch: &TodoPatch) -> Result<Todo> {
        self.begin();
        match self.client.update_todo(id, patch).await {
            Ok(todo) => {
                self.replace(id, todo.clone());
                self.loading = false;
                Ok(todo)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Invert a task's completion flag.
    ///
    /// Re-fetches the individual record first and toggles the server's
    /// current value rather than the cached one, so cache drift can never
    /// flip a task the wrong way. Costs an extra round trip.
    pub async fn toggle_complete(&mut self, id: i64) -> Result<Todo> {
        self.begin();

        let current = match self.client.get_todo(id).await {
            Ok(todo) => todo,
            Err(e) => return Err(self.fail(e)),
        };

        let patch = TodoPatch {
            completed: Some(!current.completed),
            ..Default::default()
        };

        match self.client.update_todo(id, &patch).await {
            Ok(todo) => {
                self.replace(id, todo.clone());
                self.loading = false;
                Ok(todo)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Delete a task; the cached record is removed only after the server
    /// confirms. On failure the record remains and the error is recorded.
    pub async fn delete(&mut self, id: i64) -> Result<()> {
        self.begin();
        match self.client.delete_todo(id).await {
            Ok(()) => {
                self.todos.retain(|t| t.id != id);
                self.loading = false;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// The cached collection, in display order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// True while an operation is in flight. Shared across all operations.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message from the last failed operation, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fail(&mut self, e: anyhow::Error) -> anyhow::Error {
        self.loading = false;
        self.error = Some(e.to_string());
        e
    }

    fn replace(&mut self, id: i64, todo: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|t| t.id == id) {
            *slot = todo;
        }
    }
}
