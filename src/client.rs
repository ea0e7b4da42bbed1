//! HTTP client for the Taskdeck service
//!
//! [`ApiClient`] wraps every outbound call: it attaches the bearer
//! credential when one is present in the profile store, requires JSON
//! responses, parses the uniform `{success, data, error}` envelope, and
//! normalizes all failures into [`TaskdeckError`] kinds.
//!
//! There is deliberately no retry, backoff, or per-request timeout policy
//! here; only the client-wide timeout applies.

use crate::error::{Result, TaskdeckError};
use crate::storage::{keys, ProfileStore};
use crate::types::{
    AuthPayload, ChatReply, ChatRequest, Envelope, ErrorDetail, IdentityPayload, Todo, TodoDraft,
    TodoPatch, User,
};

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Client for the Taskdeck HTTP API.
///
/// Cloning is cheap: the underlying reqwest client and the profile store
/// are both reference-counted, so the session store and the task store can
/// each hold their own handle.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use taskdeck::client::ApiClient;
/// use taskdeck::storage::FileStore;
///
/// # async fn example() -> taskdeck::error::Result<()> {
/// let store = Arc::new(FileStore::new()?);
/// let client = ApiClient::new("http://localhost:8000", 30, store)?;
/// let todos = client.list_todos().await?;
/// println!("{} todos", todos.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn ProfileStore>,
}

impl ApiClient {
    /// Create a new client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskdeckError::Network`] if the HTTP client cannot be
    /// initialized.
    pub fn new(
        base_url: impl Into<String>,
        timeout_seconds: u64,
        store: Arc<dyn ProfileStore>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("taskdeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                TaskdeckError::Network(format!("Failed to create HTTP client: {}", e))
            })?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        tracing::debug!("Initialized API client for {}", base_url);

        Ok(Self {
            http,
            base_url,
            store,
        })
    }

    /// The base URL this client dispatches to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Dispatch a request and parse the response envelope.
    ///
    /// Normalization rules, in order:
    /// - transport failure → [`TaskdeckError::Network`]
    /// - non-JSON `Content-Type` → [`TaskdeckError::InvalidResponse`]
    /// - body that does not parse as an envelope → `InvalidResponse`
    /// - non-success status OR `success: false` → [`TaskdeckError::Api`]
    ///   with code/message/details from the envelope's error object, or
    ///   generic defaults when it carries none
    async fn dispatch<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Envelope<T>> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url);

        if let Some(token) = self.store.get(keys::ACCESS_TOKEN)? {
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TaskdeckError::Network(e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("application/json") {
            return Err(TaskdeckError::InvalidResponse(format!(
                "expected JSON response but got '{}' (status {})",
                content_type, status
            ))
            .into());
        }

        let raw = response
            .text()
            .await
            .map_err(|e| TaskdeckError::Network(e.to_string()))?;

        let envelope: Envelope<T> = serde_json::from_str(&raw).map_err(|e| {
            TaskdeckError::InvalidResponse(format!("malformed envelope: {}", e))
        })?;

        if !status.is_success() || !envelope.success {
            let detail = envelope.error.unwrap_or_else(ErrorDetail::default);
            tracing::debug!("API error {}: {}", detail.code, detail.message);
            return Err(TaskdeckError::Api {
                code: detail.code,
                message: detail.message,
                details: detail.details,
            }
            .into());
        }

        Ok(envelope)
    }

    /// Dispatch a request whose success payload is required.
    pub async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let envelope: Envelope<T> = self.dispatch(method, path, body).await?;
        envelope.data.ok_or_else(|| {
            TaskdeckError::InvalidResponse("successful envelope carried no data".to_string())
                .into()
        })
    }

    /// Dispatch a request whose success payload, if any, is discarded.
    async fn request_no_data<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<()> {
        let _: Envelope<serde_json::Value> = self.dispatch(method, path, body).await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Authentication endpoints
    // -----------------------------------------------------------------------

    /// `POST /api/auth/register`
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthPayload> {
        let body = serde_json::json!({"email": email, "password": password});
        self.request(Method::POST, "/api/auth/register", Some(&body))
            .await
    }

    /// `POST /api/auth/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload> {
        let body = serde_json::json!({"email": email, "password": password});
        self.request(Method::POST, "/api/auth/login", Some(&body))
            .await
    }

    /// `POST /api/auth/logout`
    pub async fn logout(&self) -> Result<()> {
        self.request_no_data::<()>(Method::POST, "/api/auth/logout", None)
            .await
    }

    /// `GET /api/auth/me`
    ///
    /// The identity comes nested under a `user` key, like the auth
    /// payloads; the wrapper is unwrapped here.
    pub async fn me(&self) -> Result<User> {
        let payload = self
            .request::<(), IdentityPayload>(Method::GET, "/api/auth/me", None)
            .await?;
        Ok(payload.user)
    }

    // -----------------------------------------------------------------------
    // Task endpoints
    // -----------------------------------------------------------------------

    /// `GET /api/todos`
    pub async fn list_todos(&self) -> Result<Vec<Todo>> {
        self.request::<(), Vec<Todo>>(Method::GET, "/api/todos", None)
            .await
    }

    /// `GET /api/todos/:id`
    pub async fn get_todo(&self, id: i64) -> Result<Todo> {
        self.request::<(), Todo>(Method::GET, &format!("/api/todos/{}", id), None)
            .await
    }

    /// `POST /api/todos`
    pub async fn create_todo(&self, draft: &TodoDraft) -> Result<Todo> {
        self.request(Method::POST, "/api/todos", Some(draft)).await
    }

    /// `PATCH /api/todos/:id`
    pub async fn update_todo(&self, id: i64, patch: &TodoPatch) -> Result<Todo> {
        self.request(Method::PATCH, &format!("/api/todos/{}", id), Some(patch))
            .await
    }

    /// `DELETE /api/todos/:id`
    pub async fn delete_todo(&self, id: i64) -> Result<()> {
        self.request_no_data::<()>(Method::DELETE, &format!("/api/todos/{}", id), None)
            .await
    }

    // -----------------------------------------------------------------------
    // Assistant endpoint
    // -----------------------------------------------------------------------

    /// `POST /api/:user_id/chat`
    pub async fn chat(&self, user_id: i64, request: &ChatRequest) -> Result<ChatReply> {
        self.request(
            Method::POST,
            &format!("/api/{}/chat", user_id),
            Some(request),
        )
        .await
    }
}
