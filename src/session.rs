//! Session store for Taskdeck
//!
//! Owns the current authenticated identity. Constructed once at startup,
//! where it synchronously restores the credential and the cached identity
//! snapshot from the profile store; there is no startup round-trip to the
//! server, so the restored identity can be stale until the next `whoami`.
//!
//! The UI (the CLI command layer) reads session state through accessors and
//! never mutates it directly.

use crate::client::ApiClient;
use crate::error::Result;
use crate::storage::{keys, ProfileStore};
use crate::types::User;

use std::sync::Arc;

/// Derived view of the session: identity, in-flight flag, last error.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// The authenticated identity, or `None`
    pub user: Option<User>,
    /// True while a login/register call is in flight
    pub loading: bool,
    /// Human-readable message from the last failed operation
    pub error: Option<String>,
}

/// The client's record of the currently authenticated identity and
/// credential.
///
/// Login and register persist both the bearer token and an identity
/// snapshot; logout clears them unconditionally. Overlapping login calls
/// are not guarded; the last completed call wins.
pub struct Session {
    client: ApiClient,
    store: Arc<dyn ProfileStore>,
    state: SessionState,
}

impl Session {
    /// Build a session, restoring any persisted identity.
    ///
    /// A cached identity is only honored when a credential is also
    /// present; an identity snapshot without a token is treated as not
    /// authenticated. A corrupt snapshot is logged and discarded rather
    /// than surfaced.
    pub fn new(client: ApiClient, store: Arc<dyn ProfileStore>) -> Self {
        let mut state = SessionState::default();

        match store.get(keys::ACCESS_TOKEN) {
            Ok(Some(_token)) => match store.get(keys::USER_DATA) {
                Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                    Ok(user) => {
                        tracing::debug!("Restored session for {}", user.email);
                        state.user = Some(user);
                    }
                    Err(e) => {
                        tracing::warn!("Discarding corrupt identity snapshot: {}", e);
                    }
                },
                Ok(None) => {
                    tracing::debug!("Credential present but no identity snapshot");
                }
                Err(e) => {
                    tracing::warn!("Failed to read identity snapshot: {}", e);
                }
            },
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Failed to read credential: {}", e);
            }
        }

        Self {
            client,
            store,
            state,
        }
    }

    /// Log in with email and password.
    ///
    /// On success the credential and identity snapshot are persisted and
    /// the session state updated. On failure the error message is recorded
    /// and any prior session is left untouched.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User> {
        self.state.loading = true;
        self.state.error = None;

        let result = self.client.login(email, password).await;
        self.state.loading = false;

        match result {
            Ok(payload) => {
                self.persist(&payload.token, &payload.user)?;
                self.state.user = Some(payload.user.clone());
                tracing::info!("Logged in as {}", payload.user.email);
                Ok(payload.user)
            }
            Err(e) => {
                self.state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Register a new account; behaves like [`Session::login`] on success.
    pub async fn register(&mut self, email: &str, password: &str) -> Result<User> {
        self.state.loading = true;
        self.state.error = None;

        let result = self.client.register(email, password).await;
        self.state.loading = false;

        match result {
            Ok(payload) => {
                self.persist(&payload.token, &payload.user)?;
                self.state.user = Some(payload.user.clone());
                tracing::info!("Registered {}", payload.user.email);
                Ok(payload.user)
            }
            Err(e) => {
                self.state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Log out.
    ///
    /// The server notification is best-effort: a failure is logged, never
    /// surfaced. The local credential and identity are cleared
    /// unconditionally.
    pub async fn logout(&mut self) -> Result<()> {
        if let Err(e) = self.client.logout().await {
            tracing::warn!("Server logout failed (clearing local session anyway): {}", e);
        }

        self.store.remove(keys::ACCESS_TOKEN)?;
        self.store.remove(keys::USER_DATA)?;
        self.state = SessionState::default();
        tracing::info!("Logged out");
        Ok(())
    }

    /// Fetch the authoritative identity from the server and refresh the
    /// snapshot. Falls back to the caller handling the error; the cached
    /// identity is left in place on failure.
    pub async fn refresh_identity(&mut self) -> Result<User> {
        let user = self.client.me().await?;
        self.store
            .set(keys::USER_DATA, &serde_json::to_string(&user)?)?;
        self.state.user = Some(user.clone());
        Ok(user)
    }

    /// The authenticated identity, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    /// True when an identity is present.
    pub fn is_authenticated(&self) -> bool {
        self.state.user.is_some()
    }

    /// True while a login or register call is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    /// Message from the last failed login/register, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// Snapshot of the full session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    fn persist(&self, token: &str, user: &User) -> Result<()> {
        self.store.set(keys::ACCESS_TOKEN, token)?;
        self.store.set(keys::USER_DATA, &serde_json::to_string(user)?)?;
        Ok(())
    }
}
