//! Wire types for the Taskdeck API
//!
//! Every response from the service is wrapped in a uniform
//! `{success, data, error}` envelope. The types here parse that envelope
//! and the records it carries into validated structures at the client
//! boundary; field presence is checked by serde, never assumed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Uniform response envelope used by every API endpoint.
///
/// `success` is mandatory; a body without it is rejected as a malformed
/// envelope rather than duck-typed. `data` and `error` are each optional
/// and mutually exclusive in practice (the server nulls the other side).
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Payload on success, `null` on failure
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    /// Error object on failure, `null` on success
    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

/// Error object embedded in a failed envelope.
///
/// Individual fields are defaulted so that a sparse error object still
/// yields a usable detail instead of a parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable code, e.g. `VALIDATION_ERROR`, `TODO_NOT_FOUND`
    #[serde(default = "default_error_code")]
    pub code: String,
    /// Human-readable message
    #[serde(default = "default_error_message")]
    pub message: String,
    /// Structured context, `{}` when the server attached none
    #[serde(default = "default_error_details")]
    pub details: serde_json::Value,
}

fn default_error_code() -> String {
    "UNKNOWN_ERROR".to_string()
}

fn default_error_message() -> String {
    "An error occurred".to_string()
}

fn default_error_details() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Default for ErrorDetail {
    fn default() -> Self {
        Self {
            code: default_error_code(),
            message: default_error_message(),
            details: default_error_details(),
        }
    }
}

// ---------------------------------------------------------------------------
// User and authentication
// ---------------------------------------------------------------------------

/// Public user record. Immutable once fetched; replaced wholesale on
/// re-login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Account creation time; the auth responses omit it, so it is only
    /// present when a fuller record was fetched.
    #[serde(default, with = "flexible_ts::option")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload returned by `/api/auth/register` and `/api/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    /// Server greeting, informational only
    #[serde(default)]
    pub message: String,
    /// Opaque bearer token presented on subsequent requests
    pub token: String,
    /// The authenticated identity
    pub user: User,
}

/// Payload returned by `GET /api/auth/me`; the identity is nested under
/// a `user` key, mirroring the auth payload.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityPayload {
    pub user: User,
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Task priority. Serialized lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!(
                "invalid priority '{}', expected low, medium, or high",
                other
            )),
        }
    }
}

/// A single task record as returned by the server.
///
/// The server assigns `id` and both timestamps; the client never
/// fabricates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    /// Comma-separated tag list, if any
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(with = "flexible_ts")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "flexible_ts")]
    pub updated_at: DateTime<Utc>,
}

/// Body for `POST /api/todos`.
#[derive(Debug, Clone, Serialize)]
pub struct TodoDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl TodoDraft {
    /// A draft with the given title and server-side defaults for the rest.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: Priority::default(),
            tags: None,
        }
    }
}

/// Body for `PATCH /api/todos/:id`. Only the fields present are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl TodoPatch {
    /// True when no field is set; sending an empty patch is a client bug.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
            && self.tags.is_none()
    }
}

// ---------------------------------------------------------------------------
// Assistant chat
// ---------------------------------------------------------------------------

/// Body for `POST /api/:user_id/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Continue an existing conversation, or start a new one when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<i64>,
    /// Natural-language command for the assistant
    pub message: String,
}

/// Assistant reply from the chat endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    /// Conversation to thread into the next request
    pub conversation_id: i64,
    /// Assistant response text
    pub response: String,
    /// Tool invocations the assistant performed server-side
    #[serde(default)]
    pub tool_calls: Vec<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Timestamp parsing
// ---------------------------------------------------------------------------

/// Serde adapter for server timestamps.
///
/// The service emits RFC 3339 when the value is timezone-aware, but naive
/// ISO-8601 (no offset) for records stored without one. Naive values are
/// interpreted as UTC. Serialization is always RFC 3339.
pub mod flexible_ts {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        // Naive fallback, with and without fractional seconds
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|e| format!("invalid timestamp '{}': {}", raw, e))
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Same parsing for `Option<DateTime<Utc>>` fields; missing and
    /// `null` both deserialize to `None`.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{self, Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(dt) => super::serialize(dt, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw).map(Some).map_err(serde::de::Error::custom),
                None => Ok(None),
            }
        }
    }
}
