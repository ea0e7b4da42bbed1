//! Fixed profile keys.
//!
//! These mirror the service's client contract: the credential, the cached
//! identity snapshot, and the theme preference each live under one fixed
//! key.

/// Opaque bearer token issued by the server.
pub const ACCESS_TOKEN: &str = "access_token";

/// JSON snapshot of the authenticated [`crate::types::User`].
pub const USER_DATA: &str = "user_data";

/// Theme preference, `"light"` or `"dark"`.
pub const THEME: &str = "theme";
