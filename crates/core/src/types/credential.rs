//! Session credential types.
//!
//! Type-safe wrappers for the bearer token and the denormalized user display
//! object the client keeps between runs.

use serde::{Deserialize, Serialize};

/// Opaque bearer token issued by the backend at login.
///
/// The token authorizes every backend request. `Debug` is implemented by hand
/// so the token never lands in logs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Create a new session token.
    #[must_use]
    pub const fn new(token: String) -> Self {
        Self(token)
    }

    /// Get the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether the token is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

impl From<String> for SessionToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<SessionToken> for String {
    fn from(token: SessionToken) -> Self {
        token.0
    }
}

/// Denormalized user/company display object.
///
/// Written at registration so views can greet the user without a backend
/// round trip. Display-only: the backend never reads this back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Company / store name entered at registration.
    pub company: String,
    /// Account email address.
    pub email: String,
}

/// A stored session: the bearer token plus the optional display object.
///
/// This is what the session gate hands to a view once the token check passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCredential {
    /// Bearer token attached to every authenticated request.
    pub token: SessionToken,
    /// User display object, when one was saved at registration.
    pub user: Option<UserProfile>,
}

impl SessionCredential {
    /// Create a credential from a freshly issued token.
    #[must_use]
    pub const fn new(token: SessionToken) -> Self {
        Self { token, user: None }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_token_debug_is_redacted() {
        let token = SessionToken::new("eyJhbGciOi.secret.payload".to_owned());
        let debug = format!("{token:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_token_serde_transparent() {
        let token = SessionToken::new("abc123".to_owned());
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"abc123\"");
    }

    #[test]
    fn test_credential_starts_without_profile() {
        let cred = SessionCredential::new(SessionToken::new("t".to_owned()));
        assert!(cred.user.is_none());
    }
}
