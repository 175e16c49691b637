//! Authentication service contract.
//!
//! The dashboard never verifies credentials itself. Every auth operation goes
//! through [`AuthService`]; the per-browser login lives in an [`AuthSession`]
//! that handlers keep in the tower session and pass back in.

mod gotrue;

pub use gotrue::{AuthClientError, GoTrueAuthService};

use async_trait::async_trait;
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use saddle_core::{Email, UserMetadata};

/// Failure reported by the authentication service.
///
/// Carries the service's own message when it sent one; screens show it as-is
/// and fall back to their own wording otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default, thiserror::Error)]
#[error("{}", .message.as_deref().unwrap_or("authentication service request failed"))]
pub struct AuthFailure {
    pub message: Option<String>,
}

impl AuthFailure {
    /// Failure with the service's message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Failure without any detail.
    #[must_use]
    pub const fn unexplained() -> Self {
        Self { message: None }
    }

    /// The service's message, or `fallback` if it gave none.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_owned())
    }
}

/// Result of an authentication service call.
pub type AuthResult<T = ()> = Result<T, AuthFailure>;

/// Tokens of a signed-in browser session.
///
/// Stored in the tower session; `Debug` redacts the tokens.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthSession {
    #[serde(with = "secret_string")]
    access_token: SecretString,
    #[serde(with = "secret_string")]
    refresh_token: SecretString,
    /// Unix timestamp after which the access token is no longer accepted.
    pub expires_at: i64,
    pub user_id: String,
    pub email: Option<Email>,
}

impl AuthSession {
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_at: i64,
        user_id: impl Into<String>,
        email: Option<Email>,
    ) -> Self {
        Self {
            access_token: SecretString::from(access_token.into()),
            refresh_token: SecretString::from(refresh_token.into()),
            expires_at,
            user_id: user_id.into(),
            email,
        }
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    #[must_use]
    pub fn refresh_token(&self) -> &str {
        self.refresh_token.expose_secret()
    }

    /// Whether the access token has expired at `now` (unix seconds).
    #[must_use]
    pub const fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .finish()
    }
}

mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(secret: &SecretString, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(secret.expose_secret())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<SecretString, D::Error> {
        String::deserialize(d).map(SecretString::from)
    }
}

/// A user as reported by the authentication service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Opaque id assigned by the service.
    pub id: String,
    pub email: Option<Email>,
    pub metadata: UserMetadata,
}

/// Authentication collaborator.
///
/// Calls scoped to "the current user" take the browser's [`AuthSession`]
/// (`None` when nobody is signed in).
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user. `Ok` carries the service's confirmation message, if any.
    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<Option<String>>;

    /// Exchange email and password for a session.
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession>;

    /// Revoke the session's tokens.
    async fn sign_out(&self, session: &AuthSession) -> AuthResult;

    /// Send a password reset email. `Ok` carries the service's message, if any.
    async fn reset_password(&self, email: &str) -> AuthResult<Option<String>>;

    /// Whether `session` is a live, signed-in session.
    async fn is_authenticated(&self, session: Option<&AuthSession>) -> bool;

    /// The signed-in user, if any.
    async fn get_current_user(&self, session: Option<&AuthSession>) -> Option<AuthUser>;

    /// The signed-in user's email, if any.
    async fn get_user_email(&self, session: Option<&AuthSession>) -> Option<Email>;

    /// Replace the signed-in user's profile metadata.
    async fn update_user_metadata(
        &self,
        session: Option<&AuthSession>,
        metadata: &UserMetadata,
    ) -> AuthResult;

    /// Set a new password for the signed-in user.
    async fn update_password(&self, session: Option<&AuthSession>, new_password: &str)
    -> AuthResult;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_or_fallback() {
        assert_eq!(AuthFailure::unexplained().message_or("Login failed"), "Login failed");
        assert_eq!(AuthFailure::new("  ").message_or("Login failed"), "Login failed");
        assert_eq!(
            AuthFailure::new("Invalid login credentials").message_or("Login failed"),
            "Invalid login credentials"
        );
    }

    #[test]
    fn test_session_debug_redacts_tokens() {
        let session = AuthSession::new("access-abc", "refresh-xyz", 0, "user-1", None);
        let debug_output = format!("{session:?}");
        assert!(debug_output.contains("user-1"));
        assert!(!debug_output.contains("access-abc"));
        assert!(!debug_output.contains("refresh-xyz"));
    }

    #[test]
    fn test_session_serializes_tokens_for_storage() {
        let session = AuthSession::new("access-abc", "refresh-xyz", 1_900_000_000, "u", None);
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["access_token"], "access-abc");

        let restored: AuthSession = serde_json::from_value(json).unwrap();
        assert_eq!(restored.access_token(), "access-abc");
        assert_eq!(restored.refresh_token(), "refresh-xyz");
    }

    #[test]
    fn test_session_expiry() {
        let session = AuthSession::new("a", "r", 100, "u", None);
        assert!(!session.is_expired_at(99));
        assert!(session.is_expired_at(100));
    }
}
