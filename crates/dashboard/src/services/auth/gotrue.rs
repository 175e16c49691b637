//! Supabase GoTrue REST client.
//!
//! # Endpoints
//!
//! ```text
//! POST /auth/v1/signup                    - register
//! POST /auth/v1/token?grant_type=password - sign in
//! POST /auth/v1/recover                   - send reset email
//! POST /auth/v1/logout                    - revoke session
//! GET  /auth/v1/user                      - current user
//! PUT  /auth/v1/user                      - update metadata / password
//! ```
//!
//! Every request carries the project's anon key in the `apikey` header;
//! user-scoped requests add the session's access token as a bearer token.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use saddle_core::{Email, UserMetadata};

use super::{AuthFailure, AuthResult, AuthService, AuthSession, AuthUser};
use crate::config::SupabaseConfig;

/// Errors talking to the GoTrue server.
#[derive(Debug, Error)]
pub enum AuthClientError {
    /// HTTP request failed or the body could not be decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status.
    #[error("auth API error ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },
}

impl From<AuthClientError> for AuthFailure {
    fn from(err: AuthClientError) -> Self {
        match err {
            AuthClientError::Api { message, .. } => Self { message },
            AuthClientError::Http(e) => {
                tracing::warn!(error = %e, "Auth service unreachable");
                Self::unexplained()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.error_description)
            .or(self.message)
            .or(self.error)
    }
}

#[derive(Debug, Deserialize)]
struct UserBody {
    id: String,
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
}

impl From<UserBody> for AuthUser {
    fn from(body: UserBody) -> Self {
        Self {
            id: body.id,
            email: body.email.as_deref().and_then(|e| Email::parse(e).ok()),
            metadata: body.user_metadata,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    expires_at: Option<i64>,
    user: UserBody,
}

#[derive(Debug, Deserialize)]
struct SignUpBody {
    access_token: Option<String>,
}

/// [`AuthService`] backed by a Supabase GoTrue server.
#[derive(Clone)]
pub struct GoTrueAuthService {
    inner: Arc<GoTrueInner>,
}

struct GoTrueInner {
    client: reqwest::Client,
    base_url: String,
    anon_key: SecretString,
}

impl GoTrueAuthService {
    /// Create a client for the configured Supabase project.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            inner: Arc::new(GoTrueInner {
                client: reqwest::Client::new(),
                base_url: format!("{}/auth/v1", config.url.as_str().trim_end_matches('/')),
                anon_key: config.anon_key.clone(),
            }),
        }
    }

    fn request(&self, method: Method, path: &str, bearer: Option<&AuthSession>) -> RequestBuilder {
        let url = format!("{}/{path}", self.inner.base_url);
        let builder = self
            .inner
            .client
            .request(method, url)
            .header("apikey", self.inner.anon_key.expose_secret());

        match bearer {
            Some(session) => builder.bearer_auth(session.access_token()),
            None => builder.bearer_auth(self.inner.anon_key.expose_secret()),
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, AuthClientError> {
        let response = check(builder.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn send_empty(&self, builder: RequestBuilder) -> Result<(), AuthClientError> {
        check(builder.send().await?).await?;
        Ok(())
    }

    async fn fetch_user(&self, session: &AuthSession) -> Result<AuthUser, AuthClientError> {
        let body: UserBody = self
            .send(self.request(Method::GET, "user", Some(session)))
            .await?;
        Ok(body.into())
    }
}

/// Turn an error status into [`AuthClientError::Api`] with the server's message.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, AuthClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(ErrorBody::into_message);
    tracing::debug!(%status, body = %text, "Auth API returned an error");
    Err(AuthClientError::Api { status, message })
}

fn live(session: Option<&AuthSession>) -> Option<&AuthSession> {
    session.filter(|s| !s.is_expired())
}

fn require_live(session: Option<&AuthSession>) -> AuthResult<&AuthSession> {
    live(session).ok_or_else(|| AuthFailure::new("Your session has expired, please sign in again"))
}

#[async_trait]
impl AuthService for GoTrueAuthService {
    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<Option<String>> {
        let body: SignUpBody = self
            .send(
                self.request(Method::POST, "signup", None)
                    .json(&json!({ "email": email, "password": password })),
            )
            .await?;

        // No session in the reply means the project requires email confirmation.
        Ok(body
            .access_token
            .map(|_| "Account created! You can sign in now.".to_owned()))
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        let body: TokenBody = self
            .send(
                self.request(Method::POST, "token?grant_type=password", None)
                    .json(&json!({ "email": email, "password": password })),
            )
            .await?;

        let expires_at = body
            .expires_at
            .unwrap_or_else(|| Utc::now().timestamp() + body.expires_in);
        let user = AuthUser::from(body.user);

        Ok(AuthSession::new(
            body.access_token,
            body.refresh_token,
            expires_at,
            user.id,
            user.email,
        ))
    }

    async fn sign_out(&self, session: &AuthSession) -> AuthResult {
        self.send_empty(self.request(Method::POST, "logout", Some(session)))
            .await
            .map_err(AuthFailure::from)
    }

    async fn reset_password(&self, email: &str) -> AuthResult<Option<String>> {
        self.send_empty(
            self.request(Method::POST, "recover", None)
                .json(&json!({ "email": email })),
        )
        .await?;
        Ok(None)
    }

    async fn is_authenticated(&self, session: Option<&AuthSession>) -> bool {
        live(session).is_some()
    }

    async fn get_current_user(&self, session: Option<&AuthSession>) -> Option<AuthUser> {
        let session = live(session)?;
        match self.fetch_user(session).await {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, user_id = %session.user_id, "Failed to fetch current user");
                None
            }
        }
    }

    async fn get_user_email(&self, session: Option<&AuthSession>) -> Option<Email> {
        let session = live(session)?;
        if let Some(email) = &session.email {
            return Some(email.clone());
        }
        self.get_current_user(Some(session)).await?.email
    }

    async fn update_user_metadata(
        &self,
        session: Option<&AuthSession>,
        metadata: &UserMetadata,
    ) -> AuthResult {
        let session = require_live(session)?;
        self.send_empty(
            self.request(Method::PUT, "user", Some(session))
                .json(&json!({ "data": metadata.to_update_payload() })),
        )
        .await?;
        Ok(())
    }

    async fn update_password(
        &self,
        session: Option<&AuthSession>,
        new_password: &str,
    ) -> AuthResult {
        let session = require_live(session)?;
        self.send_empty(
            self.request(Method::PUT, "user", Some(session))
                .json(&json!({ "password": new_password })),
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_prefers_msg() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"code": 422, "msg": "User already registered", "error": "user_exists"}"#,
        )
        .unwrap();
        assert_eq!(body.into_message().as_deref(), Some("User already registered"));
    }

    #[test]
    fn test_error_body_oauth_style() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"error": "invalid_grant", "error_description": "Invalid login credentials"}"#,
        )
        .unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Invalid login credentials"));
    }

    #[test]
    fn test_api_error_becomes_failure_with_message() {
        let failure = AuthFailure::from(AuthClientError::Api {
            status: StatusCode::BAD_REQUEST,
            message: Some("Email not confirmed".to_owned()),
        });
        assert_eq!(failure.message_or("Login failed"), "Email not confirmed");
    }

    #[test]
    fn test_token_body_parses_user_metadata() {
        let body: TokenBody = serde_json::from_str(
            r#"{
                "access_token": "at", "refresh_token": "rt", "expires_in": 3600,
                "expires_at": 1900000000, "token_type": "bearer",
                "user": {"id": "b9c3", "email": "ops@saddle.io",
                         "user_metadata": {"full_name": "Ops Team", "phone": ""}}
            }"#,
        )
        .unwrap();
        let user = AuthUser::from(body.user);
        assert_eq!(user.id, "b9c3");
        assert_eq!(user.email.unwrap().as_str(), "ops@saddle.io");
        assert_eq!(user.metadata.full_name.as_deref(), Some("Ops Team"));
        assert_eq!(user.metadata.phone, None);
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let service = GoTrueAuthService::new(&SupabaseConfig {
            url: url::Url::parse("https://abcd.supabase.co/").unwrap(),
            anon_key: SecretString::from("anon"),
        });
        assert_eq!(service.inner.base_url, "https://abcd.supabase.co/auth/v1");
    }

    #[tokio::test]
    async fn test_expired_session_is_not_authenticated() {
        let service = GoTrueAuthService::new(&SupabaseConfig {
            url: url::Url::parse("https://abcd.supabase.co").unwrap(),
            anon_key: SecretString::from("anon"),
        });
        let expired = AuthSession::new("a", "r", 0, "u", None);
        assert!(!service.is_authenticated(Some(&expired)).await);
        assert!(!service.is_authenticated(None).await);
        assert!(service.get_current_user(Some(&expired)).await.is_none());
        let failure = service.update_password(Some(&expired), "newpassword").await.unwrap_err();
        assert!(failure.message.is_some());
    }
}
