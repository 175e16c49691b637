//! Authentication extractor and session helpers.
//!
//! The browser session holds three things: the [`AuthSession`] tokens, the
//! typed [`SessionContext`], and an optional flash [`Notice`]. Handlers go
//! through the helpers here instead of touching session keys directly.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{SessionContext, session_keys};
use crate::screens::Notice;
use crate::services::AuthSession;
use crate::state::AppState;

type SessionResult<T = ()> = Result<T, tower_sessions::session::Error>;

/// Extractor that requires a live [`AuthSession`].
///
/// Without one the request is redirected to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn settings(RequireAuth(auth): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", auth.user_id)
/// }
/// ```
pub struct RequireAuth(pub AuthSession);

/// Why [`RequireAuth`] rejected a request.
pub enum AuthRejection {
    /// Not signed in, or the session expired.
    RedirectToLogin,
    /// The session layer is missing from the router.
    NoSessionLayer,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::NoSessionLayer => {
                tracing::error!("RequireAuth used without a session layer");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::NoSessionLayer)?;

        let auth_session = current_auth_session(session)
            .await
            .ok_or(AuthRejection::RedirectToLogin)?;

        if !state.auth().is_authenticated(Some(&auth_session)).await {
            tracing::debug!(user_id = %auth_session.user_id, "Stored auth session is no longer valid");
            return Err(AuthRejection::RedirectToLogin);
        }

        Ok(Self(auth_session))
    }
}

/// The stored auth session, if any. Unreadable entries count as signed out.
pub async fn current_auth_session(session: &Session) -> Option<AuthSession> {
    match session.get::<AuthSession>(session_keys::AUTH_SESSION).await {
        Ok(auth_session) => auth_session,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read auth session");
            None
        }
    }
}

/// Store the auth session after sign-in.
///
/// The session id is cycled first so a pre-login id cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_auth_session(session: &Session, auth_session: &AuthSession) -> SessionResult {
    session.cycle_id().await?;
    session.insert(session_keys::AUTH_SESSION, auth_session).await
}

/// Remove the auth session and everything tied to it (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be flushed.
pub async fn clear_auth_session(session: &Session) -> SessionResult {
    session.flush().await
}

/// Load the dashboard state, defaulting when nothing is stored yet.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_context(session: &Session) -> SessionResult<SessionContext> {
    Ok(session
        .get::<SessionContext>(session_keys::DASHBOARD_STATE)
        .await?
        .unwrap_or_default())
}

/// Store the dashboard state.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn store_context(session: &Session, ctx: &SessionContext) -> SessionResult {
    session.insert(session_keys::DASHBOARD_STATE, ctx).await
}

/// Queue a notice for the next page view.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_flash(session: &Session, notice: &Notice) -> SessionResult {
    session.insert(session_keys::FLASH, notice).await
}

/// Take the queued notice, if any.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn take_flash(session: &Session) -> SessionResult<Option<Notice>> {
    session.remove::<Notice>(session_keys::FLASH).await
}
