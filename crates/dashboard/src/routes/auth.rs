//! Authentication route handlers.
//!
//! Thin wrappers over [`crate::screens::auth`]: they read the session and the
//! form, run the screen, and either render the page again with its notice or
//! redirect into the dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{
    clear_auth_session, current_auth_session, set_auth_session, set_flash, take_flash,
};
use crate::screens::{self, Notice};
use crate::screens::auth::{LoginForm, ResetPasswordForm, SignUpForm};
use crate::state::AppState;

/// Where signed-in users land.
const DASHBOARD_PATH: &str = "/settings";

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub notice: Option<Notice>,
    pub email: String,
}

/// Sign-up page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignUpTemplate {
    pub notice: Option<Notice>,
    pub email: String,
}

/// Password reset page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/reset_password.html")]
pub struct ResetPasswordTemplate {
    pub notice: Option<Notice>,
    pub email: String,
}

// =============================================================================
// Entry Point & Login
// =============================================================================

/// `GET /`: the login screen, or the dashboard for signed-in sessions.
pub async fn entry(State(state): State<AppState>, session: Session) -> Result<Response> {
    login_page(State(state), session).await
}

/// Display the login page.
pub async fn login_page(State(state): State<AppState>, session: Session) -> Result<Response> {
    let current = current_auth_session(&session).await;
    let outcome = screens::auth::entry_point(state.auth(), current.as_ref()).await;
    if outcome.authenticated {
        return Ok(Redirect::to(DASHBOARD_PATH).into_response());
    }

    Ok(LoginTemplate {
        notice: take_flash(&session).await?,
        email: String::new(),
    }
    .into_response())
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let current = current_auth_session(&session).await;
    let outcome = screens::auth::login(state.auth(), current.as_ref(), Some(&form)).await;

    if let Some(auth_session) = outcome.session {
        set_auth_session(&session, &auth_session).await?;
        set_sentry_user(
            &auth_session.user_id,
            auth_session.email.as_ref().map(|e| e.as_str()),
        );
        if let Some(notice) = &outcome.notice {
            set_flash(&session, notice).await?;
        }
        return Ok(Redirect::to(DASHBOARD_PATH).into_response());
    }

    Ok(LoginTemplate {
        notice: outcome.notice,
        email: form.email,
    }
    .into_response())
}

// =============================================================================
// Sign Up
// =============================================================================

/// Display the sign-up page.
pub async fn signup_page() -> impl IntoResponse {
    SignUpTemplate {
        notice: None,
        email: String::new(),
    }
}

/// Handle sign-up form submission.
pub async fn signup(State(state): State<AppState>, Form(form): Form<SignUpForm>) -> Response {
    let notice = screens::auth::sign_up(state.auth(), &form).await;
    SignUpTemplate {
        notice: Some(notice),
        email: form.email,
    }
    .into_response()
}

// =============================================================================
// Password Reset
// =============================================================================

/// Display the password reset page.
pub async fn reset_password_page() -> impl IntoResponse {
    ResetPasswordTemplate {
        notice: None,
        email: String::new(),
    }
}

/// Handle password reset form submission.
pub async fn reset_password(
    State(state): State<AppState>,
    Form(form): Form<ResetPasswordForm>,
) -> Response {
    let notice = screens::auth::reset_password(state.auth(), &form).await;
    ResetPasswordTemplate {
        notice: Some(notice),
        email: form.email,
    }
    .into_response()
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout: revoke the tokens (best effort) and destroy the session.
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Response> {
    let current = current_auth_session(&session).await;
    screens::auth::sign_out(state.auth(), current.as_ref()).await;

    clear_auth_session(&session).await?;
    clear_sentry_user();

    Ok(Redirect::to("/auth/login").into_response())
}
