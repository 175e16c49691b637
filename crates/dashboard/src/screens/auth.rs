//! Authentication screens: sign-up, login, password reset, user menu.

use serde::Deserialize;

use saddle_core::{ThemeMode, check_new_password, display_name, initials};

use super::Notice;
use crate::models::SessionContext;
use crate::services::{AuthService, AuthSession};

const SIGN_UP_SUCCESS: &str = "Account created! Check your email.";
const RESET_SUCCESS: &str = "Check your email for reset link";
const NO_ACCOUNT_LABEL: &str = "No Account";

// =============================================================================
// Forms
// =============================================================================

/// Sign-up form data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub confirm: String,
}

/// Login form data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// Checkbox value; present when ticked.
    pub remember: Option<String>,
}

impl LoginForm {
    #[must_use]
    pub const fn remember_me(&self) -> bool {
        self.remember.is_some()
    }
}

/// Password reset form data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResetPasswordForm {
    pub email: String,
}

// =============================================================================
// Sign Up
// =============================================================================

/// Validate and submit the sign-up form.
pub async fn sign_up(auth: &dyn AuthService, form: &SignUpForm) -> Notice {
    let email = form.email.trim();
    if email.is_empty() || form.password.is_empty() || form.confirm.is_empty() {
        return Notice::error("Please fill in all fields");
    }
    if let Err(e) = check_new_password(&form.password, &form.confirm) {
        return Notice::error(e.to_string());
    }

    match auth.sign_up(email, &form.password).await {
        Ok(message) => {
            tracing::info!("Sign-up accepted");
            Notice::success(message.unwrap_or_else(|| SIGN_UP_SUCCESS.to_owned()))
        }
        Err(failure) => {
            tracing::info!(error = %failure, "Sign-up rejected by auth service");
            Notice::error(failure.message_or("Signup failed"))
        }
    }
}

// =============================================================================
// Login
// =============================================================================

/// Result of one pass over the login screen.
#[derive(Debug, Default)]
pub struct LoginOutcome {
    /// Whether the browser session is signed in after this pass.
    pub authenticated: bool,
    /// New session to store, on successful sign-in.
    pub session: Option<AuthSession>,
    pub notice: Option<Notice>,
}

/// Run the login screen.
///
/// With no submitted form this only reports whether `current` is signed in.
/// The remember-me checkbox is accepted but has no effect.
pub async fn login(
    auth: &dyn AuthService,
    current: Option<&AuthSession>,
    form: Option<&LoginForm>,
) -> LoginOutcome {
    let Some(form) = form else {
        return LoginOutcome {
            authenticated: auth.is_authenticated(current).await,
            ..LoginOutcome::default()
        };
    };

    let email = form.email.trim();
    if email.is_empty() || form.password.is_empty() {
        return LoginOutcome {
            authenticated: false,
            session: None,
            notice: Some(Notice::error("Please enter your email and password")),
        };
    }

    tracing::debug!(remember_me = form.remember_me(), "Login submitted");

    match auth.sign_in(email, &form.password).await {
        Ok(session) => {
            tracing::info!(user_id = %session.user_id, "User signed in");
            LoginOutcome {
                authenticated: true,
                session: Some(session),
                notice: Some(Notice::success("Welcome back!")),
            }
        }
        Err(failure) => {
            tracing::info!(error = %failure, "Sign-in rejected by auth service");
            LoginOutcome {
                authenticated: auth.is_authenticated(current).await,
                session: None,
                notice: Some(Notice::error(failure.message_or("Login failed"))),
            }
        }
    }
}

/// Entry point for visitors without a session: the login screen.
pub async fn entry_point(auth: &dyn AuthService, current: Option<&AuthSession>) -> LoginOutcome {
    login(auth, current, None).await
}

/// Revoke the session at the auth service. Failures are logged only.
pub async fn sign_out(auth: &dyn AuthService, session: Option<&AuthSession>) {
    let Some(session) = session else {
        return;
    };
    match auth.sign_out(session).await {
        Ok(()) => tracing::info!(user_id = %session.user_id, "User signed out"),
        Err(failure) => tracing::warn!(error = %failure, "Auth service sign-out failed"),
    }
}

// =============================================================================
// Password Reset
// =============================================================================

/// Validate and submit the password reset form.
pub async fn reset_password(auth: &dyn AuthService, form: &ResetPasswordForm) -> Notice {
    let email = form.email.trim();
    if email.is_empty() {
        return Notice::error("Please enter your email");
    }

    match auth.reset_password(email).await {
        Ok(message) => Notice::success(message.unwrap_or_else(|| RESET_SUCCESS.to_owned())),
        Err(failure) => {
            tracing::info!(error = %failure, "Password reset rejected by auth service");
            Notice::error(failure.message_or("Failed to send reset email"))
        }
    }
}

// =============================================================================
// User Menu
// =============================================================================

/// Header colors for a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderPalette {
    pub background: &'static str,
    pub border: &'static str,
    pub name: &'static str,
    pub email: &'static str,
}

impl HeaderPalette {
    #[must_use]
    pub const fn for_theme(theme: ThemeMode) -> Self {
        match theme {
            ThemeMode::Dark => Self {
                background: "rgba(22, 22, 35, 0.95)",
                border: "rgba(91, 85, 111, 0.3)",
                name: "#E9EAF0",
                email: "#9A9AAA",
            },
            ThemeMode::Light => Self {
                background: "rgba(255, 255, 255, 0.95)",
                border: "rgba(221, 217, 212, 0.8)",
                name: "#1A1D24",
                email: "#4A4F5C",
            },
        }
    }
}

/// Everything the header shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMenu {
    pub display_name: String,
    pub initials: String,
    pub email: String,
    pub account_label: String,
    pub palette: HeaderPalette,
}

/// Build the header for the signed-in user; `None` when there is no user email.
pub async fn user_menu(
    auth: &dyn AuthService,
    session: Option<&AuthSession>,
    ctx: &SessionContext,
) -> Option<UserMenu> {
    let email = auth.get_user_email(session).await?;
    let metadata = auth
        .get_current_user(session)
        .await
        .map(|user| user.metadata)
        .unwrap_or_default();

    let name = display_name(&metadata, &email);
    let initials = initials(&name, &email);
    let account_label = ctx
        .active_account
        .as_ref()
        .map_or_else(|| NO_ACCOUNT_LABEL.to_owned(), |a| a.name.clone());

    Some(UserMenu {
        display_name: name,
        initials,
        email: email.to_string(),
        account_label,
        palette: HeaderPalette::for_theme(ctx.theme_mode),
    })
}
