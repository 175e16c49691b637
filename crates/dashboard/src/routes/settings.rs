//! Account settings route handlers.
//!
//! Every POST runs its screen, stores the updated [`SessionContext`] and the
//! resulting notice, then redirects back to `GET /settings`.
//!
//! [`SessionContext`]: crate::models::SessionContext

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use saddle_core::{AccountType, Currency, SettingsTab};

use crate::error::Result;
use crate::middleware::{RequireAuth, load_context, set_flash, store_context, take_flash};
use crate::screens::auth::UserMenu;
use crate::screens::settings::{
    AdAccountsView, CreateAccountForm, PasswordForm, ProfileForm, TabForm, UserSettingsView,
};
use crate::screens::{self, Notice};
use crate::state::AppState;

const SETTINGS_PATH: &str = "/settings";

/// One entry of the tab bar.
pub struct TabLink {
    pub value: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Settings page template.
#[derive(Template, WebTemplate)]
#[template(path = "settings/index.html")]
pub struct SettingsTemplate {
    pub menu: Option<UserMenu>,
    pub tabs: Vec<TabLink>,
    pub notice: Option<Notice>,
    /// Present when the User Settings tab is active.
    pub user: Option<UserSettingsView>,
    /// Present when the Ad Accounts tab is active.
    pub accounts: Option<AdAccountsView>,
    pub account_types: [AccountType; 4],
    pub currencies: [Currency; 6],
}

/// Display the active settings tab.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(auth_session): RequireAuth,
) -> Result<Response> {
    let ctx = load_context(&session).await?;
    let notice = take_flash(&session).await?;
    let menu = screens::auth::user_menu(state.auth(), Some(&auth_session), &ctx).await;

    let (user, accounts) = match ctx.settings_tab {
        SettingsTab::UserSettings => (
            Some(screens::settings::user_settings(state.auth(), Some(&auth_session)).await),
            None,
        ),
        SettingsTab::AdAccounts => (
            None,
            Some(screens::settings::ad_accounts(state.accounts(), &ctx).await?),
        ),
    };

    let tabs = SettingsTab::ALL
        .into_iter()
        .map(|tab| TabLink {
            value: tab.as_str(),
            label: tab.label(),
            active: tab == ctx.settings_tab,
        })
        .collect();

    Ok(SettingsTemplate {
        menu,
        tabs,
        notice,
        user,
        accounts,
        account_types: AccountType::ALL,
        currencies: Currency::ALL,
    }
    .into_response())
}

/// Switch the visible tab.
pub async fn select_tab(
    session: Session,
    RequireAuth(_): RequireAuth,
    Form(form): Form<TabForm>,
) -> Result<Response> {
    let mut ctx = load_context(&session).await?;
    screens::settings::select_tab(&mut ctx, form.tab);
    store_context(&session, &ctx).await?;
    Ok(Redirect::to(SETTINGS_PATH).into_response())
}

/// Save the profile form.
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(auth_session): RequireAuth,
    Form(form): Form<ProfileForm>,
) -> Result<Response> {
    let notice = screens::settings::update_profile(state.auth(), Some(&auth_session), &form).await;
    set_flash(&session, &notice).await?;
    Ok(Redirect::to(SETTINGS_PATH).into_response())
}

/// Change the password.
pub async fn change_password(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(auth_session): RequireAuth,
    Form(form): Form<PasswordForm>,
) -> Result<Response> {
    let notice = screens::settings::change_password(state.auth(), Some(&auth_session), &form).await;
    set_flash(&session, &notice).await?;
    Ok(Redirect::to(SETTINGS_PATH).into_response())
}

/// Create an ad account; on success it becomes the active account.
pub async fn create_account(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(_): RequireAuth,
    Form(form): Form<CreateAccountForm>,
) -> Result<Response> {
    let mut ctx = load_context(&session).await?;
    let notice = screens::settings::create_account(state.accounts(), &mut ctx, &form).await?;
    store_context(&session, &ctx).await?;
    set_flash(&session, &notice).await?;
    Ok(Redirect::to(SETTINGS_PATH).into_response())
}
