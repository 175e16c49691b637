//! Account settings: the User Settings and Ad Accounts tabs.

use serde::Deserialize;

use saddle_core::{
    AccountId, AccountMetadata, AccountType, Currency, SettingsTab, UserMetadata,
    check_new_password,
};

use super::Notice;
use crate::db::RepositoryError;
use crate::models::{ActiveAccount, SessionContext};
use crate::services::{AccountStore, AuthService, AuthSession};

/// Characters of the user id shown before the ellipsis.
const USER_ID_PREFIX_LEN: usize = 12;

// =============================================================================
// Tabs
// =============================================================================

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TabForm {
    pub tab: SettingsTab,
}

/// Select the visible settings tab. Selecting the current tab changes nothing.
pub fn select_tab(ctx: &mut SessionContext, tab: SettingsTab) {
    if ctx.settings_tab != tab {
        tracing::debug!(tab = tab.as_str(), "Settings tab selected");
        ctx.settings_tab = tab;
    }
}

// =============================================================================
// User Settings
// =============================================================================

/// Account information and profile prefill for the User Settings tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSettingsView {
    pub email: String,
    /// Shortened user id, or "N/A".
    pub user_id: String,
    pub profile: UserMetadata,
}

/// Load the User Settings tab.
pub async fn user_settings(auth: &dyn AuthService, session: Option<&AuthSession>) -> UserSettingsView {
    let user = auth.get_current_user(session).await;
    let email = match auth.get_user_email(session).await {
        Some(email) => email.to_string(),
        None => "Not available".to_owned(),
    };

    let (user_id, profile) = user.map_or_else(
        || ("N/A".to_owned(), UserMetadata::default()),
        |u| (shorten_user_id(&u.id), u.metadata),
    );

    UserSettingsView {
        email,
        user_id,
        profile,
    }
}

fn shorten_user_id(id: &str) -> String {
    if id.is_empty() {
        return "N/A".to_owned();
    }
    let prefix: String = id.chars().take(USER_ID_PREFIX_LEN).collect();
    format!("{prefix}...")
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileForm {
    pub full_name: String,
    pub phone: String,
    pub company: String,
    pub role: String,
}

/// Save the profile form as the user's metadata.
pub async fn update_profile(
    auth: &dyn AuthService,
    session: Option<&AuthSession>,
    form: &ProfileForm,
) -> Notice {
    let metadata = UserMetadata::from_form(&form.full_name, &form.phone, &form.company, &form.role);
    match auth.update_user_metadata(session, &metadata).await {
        Ok(()) => Notice::success("Profile updated successfully!"),
        Err(failure) => {
            tracing::warn!(error = %failure, "Profile update rejected");
            Notice::error(failure.message_or("Failed to update profile"))
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PasswordForm {
    pub new_password: String,
    pub confirm_password: String,
}

/// Validate and submit a password change.
pub async fn change_password(
    auth: &dyn AuthService,
    session: Option<&AuthSession>,
    form: &PasswordForm,
) -> Notice {
    if form.new_password.is_empty() || form.confirm_password.is_empty() {
        return Notice::error("Please fill in both fields");
    }
    if let Err(e) = check_new_password(&form.new_password, &form.confirm_password) {
        return Notice::error(e.to_string());
    }

    match auth.update_password(session, &form.new_password).await {
        Ok(()) => Notice::success("Password updated successfully!"),
        Err(failure) => {
            tracing::warn!(error = %failure, "Password update rejected");
            Notice::error(failure.message_or("Failed to update password"))
        }
    }
}

// =============================================================================
// Ad Accounts
// =============================================================================

/// One row of the account list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountListing {
    pub id: String,
    pub name: String,
    /// Upper-cased account type, e.g. "BRAND".
    pub type_label: String,
    pub active: bool,
}

/// The Ad Accounts tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdAccountsView {
    pub accounts: Vec<AccountListing>,
    /// Shown instead of the list when there are no accounts.
    pub empty_notice: Option<Notice>,
}

/// Load the account list, marking the active account.
///
/// # Errors
///
/// Returns `RepositoryError` if the accounts cannot be read.
pub async fn ad_accounts(
    store: &dyn AccountStore,
    ctx: &SessionContext,
) -> Result<AdAccountsView, RepositoryError> {
    let active = ctx.active_account_id();
    let accounts: Vec<AccountListing> = store
        .get_all_accounts()
        .await?
        .into_iter()
        .map(|account| AccountListing {
            active: active == Some(&account.id),
            type_label: account.account_type.as_str().to_uppercase(),
            id: account.id.into(),
            name: account.name,
        })
        .collect();

    let empty_notice = accounts
        .is_empty()
        .then(|| Notice::info("No ad accounts yet. Create one below."));

    Ok(AdAccountsView {
        accounts,
        empty_notice,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateAccountForm {
    pub name: String,
    pub account_type: AccountType,
    pub marketplace: String,
    pub currency: Currency,
    pub notes: String,
}

/// Create an ad account and make it the active one.
///
/// On success the report cache is reset for the new account. A duplicate
/// leaves the session untouched.
///
/// # Errors
///
/// Returns `RepositoryError` if the store fails.
pub async fn create_account(
    store: &dyn AccountStore,
    ctx: &mut SessionContext,
    form: &CreateAccountForm,
) -> Result<Notice, RepositoryError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Ok(Notice::error("Please enter an Account Name"));
    }
    let Ok(id) = AccountId::derive(name) else {
        return Ok(Notice::error("Account name must contain letters or numbers"));
    };

    let metadata = AccountMetadata::from_form(&form.marketplace, form.currency, &form.notes);
    if !store
        .create_account(&id, name, form.account_type, &metadata)
        .await?
    {
        return Ok(Notice::error("Account already exists. Try a different name."));
    }

    let notice = Notice::success(format!("Account '{name}' created successfully!"))
        .with_detail(format!("Account ID: {id}"));
    ctx.activate_account(ActiveAccount {
        id,
        name: name.to_owned(),
    });
    Ok(notice)
}
