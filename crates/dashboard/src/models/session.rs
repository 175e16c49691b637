//! Session-related types.
//!
//! Everything the dashboard remembers between requests of one browser
//! session. Handlers load a [`SessionContext`], hand it to the screens, and
//! store it back.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use saddle_core::{AccountId, SettingsTab, ThemeMode};

/// Session keys.
pub mod keys {
    /// Key for the [`super::SessionContext`].
    pub const DASHBOARD_STATE: &str = "dashboard_state";

    /// Key for the authentication service session (tokens).
    pub const AUTH_SESSION: &str = "auth_session";

    /// Key for a one-shot notice carried across a redirect.
    pub const FLASH: &str = "flash";
}

/// Ad account selected for report operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveAccount {
    pub id: AccountId,
    pub name: String,
}

/// Which report uploads have been completed for the active account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct UploadStatus {
    pub search_term_report: bool,
    pub advertised_product_report: bool,
    pub bulk_id_mapping: bool,
    pub category_mapping: bool,
}

impl UploadStatus {
    /// True if any report has been uploaded.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.search_term_report
            || self.advertised_product_report
            || self.bulk_id_mapping
            || self.category_mapping
    }
}

/// Report data cached for the active account.
///
/// Belongs to exactly one account; switching to a new account resets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReportCache {
    pub search_term_report: Option<serde_json::Value>,
    pub advertised_product_report: Option<serde_json::Value>,
    pub bulk_id_mapping: Option<serde_json::Value>,
    pub category_mapping: Option<serde_json::Value>,
    pub enriched_data: Option<serde_json::Value>,
    pub upload_status: UploadStatus,
    pub upload_timestamps: BTreeMap<String, DateTime<Utc>>,
}

impl ReportCache {
    /// Drop everything cached for the previous account.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Typed dashboard state for one browser session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionContext {
    pub settings_tab: SettingsTab,
    pub active_account: Option<ActiveAccount>,
    pub theme_mode: ThemeMode,
    pub reports: ReportCache,
}

impl SessionContext {
    /// Id of the active account, if one is selected.
    #[must_use]
    pub fn active_account_id(&self) -> Option<&AccountId> {
        self.active_account.as_ref().map(|a| &a.id)
    }

    /// Make `account` the active account and forget the previous account's reports.
    pub fn activate_account(&mut self, account: ActiveAccount) {
        tracing::debug!(account_id = %account.id, "Switching active account");
        self.active_account = Some(account);
        self.reports.reset();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn account(name: &str) -> ActiveAccount {
        ActiveAccount {
            id: AccountId::derive(name).unwrap(),
            name: name.to_owned(),
        }
    }

    #[test]
    fn test_default_context() {
        let ctx = SessionContext::default();
        assert_eq!(ctx.settings_tab, SettingsTab::UserSettings);
        assert_eq!(ctx.theme_mode, ThemeMode::Dark);
        assert!(ctx.active_account.is_none());
        assert!(ctx.reports.is_empty());
    }

    #[test]
    fn test_activate_account_resets_reports() {
        let mut ctx = SessionContext::default();
        ctx.reports.search_term_report = Some(serde_json::json!([{"term": "shoes"}]));
        ctx.reports.upload_status.search_term_report = true;
        ctx.reports
            .upload_timestamps
            .insert("search_term_report".to_owned(), Utc::now());

        ctx.activate_account(account("Acme Corp"));

        assert_eq!(ctx.active_account_id().unwrap().as_str(), "acme_corp");
        assert!(!ctx.reports.upload_status.any());
        assert!(ctx.reports.is_empty());
    }

    #[test]
    fn test_partial_stored_state_fills_defaults() {
        let ctx: SessionContext =
            serde_json::from_str(r#"{"settings_tab": "ad_accounts"}"#).unwrap();
        assert_eq!(ctx.settings_tab, SettingsTab::AdAccounts);
        assert_eq!(ctx.theme_mode, ThemeMode::Dark);
    }
}
