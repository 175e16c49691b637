//! Dashboard UI state enums.

use serde::{Deserialize, Serialize};

/// Tab shown on the account settings page.
///
/// Exactly one tab is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SettingsTab {
    /// Profile and password.
    #[default]
    UserSettings,
    /// Ad account list and creation form.
    AdAccounts,
}

impl SettingsTab {
    /// Both tabs, in display order.
    pub const ALL: [Self; 2] = [Self::UserSettings, Self::AdAccounts];

    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UserSettings => "USER SETTINGS",
            Self::AdAccounts => "AD ACCOUNTS",
        }
    }

    /// Value submitted by the tab button.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserSettings => "user_settings",
            Self::AdAccounts => "ad_accounts",
        }
    }
}

/// Color scheme of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(SettingsTab::default(), SettingsTab::UserSettings);
        assert_eq!(ThemeMode::default(), ThemeMode::Dark);
    }

    #[test]
    fn test_tab_wire_names_match_serde() {
        for tab in SettingsTab::ALL {
            let json = serde_json::to_string(&tab).unwrap();
            assert_eq!(json, format!("\"{}\"", tab.as_str()));
        }
    }
}
