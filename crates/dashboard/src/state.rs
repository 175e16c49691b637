//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::services::{AccountStore, AuthService};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The collaborators are trait objects so tests
/// can swap in in-memory implementations.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
    auth: Arc<dyn AuthService>,
    accounts: Arc<dyn AccountStore>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(
        config: DashboardConfig,
        auth: Arc<dyn AuthService>,
        accounts: Arc<dyn AccountStore>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                auth,
                accounts,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// The authentication service.
    #[must_use]
    pub fn auth(&self) -> &dyn AuthService {
        self.inner.auth.as_ref()
    }

    /// The ad account store.
    #[must_use]
    pub fn accounts(&self) -> &dyn AccountStore {
        self.inner.accounts.as_ref()
    }
}
