//! Ad account accessor contract.

use async_trait::async_trait;

use saddle_core::{AccountId, AccountMetadata, AccountType, AdAccount};

use crate::db::RepositoryError;

/// Storage for ad accounts.
///
/// Injected into [`crate::state::AppState`]; the settings screens only see
/// this trait.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// All ad accounts, oldest first.
    async fn get_all_accounts(&self) -> Result<Vec<AdAccount>, RepositoryError>;

    /// Create an ad account.
    ///
    /// Returns `Ok(false)` if an account with this id already exists; the
    /// existing account is left untouched.
    async fn create_account(
        &self,
        id: &AccountId,
        name: &str,
        account_type: AccountType,
        metadata: &AccountMetadata,
    ) -> Result<bool, RepositoryError>;

    /// Readiness probe.
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
