//! Ad account management commands.
//!
//! Uses the same store and id derivation as the settings page, so accounts
//! created here behave exactly like accounts created in the dashboard.

use saddle_core::{AccountId, AccountMetadata, AccountType, Currency};
use saddle_dashboard::db::PgAccountStore;
use saddle_dashboard::services::AccountStore;

use super::{CommandError, connect};

/// Print every ad account, oldest first.
pub async fn list() -> Result<(), CommandError> {
    let store = PgAccountStore::new(connect().await?);
    let accounts = store.get_all_accounts().await?;

    #[allow(clippy::print_stdout)]
    {
        if accounts.is_empty() {
            println!("No ad accounts yet.");
        }
        for account in &accounts {
            println!(
                "{:<24} {:<12} {:<4} {}",
                account.id.as_str(),
                account.account_type.as_str(),
                account.metadata.currency.code(),
                account.name
            );
        }
    }
    Ok(())
}

/// Create an ad account.
pub async fn create(
    name: &str,
    account_type: AccountType,
    currency: Currency,
    marketplace: &str,
    notes: &str,
) -> Result<(), CommandError> {
    let name = name.trim();
    let id = AccountId::derive(name)?;
    let metadata = AccountMetadata::from_form(marketplace, currency, notes);

    let store = PgAccountStore::new(connect().await?);
    if !store
        .create_account(&id, name, account_type, &metadata)
        .await?
    {
        return Err(CommandError::AccountExists(id.into()));
    }

    tracing::info!("Created ad account '{}' with id {}", name, id);
    Ok(())
}
