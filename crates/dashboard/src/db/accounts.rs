//! Ad account repository.
//!
//! Queries use the runtime-checked sqlx API so the crate builds without a
//! live database or an offline query cache.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use saddle_core::{AccountId, AccountMetadata, AccountType, AdAccount};

use super::RepositoryError;
use crate::services::AccountStore;

/// `PostgreSQL`-backed [`AccountStore`].
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: String,
    name: String,
    account_type: String,
    metadata: Json<AccountMetadata>,
}

impl TryFrom<AccountRow> for AdAccount {
    type Error = RepositoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let id = AccountId::parse(&row.id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid account id in database: {e}"))
        })?;
        let account_type = row.account_type.parse::<AccountType>().map_err(|e| {
            RepositoryError::DataCorruption(format!("account {id}: {e}"))
        })?;

        Ok(Self {
            id,
            name: row.name,
            account_type,
            metadata: row.metadata.0,
        })
    }
}

impl PgAccountStore {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn get_all_accounts(&self) -> Result<Vec<AdAccount>, RepositoryError> {
        let rows: Vec<AccountRow> = sqlx::query_as(
            r"
            SELECT id, name, account_type, metadata
            FROM ad_accounts
            ORDER BY created_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AdAccount::try_from).collect()
    }

    async fn create_account(
        &self,
        id: &AccountId,
        name: &str,
        account_type: AccountType,
        metadata: &AccountMetadata,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO ad_accounts (id, name, account_type, metadata)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            ",
        )
        .bind(id.as_str())
        .bind(name)
        .bind(account_type.as_str())
        .bind(Json(metadata))
        .execute(&self.pool)
        .await?;

        let created = result.rows_affected() == 1;
        if created {
            tracing::info!(account_id = %id, %account_type, "Ad account created");
        } else {
            tracing::debug!(account_id = %id, "Ad account already exists");
        }
        Ok(created)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
