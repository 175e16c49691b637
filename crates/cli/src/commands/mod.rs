//! CLI subcommands.

pub mod accounts;
pub mod migrate;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use saddle_core::AccountIdError;
use saddle_dashboard::db::{self, MigrationError, RepositoryError};

/// Errors from CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] MigrationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The account name has no usable characters.
    #[error("Invalid account name: {0}")]
    InvalidName(#[from] AccountIdError),

    /// An account with the derived id already exists.
    #[error("Ad account already exists with id: {0}")]
    AccountExists(String),
}

/// Connect using `DASHBOARD_DATABASE_URL`, falling back to `DATABASE_URL`.
async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DASHBOARD_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CommandError::MissingEnvVar("DASHBOARD_DATABASE_URL"))?;

    tracing::info!("Connecting to dashboard database...");
    Ok(db::create_pool(&SecretString::from(database_url)).await?)
}
