//! Database migration command.
//!
//! Applies `crates/dashboard/migrations/` and the tower-sessions store schema.
//! The server never migrates on startup.

use saddle_dashboard::db;

use super::{CommandError, connect};

/// Run all dashboard migrations.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running dashboard migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("Dashboard migrations complete!");
    Ok(())
}
