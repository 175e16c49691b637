//! SADDLE CLI - Database migrations and ad account management.
//!
//! # Usage
//!
//! ```bash
//! # Apply the dashboard and session store migrations
//! saddle-cli migrate
//!
//! # List ad accounts
//! saddle-cli accounts list
//!
//! # Create an ad account
//! saddle-cli accounts create -n "Acme Corp" -t client -c AED --marketplace "Amazon AE"
//! ```
//!
//! # Environment Variables
//!
//! - `DASHBOARD_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use saddle_core::{AccountType, Currency};

mod commands;

#[derive(Parser)]
#[command(name = "saddle-cli")]
#[command(author, version, about = "SADDLE dashboard CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage ad accounts
    Accounts {
        #[command(subcommand)]
        action: AccountsAction,
    },
}

#[derive(Subcommand)]
enum AccountsAction {
    /// List all ad accounts
    List,
    /// Create a new ad account; the id is derived from the name
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account type (`brand`, `client`, `marketplace`, `test`)
        #[arg(short = 't', long = "type", default_value = "brand")]
        account_type: AccountType,

        /// Currency code (`USD`, `AED`, `SAR`, `GBP`, `EUR`, `INR`)
        #[arg(short, long, default_value = "USD")]
        currency: Currency,

        /// Marketplace, e.g. "Amazon US"
        #[arg(long, default_value = "")]
        marketplace: String,

        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Accounts { action } => match action {
            AccountsAction::List => commands::accounts::list().await?,
            AccountsAction::Create {
                name,
                account_type,
                currency,
                marketplace,
                notes,
            } => {
                commands::accounts::create(&name, account_type, currency, &marketplace, &notes)
                    .await?;
            }
        },
    }
    Ok(())
}
