//! Couplet CLI - Database migrations and admin management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! couplet-cli migrate
//!
//! # Create an admin user (out-of-band bootstrap)
//! couplet-cli admin create -e root@couplet.app -p 'a long password' -r full_admin
//!
//! # Grant / revoke a privilege
//! couplet-cli admin grant -e ops@couplet.app -n view_payments
//! couplet-cli admin revoke -e ops@couplet.app -n view_payments
//!
//! # List admins and their grants
//! couplet-cli admin list
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "couplet-cli")]
#[command(author, version, about = "Couplet admin CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin password (min 8 characters)
        #[arg(short, long)]
        password: String,

        /// Admin role (`full_admin`, `custom_admin`)
        #[arg(short, long, default_value = "custom_admin")]
        role: String,
    },
    /// Grant a privilege to an admin
    Grant {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Privilege name (e.g. `view_payments`)
        #[arg(short, long)]
        name: String,
    },
    /// Revoke a privilege from an admin
    Revoke {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Privilege name (e.g. `view_payments`)
        #[arg(short, long)]
        name: String,
    },
    /// List all admins with their grants
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                password,
                role,
            } => {
                commands::admin::create_user(&email, &password, &role).await?;
            }
            AdminAction::Grant { email, name } => {
                commands::admin::grant(&email, &name).await?;
            }
            AdminAction::Revoke { email, name } => {
                commands::admin::revoke(&email, &name).await?;
            }
            AdminAction::List => commands::admin::list().await?,
        },
    }
    Ok(())
}
