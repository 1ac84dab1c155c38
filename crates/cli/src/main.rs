//! Flipzokart CLI - Database migrations and role management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! fz-cli migrate
//!
//! # Promote the default admin account
//! fz-cli admin promote
//!
//! # Promote someone else, creating the account if needed
//! fz-cli admin promote -e ops@flipzokart.com --create-if-missing -n "Ops"
//!
//! # Create an admin who can log in
//! fz-cli admin create -e admin@example.com -n "Admin Name" -p 'long-password'
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fz-cli")]
#[command(author, version, about = "Flipzokart CLI tools")]
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
    /// Give an existing account the admin role
    Promote {
        /// Account email address
        #[arg(short, long, default_value = commands::admin::DEFAULT_ADMIN_EMAIL)]
        email: String,

        /// Create a password-less admin account if none exists
        #[arg(long)]
        create_if_missing: bool,

        /// Display name for a created account
        #[arg(short, long, default_value = "Admin User")]
        name: String,
    },
    /// Create a new admin user with a password
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Login password (8-128 characters)
        #[arg(short, long)]
        password: String,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,
    },
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
            AdminAction::Promote {
                email,
                create_if_missing,
                name,
            } => {
                commands::admin::promote(&email, create_if_missing.then_some(name.as_str()))
                    .await?;
            }
            AdminAction::Create {
                email,
                name,
                password,
                phone,
            } => {
                commands::admin::create_user(&email, &name, &password, phone.as_deref()).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_promote_defaults_to_original_admin() {
        let cli = Cli::try_parse_from(["fz-cli", "admin", "promote"]);
        let Ok(Cli {
            command:
                Commands::Admin {
                    action:
                        AdminAction::Promote {
                            email,
                            create_if_missing,
                            ..
                        },
                },
        }) = cli
        else {
            panic!("expected admin promote");
        };
        assert_eq!(email, "admin@flipzokart.com");
        assert!(!create_if_missing);
    }
}
