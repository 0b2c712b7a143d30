//! `sessdir` -- admin CLI for active-session storage.
//!
//! Provides the following subcommands:
//!
//! - `sessdir list` -- List the current user's sessions.
//! - `sessdir count` -- Print the number of sessions.
//! - `sessdir exists <id>` -- Check whether a session id is in use.
//! - `sessdir get <id> <name>` / `sessdir set <id> <name> <value>` -- Read or
//!   write one property.
//! - `sessdir show <id>` -- Show every known property of a session.
//! - `sessdir remove <id>` -- Remove a session.
//!
//! The backend (local directory or remote authority) is selected from
//! configuration exactly as the server selects it.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use sessdir_platform::NativePlatform;

mod commands;

/// Active-session storage admin CLI.
#[derive(Parser)]
#[command(name = "sessdir", about = "Active-session storage admin CLI", version)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (overrides auto-discovery).
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List session ids with their creation and last-use times.
    List,

    /// Print the number of sessions.
    Count,

    /// Check whether a session id is in use.
    Exists {
        /// Session id to check.
        session_id: String,
    },

    /// Print one property of a session.
    Get {
        /// Session id.
        session_id: String,

        /// Property name (e.g. "last_used", "label").
        name: String,
    },

    /// Create or overwrite one property of a session.
    Set {
        /// Session id.
        session_id: String,

        /// Property name.
        name: String,

        /// New value.
        value: String,
    },

    /// Show every known property of a session.
    Show {
        /// Session id.
        session_id: String,

        /// Print a JSON object instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Remove a session and all of its properties.
    Remove {
        /// Session id.
        session_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let platform = Arc::new(NativePlatform::new());
    let config = commands::load_config(platform.as_ref(), cli.config.as_deref()).await?;
    let directory = commands::open_directory(platform, &config).await?;

    match cli.command {
        Commands::List => commands::inventory::list(directory.as_ref()).await?,
        Commands::Count => commands::inventory::count(directory.as_ref()).await?,
        Commands::Exists { session_id } => {
            commands::inventory::exists(directory.as_ref(), &session_id).await?
        }
        Commands::Get { session_id, name } => {
            commands::properties::get(directory.as_ref(), &session_id, &name).await?
        }
        Commands::Set {
            session_id,
            name,
            value,
        } => commands::properties::set(directory.as_ref(), &session_id, &name, &value).await?,
        Commands::Show { session_id, json } => {
            commands::properties::show(directory.as_ref(), &session_id, json).await?
        }
        Commands::Remove { session_id } => {
            commands::properties::remove(directory.as_ref(), &session_id).await?
        }
    }

    Ok(())
}
