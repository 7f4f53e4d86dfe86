//! Envios CLI - operator tools for the freight integration.
//!
//! # Usage
//!
//! ```bash
//! # Quote a package described in a JSON file
//! envios quote package.json
//!
//! # Quote with request/response logging
//! envios quote package.json --debug
//!
//! # Send the uninstall webhook
//! envios uninstall
//! ```
//!
//! # Commands
//!
//! - `quote` - Print the offers checkout would show for a package
//! - `uninstall` - Notify the freight platform the integration was removed

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "envios")]
#[command(author, version, about = "Envios freight integration tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote a package and print the offers as JSON
    Quote {
        /// Path to a package JSON file
        path: PathBuf,

        /// Log the raw request and response
        #[arg(short, long)]
        debug: bool,
    },
    /// Send the uninstall webhook
    Uninstall,
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "envios=info,envios_freight=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Quote { path, debug } => commands::quote::run(&path, debug).await,
        Commands::Uninstall => commands::uninstall::run().await,
    }
}
