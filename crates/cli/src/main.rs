//! `momentum` command-line client
//!
//! Thin shell over `momentum-infra`: loads configuration, builds the client
//! manager and prints backend results as pretty JSON on stdout. Logs go to
//! stderr.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::ActorsCommand;

#[derive(Parser)]
#[command(name = "momentum", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (JSON or TOML); environment variables are used when omitted
    #[arg(long, global = true, env = "MOMENTUM_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a citizen by CPR number
    Citizen { cpr: String },
    /// List a citizen's tasks
    Tasks { citizen_id: String },
    /// Search production units
    Units {
        /// Search term; `*` matches every unit
        #[arg(long, default_value = "*")]
        term: String,
    },
    /// Show a tag by title
    Tag { title: String },
    /// Add or remove a citizen's responsible actors
    Actors {
        #[command(subcommand)]
        action: ActorsCommand,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_target(true).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) => tracing::debug!(error = %e, "no .env file loaded"),
    }

    let manager = commands::connect(cli.config)?;

    match cli.command {
        Commands::Citizen { cpr } => commands::citizen(&manager, &cpr).await,
        Commands::Tasks { citizen_id } => commands::tasks(&manager, &citizen_id).await,
        Commands::Units { term } => commands::units(&manager, &term).await,
        Commands::Tag { title } => commands::tag(&manager, &title).await,
        Commands::Actors { action } => commands::actors(&manager, action).await,
    }
}
