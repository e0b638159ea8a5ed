//! scrimkit - parse scrim combat-log exports and report per-player analytics.
//!
//! Usage:
//!   scrimkit parse <files...> [--save <db> --scrim-id <id>]
//!   scrimkit stats <file> --player <name> [--config <toml>] [--json]
//!   scrimkit delete <scrim-id> [--db <db>]
//!   scrimkit list [--db <db>]

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::EnvFilter;

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Parse {
            files,
            save,
            scrim_id,
        } => commands::parse(&files, save, scrim_id),
        Commands::Stats {
            file,
            player,
            config,
            json,
        } => commands::stats(&file, &player, config.as_deref(), json),
        Commands::Delete { scrim_id, db } => commands::delete(scrim_id, db),
        Commands::List { db } => commands::list(db),
    }
}

#[derive(Parser)]
#[command(version, about = "Scrim combat-log parser and analytics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one or more text exports and print a summary.
    Parse {
        files: Vec<PathBuf>,

        /// Save the parsed workbook to this SQLite database.
        #[arg(long)]
        save: Option<PathBuf>,

        /// Scrim id to save under (required with --save).
        #[arg(long)]
        scrim_id: Option<i64>,
    },
    /// Per-player analytics for one export.
    Stats {
        file: PathBuf,

        #[arg(short, long)]
        player: String,

        /// Analytics config TOML (fight gap, X-Factor weights).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit machine-readable JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Delete a stored scrim; cascades across all event tables.
    Delete {
        scrim_id: i64,

        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// List stored scrim ids.
    List {
        #[arg(long)]
        db: Option<PathBuf>,
    },
}
