//! kontofetch CLI - export bank data over HBCI/FinTS to JSON files

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod tan;

use commands::{banks, export};

/// kontofetch - download accounts, balances and transactions over FinTS
#[derive(Parser)]
#[command(name = "kf", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch accounts, balances and transactions, write one JSON file per category
    Export {
        /// Start date for transactions (YYYY-MM-DD, default: one month back)
        #[arg(long)]
        start_date: Option<String>,
        /// Output directory for JSON files (default: DATA_PATH)
        #[arg(long)]
        data_path: Option<PathBuf>,
        /// Export a single configured bank instead of all
        #[arg(long)]
        bank: Option<String>,
        /// Output the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// List configured banks
    Banks {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Export {
            start_date,
            data_path,
            bank,
            json,
        } => export::run(start_date.as_deref(), data_path, bank, json),
        Commands::Banks { json } => banks::run(json),
    }
}
