//! Export command - fetch bank data and write JSON files

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::Colorize;
use kontofetch_core::adapters;
use kontofetch_core::{ExportOptions, ExportService};

use super::load_config;
use crate::tan::TanPrompt;

pub fn run(
    start_date: Option<&str>,
    data_path: Option<PathBuf>,
    bank: Option<String>,
    json: bool,
) -> Result<()> {
    let start_date = start_date
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("Invalid --start-date '{raw}', expected YYYY-MM-DD"))
        })
        .transpose()?;

    let config = load_config()?;
    let factory = adapters::factory_for(&config)?;
    let service = ExportService::new(config, factory, Box::new(TanPrompt));

    let options = ExportOptions {
        start_date,
        data_path,
        bank,
    };
    let summary = service.run(&options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {} to {}",
        "Date range:".bold(),
        summary.start_date,
        summary.end_date
    );
    println!();
    for bank in &summary.banks {
        println!("{} {}", "Exported:".green(), bank.bank);
        println!("  Accounts: {}", bank.accounts);
        println!("  Balances: {}", bank.balances);
        println!("  Transactions: {}", bank.transactions);
        for file in &bank.files {
            println!("  {}", file.display());
        }
        println!();
    }

    Ok(())
}
