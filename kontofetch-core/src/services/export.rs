//! Export orchestrator
//!
//! Drives one bank session per configured login and writes three JSON files
//! per bank into the output directory. Banks are processed sequentially in
//! identifier order; a failure in any bank halts the whole run.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{Months, NaiveDate, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::{BankLogin, Config};
use crate::domain::result::{Error, Result};
use crate::domain::Record;
use crate::flatten::{flatten, FlatRecord};
use crate::ports::{GatewayFactory, TanProvider};
use crate::services::session::BankSession;

/// Per-run overrides from the command line
#[derive(Debug, Default, Clone)]
pub struct ExportOptions {
    /// Transaction range start; defaults to one month before now
    pub start_date: Option<NaiveDate>,
    /// Output directory; defaults to the configured data path
    pub data_path: Option<PathBuf>,
    /// Export a single bank instead of all configured ones
    pub bank: Option<String>,
}

/// What one bank's export produced
#[derive(Debug, Serialize)]
pub struct BankExport {
    pub bank: String,
    pub accounts: usize,
    pub balances: usize,
    pub transactions: usize,
    pub files: Vec<PathBuf>,
}

/// Run summary across all exported banks
#[derive(Debug, Serialize)]
pub struct ExportSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub banks: Vec<BankExport>,
}

pub struct ExportService {
    config: Config,
    factory: Box<dyn GatewayFactory>,
    tan_provider: Box<dyn TanProvider>,
}

/// One calendar month before `today`, clamped to the last day of the
/// shorter month (2024-03-31 -> 2024-02-29).
pub fn default_start_date(today: NaiveDate) -> NaiveDate {
    today - Months::new(1)
}

impl ExportService {
    pub fn new(
        config: Config,
        factory: Box<dyn GatewayFactory>,
        tan_provider: Box<dyn TanProvider>,
    ) -> Self {
        Self {
            config,
            factory,
            tan_provider,
        }
    }

    /// Export accounts, balances, and transactions for every selected bank
    pub fn run(&self, options: &ExportOptions) -> Result<ExportSummary> {
        let today = Utc::now().naive_utc().date();
        let start_date = options
            .start_date
            .unwrap_or_else(|| default_start_date(today));
        let end_date = today;
        info!(%start_date, %end_date, "transaction date range");

        let data_path = options
            .data_path
            .clone()
            .unwrap_or_else(|| self.config.data_path.clone());
        std::fs::create_dir_all(&data_path)?;

        let selected: Vec<(&String, &BankLogin)> = match &options.bank {
            Some(name) => {
                let entry = self
                    .config
                    .banks
                    .get_key_value(name)
                    .ok_or_else(|| Error::Config(format!("unknown bank '{name}'")))?;
                vec![entry]
            }
            None => self.config.banks.iter().collect(),
        };

        let mut banks = Vec::with_capacity(selected.len());
        for (bank_id, login) in selected {
            banks.push(self.export_bank(bank_id, login, start_date, end_date, &data_path)?);
        }

        Ok(ExportSummary {
            start_date,
            end_date,
            banks,
        })
    }

    fn export_bank(
        &self,
        bank_id: &str,
        login: &BankLogin,
        start_date: NaiveDate,
        end_date: NaiveDate,
        data_path: &Path,
    ) -> Result<BankExport> {
        info!(bank = bank_id, "exporting");
        let mut gateway = self.factory.connect(login, &self.config.product_id)?;
        let mut session = BankSession::new(gateway.as_mut(), self.tan_provider.as_ref());

        let accounts = session.list_accounts()?;
        let account_records: Vec<Record> = accounts
            .iter()
            .map(|account| account.to_raw().normalize())
            .collect::<Result<_>>()?;
        let flat_accounts = flatten_all(&account_records)?;

        let flat_balances = flatten_all(&session.list_balances()?)?;

        // Open-ended range: transactions booked today must be included, so
        // only the start bound is sent to the bank.
        let transactions = session.list_transactions(Some(start_date), None)?;
        let flat_transactions = flatten_all(&transactions)?;

        let files = vec![
            write_json(data_path, bank_id, "accounts", &flat_accounts)?,
            write_json(data_path, bank_id, "balance", &flat_balances)?,
            write_json(data_path, bank_id, "transactions", &flat_transactions)?,
        ];

        Ok(BankExport {
            bank: bank_id.to_string(),
            accounts: flat_accounts.len(),
            balances: flat_balances.len(),
            transactions: flat_transactions.len(),
            files,
        })
    }
}

fn flatten_all(records: &[Record]) -> Result<Vec<FlatRecord>> {
    records.iter().map(flatten).collect()
}

/// Write one category file as a JSON array, overwriting any existing file
fn write_json(
    dir: &Path,
    bank_id: &str,
    category: &str,
    records: &[FlatRecord],
) -> Result<PathBuf> {
    let path = dir.join(format!("{bank_id}_{category}.json"));
    let file = File::create(&path)?;
    serde_json::to_writer(file, records)?;
    info!(path = %path.display(), records = records.len(), "file saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_start_date_is_one_month_back() {
        assert_eq!(default_start_date(date(2024, 2, 15)), date(2024, 1, 15));
    }

    #[test]
    fn test_default_start_date_clamps_month_end() {
        assert_eq!(default_start_date(date(2024, 3, 31)), date(2024, 2, 29));
        assert_eq!(default_start_date(date(2023, 3, 31)), date(2023, 2, 28));
    }
}
