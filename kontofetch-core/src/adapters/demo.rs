//! Demo bank gateway
//!
//! Serves canned, deterministic data shaped like real FinTS/MT940 replies:
//! structured SEPA accounts, nested balance objects, and transaction records
//! with an applicant sub-record plus the usual null and empty fields. Can be
//! configured to raise a TAN challenge so the interactive path is testable
//! without a bank.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::config::BankLogin;
use crate::domain::result::{Error, Result};
use crate::domain::{AccountBalance, Record, SepaAccount, SwiftDate, Value};
use crate::ports::{BankGateway, FetchOutcome, GatewayFactory, TanChallenge};

pub struct DemoGateway {
    bank_code: String,
    dialog_open: bool,
    require_tan: bool,
    /// Records withheld behind a pending TAN challenge, keyed by reference
    withheld: Option<(String, Vec<Record>)>,
}

impl DemoGateway {
    pub fn new(bank_code: impl Into<String>, require_tan: bool) -> Self {
        Self {
            bank_code: bank_code.into(),
            dialog_open: false,
            require_tan,
            withheld: None,
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if !self.dialog_open {
            return Err(Error::protocol("no open dialog"));
        }
        Ok(())
    }

    fn booked_records(
        &self,
        account: &SepaAccount,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Vec<Record> {
        let today = Utc::now().naive_utc().date();
        let reference = end.unwrap_or(today);

        // Fixed offsets from the range end; the oldest one falls outside the
        // default one-month window, the first one books on the reference day
        // itself.
        let candidates = [
            (
                reference,
                Decimal::new(-899, 2),
                "groceries",
                "Supermarkt GmbH",
            ),
            (
                reference - Duration::days(3),
                Decimal::new(-1250, 2),
                "rent",
                "Immobilien GmbH",
            ),
            (
                reference - Duration::days(10),
                Decimal::new(219999, 2),
                "salary",
                "ACME AG",
            ),
            (
                reference - Duration::days(35),
                Decimal::new(-4999, 2),
                "insurance",
                "Versicherung AG",
            ),
        ];

        candidates
            .iter()
            .filter(|(date, _, _, _)| {
                start.map_or(true, |s| *date >= s) && end.map_or(true, |e| *date < e)
            })
            .map(|(date, amount, purpose, applicant_name)| {
                let mut amount_rec = Record::new();
                amount_rec.push("amount", Value::Amount(*amount));
                amount_rec.push("currency", Value::text("EUR"));

                let mut applicant = Record::new();
                applicant.push("name", Value::text(*applicant_name));
                applicant.push(
                    "iban",
                    Value::text(format!("DE44500105175407{}", account.account_number)),
                );
                applicant.push("bin", Value::Null);

                let mut record = Record::new();
                record.push("status", Value::text(if amount.is_sign_negative() { "D" } else { "C" }));
                record.push("funds_code", Value::Null);
                record.push("amount", Value::Record(amount_rec));
                record.push("id", Value::text("NMSC"));
                record.push("customer_reference", Value::text("NONREF"));
                record.push("bank_reference", Value::Null);
                record.push("extra_details", Value::text(""));
                record.push("date", Value::Date(*date));
                record.push(
                    "entry_date",
                    Value::SwiftDate(SwiftDate::new(date.year(), date.month(), date.day())),
                );
                record.push("purpose", Value::text(*purpose));
                record.push("applicant", Value::Record(applicant));
                record.push("transactions", Value::List(Vec::new()));
                record
            })
            .collect()
    }
}

impl BankGateway for DemoGateway {
    fn open_dialog(&mut self) -> Result<()> {
        if self.dialog_open {
            return Err(Error::protocol("dialog already open"));
        }
        self.dialog_open = true;
        Ok(())
    }

    fn close_dialog(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.dialog_open = false;
        Ok(())
    }

    fn sepa_accounts(&mut self) -> Result<Vec<SepaAccount>> {
        self.ensure_open()?;
        Ok(vec![
            SepaAccount {
                iban: format!("DE02{}0000202051", self.bank_code),
                bic: "DEMODEFFXXX".to_string(),
                account_number: "202051".to_string(),
                subaccount: None,
                blz: self.bank_code.clone(),
            },
            SepaAccount {
                iban: format!("DE02{}0000202052", self.bank_code),
                bic: "DEMODEFFXXX".to_string(),
                account_number: "202052".to_string(),
                subaccount: None,
                blz: self.bank_code.clone(),
            },
        ])
    }

    fn balance(&mut self, account: &SepaAccount) -> Result<AccountBalance> {
        self.ensure_open()?;
        let amount = if account.account_number == "202051" {
            Decimal::new(482347, 2)
        } else {
            Decimal::new(1875000, 2)
        };
        Ok(AccountBalance {
            status: "C".to_string(),
            amount,
            currency: "EUR".to_string(),
            date: Utc::now().naive_utc().date(),
        })
    }

    fn transactions(
        &mut self,
        account: &SepaAccount,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<FetchOutcome> {
        self.ensure_open()?;
        let records = self.booked_records(account, start, end);

        if self.require_tan {
            let reference = format!("demo-{}", account.account_number);
            self.withheld = Some((reference.clone(), records));
            return Ok(FetchOutcome::TanRequired(TanChallenge {
                message: "Enter the TAN shown in your banking app".to_string(),
                reference,
            }));
        }

        Ok(FetchOutcome::Booked(records))
    }

    fn submit_tan(&mut self, challenge: &TanChallenge, tan: &str) -> Result<Vec<Record>> {
        self.ensure_open()?;
        if tan.trim().is_empty() {
            return Err(Error::Tan("empty TAN".to_string()));
        }
        match self.withheld.take() {
            Some((reference, records)) if reference == challenge.reference => Ok(records),
            _ => Err(Error::Tan(format!(
                "no pending challenge for reference '{}'",
                challenge.reference
            ))),
        }
    }
}

/// Factory handing out one demo gateway per bank login
#[derive(Debug, Default)]
pub struct DemoGatewayFactory {
    require_tan: bool,
}

impl DemoGatewayFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every transaction fetch raise a TAN challenge first
    pub fn with_tan_challenge() -> Self {
        Self { require_tan: true }
    }
}

impl GatewayFactory for DemoGatewayFactory {
    fn connect(&self, login: &BankLogin, _product_id: &str) -> Result<Box<dyn BankGateway>> {
        Ok(Box::new(DemoGateway::new(&login.bank_code, self.require_tan)))
    }
}
