//! SEPA account domain model

use super::record::{RawRecord, Value};

/// A SEPA account as reported by the bank during dialog initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SepaAccount {
    pub iban: String,
    pub bic: String,
    pub account_number: String,
    pub subaccount: Option<String>,
    pub blz: String,
}

impl SepaAccount {
    /// Convert into the structured raw-record shape for export.
    ///
    /// Field names follow the order the protocol layer reports them in.
    pub fn to_raw(&self) -> RawRecord {
        RawRecord::Structured {
            fields: vec![
                "iban".to_string(),
                "bic".to_string(),
                "account_number".to_string(),
                "subaccount".to_string(),
                "blz".to_string(),
            ],
            values: vec![
                Value::text(&self.iban),
                Value::text(&self.bic),
                Value::text(&self.account_number),
                self.subaccount
                    .as_ref()
                    .map(Value::text)
                    .unwrap_or(Value::Null),
                Value::text(&self.blz),
            ],
        }
    }
}
