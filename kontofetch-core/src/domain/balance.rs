//! Account balance domain model

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::record::{Record, Value};

/// An account balance as of a booking date
///
/// `status` is the MT940 credit/debit mark ("C" or "D").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountBalance {
    pub status: String,
    pub amount: Decimal,
    pub currency: String,
    pub date: NaiveDate,
}

impl AccountBalance {
    /// Nested record value matching the protocol layer's balance shape:
    /// status, an amount sub-record, and the booking date.
    pub fn to_value(&self) -> Value {
        let mut amount = Record::new();
        amount.push("amount", Value::Amount(self.amount));
        amount.push("currency", Value::text(&self.currency));

        let mut record = Record::new();
        record.push("status", Value::text(&self.status));
        record.push("amount", Value::Record(amount));
        record.push("date", Value::Date(self.date));
        Value::Record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_nests_amount_sub_record() {
        let balance = AccountBalance {
            status: "C".to_string(),
            amount: Decimal::new(1875000, 2),
            currency: "EUR".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        };

        match balance.to_value() {
            Value::Record(record) => {
                assert_eq!(record.len(), 3);
                assert!(matches!(record.entries()[1].1, Value::Record(_)));
            }
            other => panic!("expected record, got {:?}", other.kind()),
        }
    }
}
