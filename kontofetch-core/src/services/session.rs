//! Bank session adapter
//!
//! Wraps a gateway and resolves TAN challenges through the injected
//! provider. Every operation runs inside its own dialog scope: logically
//! independent fetches never share a dialog, and the dialog is closed on
//! the failure path too.

use chrono::NaiveDate;

use crate::domain::result::Result;
use crate::domain::{Record, SepaAccount, Value};
use crate::ports::{BankGateway, FetchOutcome, TanProvider};

pub struct BankSession<'a> {
    gateway: &'a mut dyn BankGateway,
    tan_provider: &'a dyn TanProvider,
}

impl<'a> BankSession<'a> {
    pub fn new(gateway: &'a mut dyn BankGateway, tan_provider: &'a dyn TanProvider) -> Self {
        Self {
            gateway,
            tan_provider,
        }
    }

    /// List SEPA accounts within a fresh dialog
    pub fn list_accounts(&mut self) -> Result<Vec<SepaAccount>> {
        self.with_dialog(|gateway| gateway.sepa_accounts())
    }

    /// One balance row per account: the iban plus the nested balance
    pub fn list_balances(&mut self) -> Result<Vec<Record>> {
        self.with_dialog(|gateway| {
            let accounts = gateway.sepa_accounts()?;
            let mut rows = Vec::with_capacity(accounts.len());
            for account in accounts {
                let balance = gateway.balance(&account)?;
                let mut row = Record::new();
                row.push("iban", Value::text(&account.iban));
                row.push("balance", balance.to_value());
                rows.push(row);
            }
            Ok(rows)
        })
    }

    /// Booked transactions of every account in `[start, end)`, with the
    /// owning account's iban merged into each record.
    ///
    /// If the bank demands a TAN the whole fetch blocks on the provider;
    /// there is no timeout or cancellation.
    pub fn list_transactions(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Record>> {
        let tan_provider = self.tan_provider;
        self.with_dialog(|gateway| {
            let accounts = gateway.sepa_accounts()?;
            let mut results = Vec::new();
            for account in accounts {
                let booked = match gateway.transactions(&account, start, end)? {
                    FetchOutcome::Booked(records) => records,
                    FetchOutcome::TanRequired(challenge) => {
                        let tan = tan_provider.obtain(&challenge)?;
                        gateway.submit_tan(&challenge, &tan)?
                    }
                };
                for mut record in booked {
                    record.set("iban", Value::text(&account.iban));
                    results.push(record);
                }
            }
            Ok(results)
        })
    }

    /// Open a dialog, run the operation, and always attempt to close.
    /// The operation's error wins over a close error.
    fn with_dialog<T>(
        &mut self,
        op: impl FnOnce(&mut dyn BankGateway) -> Result<T>,
    ) -> Result<T> {
        self.gateway.open_dialog()?;
        let result = op(&mut *self.gateway);
        let closed = self.gateway.close_dialog();
        match result {
            Ok(value) => {
                closed?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::Error;
    use crate::domain::AccountBalance;
    use crate::ports::{FixedTanProvider, TanChallenge};
    use rust_decimal::Decimal;

    fn account() -> SepaAccount {
        SepaAccount {
            iban: "DE02120300000000202051".to_string(),
            bic: "BYLADEM1001".to_string(),
            account_number: "202051".to_string(),
            subaccount: None,
            blz: "12030000".to_string(),
        }
    }

    /// Gateway that demands a TAN on the first transaction fetch and
    /// records dialog open/close pairs.
    struct ScriptedGateway {
        open: bool,
        opens: usize,
        closes: usize,
        tans_submitted: Vec<String>,
        fail_accounts: bool,
    }

    impl ScriptedGateway {
        fn new() -> Self {
            Self {
                open: false,
                opens: 0,
                closes: 0,
                tans_submitted: Vec::new(),
                fail_accounts: false,
            }
        }

        fn booked() -> Vec<Record> {
            let mut record = Record::new();
            record.push("amount", Value::Amount(Decimal::new(-1250, 2)));
            record.push("purpose", Value::text("rent"));
            vec![record]
        }
    }

    impl BankGateway for ScriptedGateway {
        fn open_dialog(&mut self) -> Result<()> {
            assert!(!self.open, "dialog already open");
            self.open = true;
            self.opens += 1;
            Ok(())
        }

        fn close_dialog(&mut self) -> Result<()> {
            assert!(self.open, "no dialog to close");
            self.open = false;
            self.closes += 1;
            Ok(())
        }

        fn sepa_accounts(&mut self) -> Result<Vec<SepaAccount>> {
            assert!(self.open);
            if self.fail_accounts {
                return Err(Error::protocol("9050: dialog rejected"));
            }
            Ok(vec![account()])
        }

        fn balance(&mut self, _account: &SepaAccount) -> Result<AccountBalance> {
            assert!(self.open);
            Ok(AccountBalance {
                status: "C".to_string(),
                amount: Decimal::new(482347, 2),
                currency: "EUR".to_string(),
                date: chrono::NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            })
        }

        fn transactions(
            &mut self,
            _account: &SepaAccount,
            _start: Option<NaiveDate>,
            _end: Option<NaiveDate>,
        ) -> Result<FetchOutcome> {
            assert!(self.open);
            Ok(FetchOutcome::TanRequired(TanChallenge {
                message: "Enter the TAN shown in your app".to_string(),
                reference: "dialog-42".to_string(),
            }))
        }

        fn submit_tan(&mut self, challenge: &TanChallenge, tan: &str) -> Result<Vec<Record>> {
            assert!(self.open);
            assert_eq!(challenge.reference, "dialog-42");
            self.tans_submitted.push(tan.to_string());
            Ok(Self::booked())
        }
    }

    #[test]
    fn test_tan_challenge_is_resolved_and_iban_injected() {
        let mut gateway = ScriptedGateway::new();
        let provider = FixedTanProvider("123456".to_string());

        let records = BankSession::new(&mut gateway, &provider)
            .list_transactions(None, None)
            .unwrap();

        assert_eq!(gateway.tans_submitted, vec!["123456"]);
        assert_eq!(records.len(), 1);
        let (key, value) = records[0].entries().last().unwrap();
        assert_eq!(key, "iban");
        assert_eq!(*value, Value::text("DE02120300000000202051"));
    }

    #[test]
    fn test_each_operation_uses_its_own_dialog() {
        let mut gateway = ScriptedGateway::new();
        let provider = FixedTanProvider("123456".to_string());
        let mut session = BankSession::new(&mut gateway, &provider);

        session.list_accounts().unwrap();
        session.list_balances().unwrap();
        session.list_transactions(None, None).unwrap();

        assert_eq!(gateway.opens, 3);
        assert_eq!(gateway.closes, 3);
    }

    #[test]
    fn test_dialog_closed_when_fetch_fails() {
        let mut gateway = ScriptedGateway::new();
        gateway.fail_accounts = true;
        let provider = FixedTanProvider("123456".to_string());

        let result = BankSession::new(&mut gateway, &provider).list_accounts();

        assert!(matches!(result, Err(Error::Protocol(_))));
        assert_eq!(gateway.opens, 1);
        assert_eq!(gateway.closes, 1);
    }

    #[test]
    fn test_balance_rows_carry_iban_and_nested_balance() {
        let mut gateway = ScriptedGateway::new();
        let provider = FixedTanProvider("123456".to_string());

        let rows = BankSession::new(&mut gateway, &provider)
            .list_balances()
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entries()[0].0, "iban");
        assert!(matches!(rows[0].entries()[1].1, Value::Record(_)));
    }
}
