//! Bank gateway port
//!
//! The HBCI/FinTS dialog itself (PIN/TAN handshake, message framing, SEPA
//! parsing) lives behind this trait. The core never sees wire bytes, only
//! domain objects and polymorphic records.

use chrono::NaiveDate;

use crate::config::BankLogin;
use crate::domain::result::Result;
use crate::domain::{AccountBalance, Record, SepaAccount};

/// A pending second-factor challenge reported by the protocol layer
#[derive(Debug, Clone)]
pub struct TanChallenge {
    /// Operator-facing challenge text from the bank
    pub message: String,
    /// Dialog reference needed to resume the interrupted operation
    pub reference: String,
}

/// Outcome of a transaction fetch: either booked records, or a TAN
/// challenge that must be answered before the records are released.
#[derive(Debug)]
pub enum FetchOutcome {
    Booked(Vec<Record>),
    TanRequired(TanChallenge),
}

/// External banking-protocol client capability
///
/// One gateway per bank login; gateways share no state. Operations are only
/// valid inside an open dialog.
pub trait BankGateway {
    fn open_dialog(&mut self) -> Result<()>;

    fn close_dialog(&mut self) -> Result<()>;

    /// List the SEPA accounts reachable through this login
    fn sepa_accounts(&mut self) -> Result<Vec<SepaAccount>>;

    /// Current balance of one account
    fn balance(&mut self, account: &SepaAccount) -> Result<AccountBalance>;

    /// Booked transactions of one account, filtered to `[start, end)`
    fn transactions(
        &mut self,
        account: &SepaAccount,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<FetchOutcome>;

    /// Answer a TAN challenge and receive the withheld records
    fn submit_tan(&mut self, challenge: &TanChallenge, tan: &str) -> Result<Vec<Record>>;
}

/// Creates one gateway per bank login
pub trait GatewayFactory {
    fn connect(&self, login: &BankLogin, product_id: &str) -> Result<Box<dyn BankGateway>>;
}
