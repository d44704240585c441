//! kontofetch core - fetch bank data over HBCI/FinTS and export it as JSON
//!
//! The crate follows a small hexagonal layout:
//!
//! - **domain**: record values, accounts, balances, the error type
//! - **ports**: trait boundaries for the protocol client and the TAN step
//! - **services**: bank session adapter and export orchestrator
//! - **adapters**: gateway implementations (demo backend)
//!
//! The flattener in [`flatten`] is the heart of the crate: it normalizes the
//! heterogeneous nested records a FinTS dialog produces into flat,
//! JSON-serializable mappings.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod fingerprint;
pub mod flatten;
pub mod ports;
pub mod services;

// Re-export commonly used types at crate root
pub use config::{BankLogin, Config};
pub use domain::result::{Error, Result};
pub use domain::{AccountBalance, RawRecord, Record, SepaAccount, SwiftDate, Value};
pub use fingerprint::fingerprint;
pub use flatten::{flatten, FlatRecord, FlatValue};
pub use services::{default_start_date, ExportOptions, ExportService, ExportSummary};
