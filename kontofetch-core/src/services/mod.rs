//! Business logic orchestration

pub mod export;
pub mod session;

pub use export::{default_start_date, ExportOptions, ExportService, ExportSummary};
pub use session::BankSession;
