//! Core domain entities
//!
//! Pure data structures with conversion logic - no I/O or external
//! dependencies.

mod account;
mod balance;
pub mod record;
pub mod result;

pub use account::SepaAccount;
pub use balance::AccountBalance;
pub use record::{RawRecord, Record, SwiftDate, Value};
