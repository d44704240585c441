//! Trait definitions for external dependencies

mod gateway;
mod tan;

pub use gateway::{BankGateway, FetchOutcome, GatewayFactory, TanChallenge};
pub use tan::{FixedTanProvider, TanProvider};
