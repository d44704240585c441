//! Concrete implementations of the gateway port

pub mod demo;

pub use demo::{DemoGateway, DemoGatewayFactory};

use crate::config::Config;
use crate::domain::result::{Error, Result};
use crate::ports::GatewayFactory;

/// Pick the gateway factory for this run.
///
/// Only the demo backend ships with this build; a real FinTS dialog
/// implementation plugs in through `ports::BankGateway`.
pub fn factory_for(config: &Config) -> Result<Box<dyn GatewayFactory>> {
    if config.demo_mode {
        Ok(Box::new(DemoGatewayFactory::new()))
    } else {
        Err(Error::config(
            "no FinTS dialog backend is available in this build; set FINTS_DEMO_MODE=1 \
             or connect one through kontofetch_core::ports::BankGateway",
        ))
    }
}
