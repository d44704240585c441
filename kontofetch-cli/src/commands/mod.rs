//! CLI command implementations

pub mod banks;
pub mod export;

use anyhow::{Context, Result};
use kontofetch_core::Config;

/// Load configuration from the environment
pub fn load_config() -> Result<Config> {
    Config::from_env().context("Failed to load configuration from environment")
}
