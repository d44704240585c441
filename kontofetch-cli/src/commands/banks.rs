//! Banks command - list configured bank logins
//!
//! The PIN is never printed in either output mode.

use anyhow::Result;
use colored::Colorize;

use super::load_config;

pub fn run(json: bool) -> Result<()> {
    let config = load_config()?;

    if json {
        let listing: Vec<serde_json::Value> = config
            .banks
            .iter()
            .map(|(id, login)| {
                serde_json::json!({
                    "bank": id,
                    "bank_code": login.bank_code,
                    "login_name": login.login_name,
                    "endpoint": login.endpoint.as_str(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    for (id, login) in &config.banks {
        println!("{} {} ({})", "Bank:".bold(), id, login.bank_code);
        println!("  Login: {}", login.login_name);
        println!("  Endpoint: {}", login.endpoint);
    }

    Ok(())
}
