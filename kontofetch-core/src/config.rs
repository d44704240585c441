//! Configuration management
//!
//! Loaded once at startup from the environment and passed by reference into
//! the orchestrator; there is no ambient global state. Variable names match
//! the original exporter's deployment:
//!
//! ```json
//! FINTS_BANK_LOGINS = {
//!   "mybank": {
//!     "FINTS_BANK_CODE": "12030000",
//!     "FINTS_LOGIN_NAME": "user",
//!     "FINTS_LOGIN_PIN": "secret",
//!     "FINTS_HBCI_ENDPOINT": "https://banking-dkb.s-fints-pt-dkb.de/fints30"
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

use crate::domain::result::{Error, Result};

pub const BANK_LOGINS_VAR: &str = "FINTS_BANK_LOGINS";
pub const PRODUCT_ID_VAR: &str = "FINTS_PRODUCT_ID";
pub const DATA_PATH_VAR: &str = "DATA_PATH";
pub const DEMO_MODE_VAR: &str = "FINTS_DEMO_MODE";

/// Raw per-bank login entry as found in FINTS_BANK_LOGINS
#[derive(Debug, Clone, Deserialize)]
struct RawLogin {
    #[serde(rename = "FINTS_BANK_CODE")]
    bank_code: String,
    #[serde(rename = "FINTS_LOGIN_NAME")]
    login_name: String,
    #[serde(rename = "FINTS_LOGIN_PIN")]
    pin: String,
    #[serde(rename = "FINTS_HBCI_ENDPOINT")]
    endpoint: String,
}

/// Credentials and endpoint for one bank, immutable for the process lifetime
#[derive(Debug, Clone)]
pub struct BankLogin {
    pub bank_code: String,
    pub login_name: String,
    pub pin: String,
    pub endpoint: Url,
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bank identifier -> login, iterated in identifier order
    pub banks: BTreeMap<String, BankLogin>,
    /// Product identifier registered with the banks for this client
    pub product_id: String,
    /// Default output directory
    pub data_path: PathBuf,
    /// Serve canned demo data instead of talking to a bank
    pub demo_mode: bool,
}

impl Config {
    /// Load and validate configuration from the environment.
    ///
    /// Fails before any network activity if a required variable is missing
    /// or malformed.
    pub fn from_env() -> Result<Self> {
        let logins = require_var(BANK_LOGINS_VAR)?;
        let product_id = require_var(PRODUCT_ID_VAR)?;
        let data_path = require_var(DATA_PATH_VAR)?;
        let demo_mode = matches!(
            env::var(DEMO_MODE_VAR).ok().as_deref(),
            Some("true" | "1" | "yes" | "TRUE" | "YES")
        );
        Self::from_parts(&logins, &product_id, &data_path, demo_mode)
    }

    pub fn from_parts(
        logins_json: &str,
        product_id: &str,
        data_path: &str,
        demo_mode: bool,
    ) -> Result<Self> {
        if product_id.trim().is_empty() {
            return Err(Error::config("product id must not be empty"));
        }

        let raw: BTreeMap<String, RawLogin> = serde_json::from_str(logins_json)
            .map_err(|e| Error::Config(format!("{BANK_LOGINS_VAR} is not valid JSON: {e}")))?;
        if raw.is_empty() {
            return Err(Error::config("no bank logins configured"));
        }

        let mut banks = BTreeMap::new();
        for (bank_id, login) in raw {
            let endpoint = parse_endpoint(&bank_id, &login.endpoint)?;
            banks.insert(
                bank_id,
                BankLogin {
                    bank_code: login.bank_code,
                    login_name: login.login_name,
                    pin: login.pin,
                    endpoint,
                },
            );
        }

        Ok(Self {
            banks,
            product_id: product_id.to_string(),
            data_path: PathBuf::from(data_path),
            demo_mode,
        })
    }
}

fn require_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("{name} is not set")))
}

/// HBCI endpoints carry a PIN in the request body; HTTPS is mandatory.
fn parse_endpoint(bank_id: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| Error::Config(format!("bank '{bank_id}': invalid HBCI endpoint: {e}")))?;
    if url.scheme() != "https" {
        return Err(Error::Config(format!(
            "bank '{bank_id}': HBCI endpoint must use HTTPS"
        )));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGINS: &str = r#"{
        "dkb": {
            "FINTS_BANK_CODE": "12030000",
            "FINTS_LOGIN_NAME": "alice",
            "FINTS_LOGIN_PIN": "1234",
            "FINTS_HBCI_ENDPOINT": "https://banking-dkb.s-fints-pt-dkb.de/fints30"
        },
        "ing": {
            "FINTS_BANK_CODE": "50010517",
            "FINTS_LOGIN_NAME": "bob",
            "FINTS_LOGIN_PIN": "5678",
            "FINTS_HBCI_ENDPOINT": "https://fints.ing-diba.de/fints/"
        }
    }"#;

    #[test]
    fn test_parses_two_bank_logins() {
        let config = Config::from_parts(LOGINS, "ABCDEF", "/tmp/out", false).unwrap();
        assert_eq!(config.banks.len(), 2);
        let dkb = &config.banks["dkb"];
        assert_eq!(dkb.bank_code, "12030000");
        assert_eq!(dkb.login_name, "alice");
        assert_eq!(dkb.endpoint.host_str(), Some("banking-dkb.s-fints-pt-dkb.de"));
    }

    #[test]
    fn test_banks_iterate_in_identifier_order() {
        let config = Config::from_parts(LOGINS, "ABCDEF", "/tmp/out", false).unwrap();
        let ids: Vec<&String> = config.banks.keys().collect();
        assert_eq!(ids, vec!["dkb", "ing"]);
    }

    #[test]
    fn test_rejects_invalid_json() {
        let result = Config::from_parts("{not json", "ABCDEF", "/tmp/out", false);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_empty_login_set() {
        let result = Config::from_parts("{}", "ABCDEF", "/tmp/out", false);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_empty_product_id() {
        let result = Config::from_parts(LOGINS, "  ", "/tmp/out", false);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_http_endpoint() {
        let logins = r#"{
            "bank": {
                "FINTS_BANK_CODE": "12030000",
                "FINTS_LOGIN_NAME": "alice",
                "FINTS_LOGIN_PIN": "1234",
                "FINTS_HBCI_ENDPOINT": "http://example.com/fints"
            }
        }"#;
        let result = Config::from_parts(logins, "ABCDEF", "/tmp/out", false);
        match result {
            Err(Error::Config(msg)) => assert!(msg.contains("HTTPS")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }
}
