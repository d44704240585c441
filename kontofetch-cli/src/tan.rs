//! Interactive TAN prompt

use colored::Colorize;
use dialoguer::Input;
use kontofetch_core::ports::{TanChallenge, TanProvider};
use kontofetch_core::{Error, Result};

/// Blocking operator prompt for TAN challenges.
///
/// The whole export stalls here until a value is entered; there is no
/// timeout or cancellation.
pub struct TanPrompt;

impl TanProvider for TanPrompt {
    fn obtain(&self, challenge: &TanChallenge) -> Result<String> {
        println!("{}", challenge.message.yellow());
        Input::<String>::new()
            .with_prompt("Enter TAN")
            .interact_text()
            .map_err(|e| Error::Tan(e.to_string()))
    }
}
