//! TAN provider port
//!
//! The interactive second-factor step is injected so the blocking operator
//! prompt can be swapped for a fixed provider in tests and demo runs.

use super::gateway::TanChallenge;
use crate::domain::result::Result;

/// Supplies a TAN for a pending challenge.
///
/// Implementations may block indefinitely (the CLI prompt does); the fetch
/// stalls until a value is returned.
pub trait TanProvider {
    fn obtain(&self, challenge: &TanChallenge) -> Result<String>;
}

/// Always answers with the same TAN. For tests and demo runs.
pub struct FixedTanProvider(pub String);

impl TanProvider for FixedTanProvider {
    fn obtain(&self, _challenge: &TanChallenge) -> Result<String> {
        Ok(self.0.clone())
    }
}
