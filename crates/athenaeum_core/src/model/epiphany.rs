//! Community ledger entry.

use serde::{Deserialize, Serialize};

/// Display name used when a seeker submits without naming themselves.
pub const ANONYMOUS_SEEKER: &str = "Anonymous Seeker";

pub type EpiphanyId = String;

/// Free-text submission recorded in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epiphany {
    pub id: EpiphanyId,
    pub seeker: String,
    pub content: String,
    /// Unix epoch milliseconds, assigned at insertion.
    pub timestamp: i64,
    /// Approval counter. Only ever incremented.
    pub resonance: u64,
}

/// Returns the stored seeker name: blank input becomes [`ANONYMOUS_SEEKER`],
/// anything else is kept as given.
pub fn seeker_or_anonymous(seeker: &str) -> String {
    if seeker.trim().is_empty() {
        ANONYMOUS_SEEKER.to_string()
    } else {
        seeker.to_string()
    }
}
