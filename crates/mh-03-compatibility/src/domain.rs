//! # Domain
//!
//! Compatibility verdicts and their installation semantics.

use serde::{Deserialize, Serialize};

/// Outcome of a compatibility check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompatibilityReport {
    /// The oracle confirmed the candidate can be installed.
    Compatible,
    /// The oracle determined the candidate conflicts with the core or an
    /// installed module.
    Incompatible,
    /// The check itself failed; the candidate may or may not be
    /// compatible. Surfaced as a soft warning, but installation stays
    /// blocked.
    Unknown {
        /// Why the check could not complete.
        reason: String,
    },
}

impl CompatibilityReport {
    /// True only for a definite `Compatible` verdict.
    ///
    /// Everything else blocks the install action: fail closed.
    #[must_use]
    pub fn is_installable(&self) -> bool {
        matches!(self, Self::Compatible)
    }

    /// Short label for logs and events.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Compatible => "compatible",
            Self::Incompatible => "incompatible",
            Self::Unknown { .. } => "unknown",
        }
    }
}
