//! # Error Types
//!
//! All error types for compatibility checking.

use thiserror::Error;

/// Errors from compatibility operations.
///
/// Oracle failures are deliberately NOT in this enum: an unreachable or
/// failing oracle is classified as `CompatibilityReport::Unknown`, which
/// still blocks installation but is surfaced as a soft warning rather than
/// an infrastructure error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompatibilityError {
    /// The candidate bytecode could not be fetched from off-chain storage.
    #[error("could not fetch bytecode {uri:?}: {reason}")]
    Storage { uri: String, reason: String },

    /// The fetched document is not bytecode (empty or undecodable).
    #[error("bytecode at {uri:?} is invalid: {reason}")]
    InvalidBytecode { uri: String, reason: String },
}
