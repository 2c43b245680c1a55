//! # Error Types
//!
//! Parsing errors for the shared value objects.

use thiserror::Error;

/// Errors from parsing hex-encoded value objects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input is missing the `0x` prefix.
    #[error("missing 0x prefix")]
    MissingPrefix,

    /// Input has the wrong number of hex digits.
    #[error("invalid length: expected {expected} hex digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Input contains a non-hexadecimal character.
    #[error("invalid hex digit at position {0}")]
    InvalidDigit(usize),

    /// Mixed-case address failed EIP-55 checksum validation.
    #[error("checksum mismatch: {0} is not a valid EIP-55 address")]
    ChecksumMismatch(String),
}
