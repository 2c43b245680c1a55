//! # Error Types
//!
//! All error types for ABI parsing and encoding.

use thiserror::Error;

/// Errors from ABI handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AbiError {
    /// The published record carries no ABI document.
    #[error("published module carries no ABI")]
    MissingAbi,

    /// The ABI document is not valid JSON or not an ABI array.
    #[error("malformed ABI: {0}")]
    Malformed(String),

    /// A type descriptor is not a supported ABI type.
    #[error("unsupported ABI type: {0:?}")]
    UnsupportedType(String),

    /// The number of values does not match the number of parameters.
    #[error("arity mismatch: {expected} parameters, {actual} values")]
    ArityMismatch { expected: usize, actual: usize },

    /// A value does not match its declared parameter type.
    #[error("type mismatch for parameter {param:?}: expected {expected}, got {actual}")]
    TypeMismatch {
        param: String,
        expected: String,
        actual: String,
    },

    /// A value is structurally right but out of range for its type.
    #[error("value out of range for parameter {param:?}: {detail}")]
    ValueOutOfRange { param: String, detail: String },

    /// A raw form value could not be coerced into an ABI value.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl AbiError {
    /// Attach a parameter name to an error raised below the parameter level.
    ///
    /// Errors bubbling out of nested encodes carry an empty `param`; the
    /// top-level encoder names the parameter the caller actually supplied.
    #[must_use]
    pub fn named(self, name: &str) -> Self {
        match self {
            Self::TypeMismatch {
                param,
                expected,
                actual,
            } if param.is_empty() => Self::TypeMismatch {
                param: name.to_string(),
                expected,
                actual,
            },
            Self::ValueOutOfRange { param, detail } if param.is_empty() => Self::ValueOutOfRange {
                param: name.to_string(),
                detail,
            },
            other => other,
        }
    }
}
