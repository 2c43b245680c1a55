//! # Error Types
//!
//! All error types for publisher resolution and catalog lookup.

use thiserror::Error;

/// Errors from registry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A publisher name could not be resolved to an address.
    #[error("could not resolve publisher {name:?}: {reason}")]
    Resolution { name: String, reason: String },

    /// The requested module/version pair does not exist in the registry.
    #[error("module {module:?} has no published version {version:?}")]
    NotFound { module: String, version: String },

    /// The registry or resolver backend could not be reached.
    #[error("registry unavailable: {0}")]
    Unavailable(String),
}

impl RegistryError {
    /// Builds the not-found error for a module/version pair.
    #[must_use]
    pub fn not_found(module: &str, version: &str) -> Self {
        Self::NotFound {
            module: module.to_string(),
            version: version.to_string(),
        }
    }
}
