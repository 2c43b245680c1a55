//! # Entities
//!
//! Registry-facing domain types: module names, version selectors, publisher
//! identifiers, and published module records.

use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::fmt;

// =============================================================================
// MODULE NAME
// =============================================================================

/// The name a module contract was published under.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ModuleName(String);

impl ModuleName {
    /// Creates a module name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

// =============================================================================
// VERSION SELECTOR
// =============================================================================

/// Which published version a caller is asking for.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum VersionSelector {
    /// The most recently published version.
    Latest,
    /// An exact version string; matched verbatim against the catalog.
    Exact(String),
}

impl VersionSelector {
    /// Parses a user-entered version token.
    ///
    /// `"latest"` (any case) selects the latest version; anything else is an
    /// exact version string, matched verbatim.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let trimmed = token.trim();
        if trimmed.eq_ignore_ascii_case("latest") {
            Self::Latest
        } else {
            Self::Exact(trimmed.to_string())
        }
    }
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str("latest"),
            Self::Exact(v) => f.write_str(v),
        }
    }
}

// =============================================================================
// PUBLISHER IDENTIFIER
// =============================================================================

/// A parsed publisher identifier: either a canonical address or a
/// registered name that still needs resolution.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PublisherId {
    /// The input was already a canonical address.
    Address(Address),
    /// The input is a name to be resolved by the name-resolution service.
    Name(String),
}

impl PublisherId {
    /// Classifies a raw publisher input.
    ///
    /// Anything that parses as a canonical address (including EIP-55
    /// checksum validation for mixed-case input) is `Address`; everything
    /// else is a `Name`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match Address::from_hex(trimmed) {
            Ok(address) => Self::Address(address),
            Err(_) => Self::Name(trimmed.to_string()),
        }
    }
}

// =============================================================================
// PUBLISHED MODULE RECORD
// =============================================================================

/// A single published module version as recorded in the registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PublishedModule {
    /// Name the module was published under.
    pub name: ModuleName,
    /// Version string of this record (semantic version).
    pub version: String,
    /// Publisher account the module was published from.
    pub publisher: Address,
    /// Off-chain URI of the publish metadata document.
    pub metadata_uri: String,
    /// Off-chain URI of the compiled module bytecode.
    pub bytecode_uri: String,
    /// Raw ABI document of the module, if the registry carries one.
    ///
    /// Kept as raw JSON here; the module-ABI subsystem owns parsing.
    pub abi: Option<serde_json::Value>,
}

impl PublishedModule {
    /// Returns a short `name@version` label for logs.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

// =============================================================================
// TESTS
// =============================================================================
