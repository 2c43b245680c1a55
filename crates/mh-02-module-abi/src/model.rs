//! # ABI Document Model
//!
//! Serde model of the JSON contract ABI. Unknown fields are tolerated;
//! entries the encoder does not care about (events, errors, constructors)
//! are kept but skipped by the function accessors.

use crate::errors::AbiError;
use serde::{Deserialize, Serialize};

// =============================================================================
// PARAMETERS
// =============================================================================

/// One declared parameter of an ABI function.
///
/// `components` is present only for tuple-typed parameters and describes
/// the tuple's fields, recursively.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParam {
    /// Parameter name; may be empty in the ABI.
    #[serde(default)]
    pub name: String,

    /// ABI type descriptor, e.g. `uint256`, `address[]`, `tuple`.
    #[serde(rename = "type")]
    pub ty: String,

    /// Tuple field declarations, for `tuple`-based types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<AbiParam>>,
}

impl AbiParam {
    /// Creates a parameter with no components.
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            components: None,
        }
    }

    /// Creates a tuple-typed parameter.
    pub fn tuple(name: impl Into<String>, ty: impl Into<String>, components: Vec<AbiParam>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            components: Some(components),
        }
    }
}

// =============================================================================
// ENTRIES
// =============================================================================

/// Kind of an ABI entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbiEntryKind {
    /// A callable function.
    Function,
    /// The deployment constructor.
    Constructor,
    /// An emitted event.
    Event,
    /// A custom error.
    Error,
    /// The fallback function.
    Fallback,
    /// The receive function.
    Receive,
    /// Anything this model does not recognize.
    #[serde(other)]
    Other,
}

/// One entry of a contract ABI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbiEntry {
    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: AbiEntryKind,

    /// Entry name; empty for constructors/fallbacks.
    #[serde(default)]
    pub name: String,

    /// Declared input parameters.
    #[serde(default)]
    pub inputs: Vec<AbiParam>,

    /// Declared outputs (functions only).
    #[serde(default)]
    pub outputs: Vec<AbiParam>,

    /// State mutability, when the ABI declares one.
    #[serde(
        default,
        rename = "stateMutability",
        skip_serializing_if = "Option::is_none"
    )]
    pub state_mutability: Option<String>,
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// A parsed contract ABI document.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct ContractAbi(pub Vec<AbiEntry>);

impl ContractAbi {
    /// Parses an ABI from a raw JSON value (as carried by publish records).
    pub fn from_value(value: &serde_json::Value) -> Result<Self, AbiError> {
        serde_json::from_value(value.clone()).map_err(|e| AbiError::Malformed(e.to_string()))
    }

    /// Parses an ABI from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        serde_json::from_str(json).map_err(|e| AbiError::Malformed(e.to_string()))
    }

    /// Iterates over function-type entries only.
    pub fn functions(&self) -> impl Iterator<Item = &AbiEntry> {
        self.0
            .iter()
            .filter(|entry| entry.kind == AbiEntryKind::Function)
    }

    /// Finds a function entry by name.
    #[must_use]
    pub fn find_function(&self, name: &str) -> Option<&AbiEntry> {
        self.functions().find(|entry| entry.name == name)
    }

    /// Number of entries in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the document has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
