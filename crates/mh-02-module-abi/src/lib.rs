//! # MH-02 Module ABI - Install Parameters & Call Data Encoding
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Owns everything ABI-shaped: parsing the JSON contract ABI carried by
//! publish records, extracting the install/uninstall parameter schemas that
//! drive dynamic configuration forms, and encoding user-supplied values into
//! call data.
//!
//! ## Designated encoder functions
//!
//! Modular contracts declare their configuration schema through two
//! conventionally-named functions in their ABI:
//!
//! | Function | Declares |
//! |----------|----------|
//! | `encodeBytesOnInstall` | parameters required at install time |
//! | `encodeBytesOnUninstall` | parameters required at uninstall time |
//!
//! A module without the function (or with an empty input list) takes no
//! parameters; its install data is the empty byte string.
//!
//! ## Encoding
//!
//! `encode_values` implements the contract ABI encoding: static values
//! inline in the head, dynamic values (bytes, string, dynamic arrays,
//! dynamic tuples) behind byte offsets with their payload appended to the
//! tail. `function_selector` hashes the canonical signature with
//! Keccak-256 and keeps the first four bytes.

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod encode;
pub mod errors;
pub mod extract;
pub mod model;
pub mod types;
pub mod value;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use encode::{encode_function_call, encode_values, function_selector};
pub use errors::AbiError;
pub use extract::{install_params, uninstall_params, INSTALL_ENCODER, UNINSTALL_ENCODER};
pub use model::{AbiEntry, AbiEntryKind, AbiParam, ContractAbi};
pub use types::AbiType;
pub use value::AbiValue;

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 2;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Module ABI";

// =============================================================================
// TESTS
// =============================================================================
