//! # Error Types
//!
//! All error types for install planning and transaction submission.

use crate::domain::plan::PlanStep;
use mh_01_publish_registry::errors::RegistryError;
use mh_02_module_abi::AbiError;
use mh_03_compatibility::errors::CompatibilityError;
use shared_types::{Address, Hash};
use thiserror::Error;

/// Errors from the transaction gateway.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The chain backend could not be reached.
    #[error("gateway unavailable: {0}")]
    Unavailable(String),

    /// The transaction could not be built.
    #[error("could not prepare transaction: {0}")]
    Prepare(String),

    /// Submission was rejected before inclusion.
    #[error("transaction submission failed: {0}")]
    Submission(String),

    /// The receipt lookup failed.
    #[error("receipt lookup failed: {0}")]
    Receipt(String),

    /// The transaction was included but reverted on-chain.
    #[error("transaction {tx_hash} reverted")]
    Reverted { tx_hash: Hash },

    /// No receipt arrived within the configured window.
    #[error("no receipt after {waited_ms}ms")]
    Timeout { waited_ms: u64 },
}

/// Errors from the install planner.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// A registry lookup failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// ABI handling failed (schema or value encoding).
    #[error(transparent)]
    Abi(#[from] AbiError),

    /// The compatibility check could not complete.
    #[error(transparent)]
    Compatibility(#[from] CompatibilityError),

    /// A plan gate is unsatisfied; the action is blocked.
    #[error("blocked at {step}: {reason}")]
    Blocked { step: PlanStep, reason: String },

    /// The transaction layer failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Uninstall target is not in the installed set.
    #[error("module {module:?} is not installed on {core:?}")]
    ModuleNotInstalled { module: String, core: Address },
}
