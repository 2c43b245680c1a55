//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the compatibility subsystem depends on. External adapters
//! implement these traits to provide:
//! - Off-chain bytecode retrieval
//! - The bytecode compatibility verdict
//!
//! Dependencies point INWARD: adapters implement these traits, the checker
//! never knows which backend is behind them.

use crate::errors::CompatibilityError;
use async_trait::async_trait;
use shared_types::{Bytes, ChainId};

// =============================================================================
// BYTECODE STORE
// =============================================================================

/// Interface for fetching compiled bytecode from off-chain storage.
///
/// URIs come from publish records (`bytecode_uri`), typically content
/// addressed (`ipfs://...`).
#[async_trait]
pub trait BytecodeStore: Send + Sync {
    /// Fetch the bytecode document at `uri`.
    ///
    /// # Returns
    ///
    /// * `Bytes` - The compiled bytecode
    /// * `CompatibilityError::Storage` - If the document is unreachable
    async fn fetch(&self, uri: &str) -> Result<Bytes, CompatibilityError>;
}

// =============================================================================
// COMPATIBILITY ORACLE
// =============================================================================

/// Interface to the compatibility verdict.
///
/// The oracle receives the core bytecode and the candidate-first list of
/// module bytecodes, and answers whether that combination is installable.
/// What "compatible" means at the bytecode level is entirely the oracle's
/// business; this subsystem only assembles the inputs and classifies the
/// outcome.
///
/// Errors from this port are soft: the service classifies them as
/// `CompatibilityReport::Unknown` rather than propagating them.
#[async_trait]
pub trait CompatibilityOracle: Send + Sync {
    /// Evaluate a candidate module set against a core contract.
    ///
    /// # Arguments
    ///
    /// * `chain` - Chain the core contract lives on
    /// * `core` - The core contract's deployed bytecode
    /// * `modules` - Candidate bytecode first, then every installed module
    ///
    /// # Returns
    ///
    /// * `true` - The combination is installable
    /// * `false` - The candidate conflicts with the existing set
    async fn check(&self, chain: ChainId, core: &Bytes, modules: &[Bytes])
        -> Result<bool, String>;
}

// =============================================================================
// TESTS
// =============================================================================
