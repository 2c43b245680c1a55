//! # Compatibility Checker
//!
//! Fetches the candidate bytecode, assembles the oracle inputs
//! (candidate first, then every installed module), and classifies the
//! verdict. Holds no cache of its own: re-runs are driven by the caller
//! whenever any input changes.

use crate::domain::CompatibilityReport;
use crate::errors::CompatibilityError;
use crate::ports::outbound::{BytecodeStore, CompatibilityOracle};
use shared_types::{Bytes, ChainId};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// The compatibility checking service.
pub struct CompatibilityChecker<B: BytecodeStore, O: CompatibilityOracle> {
    /// Off-chain content port.
    store: Arc<B>,
    /// Compatibility oracle port.
    oracle: Arc<O>,
}

impl<B: BytecodeStore, O: CompatibilityOracle> CompatibilityChecker<B, O> {
    /// Create a new compatibility checker.
    pub fn new(store: Arc<B>, oracle: Arc<O>) -> Self {
        Self { store, oracle }
    }

    /// Check whether a candidate module can join the installed set.
    ///
    /// The candidate bytecode is fetched by URI; storage failures propagate
    /// as errors. The oracle verdict maps to `Compatible`/`Incompatible`;
    /// an oracle failure maps to `Unknown` — the candidate may not be
    /// compatible, and installation stays blocked until a definite
    /// `Compatible` arrives.
    #[instrument(skip(self, core_bytecode, installed), fields(installed = installed.len()))]
    pub async fn check_candidate(
        &self,
        chain: ChainId,
        core_bytecode: &Bytes,
        installed: &[Bytes],
        candidate_uri: &str,
    ) -> Result<CompatibilityReport, CompatibilityError> {
        let candidate = self.store.fetch(candidate_uri).await?;
        if candidate.is_empty() {
            return Err(CompatibilityError::InvalidBytecode {
                uri: candidate_uri.to_string(),
                reason: "document is empty".to_string(),
            });
        }

        // Candidate first, then the existing set.
        let mut modules = Vec::with_capacity(1 + installed.len());
        modules.push(candidate);
        modules.extend_from_slice(installed);

        let report = match self.oracle.check(chain, core_bytecode, &modules).await {
            Ok(true) => CompatibilityReport::Compatible,
            Ok(false) => CompatibilityReport::Incompatible,
            Err(reason) => {
                warn!(%reason, "Compatibility oracle failed; treating as unknown");
                CompatibilityReport::Unknown { reason }
            }
        };

        debug!(verdict = report.label(), "Compatibility check completed");
        Ok(report)
    }
}

// =============================================================================
// TESTS
// =============================================================================
