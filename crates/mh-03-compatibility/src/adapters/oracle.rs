//! # Static Oracle
//!
//! Rule-based oracle adapter: a deny-list of bytecode fingerprints that
//! conflict with any set they appear in. Counts its calls so tests can
//! assert when a verdict was recomputed rather than served from a cache.

use crate::ports::outbound::CompatibilityOracle;
use async_trait::async_trait;
use shared_types::{Bytes, ChainId, Hash};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use tracing::debug;

/// In-memory oracle for testing.
#[derive(Debug, Default)]
pub struct StaticOracle {
    /// Fingerprints of module bytecodes that conflict with everything.
    denied: RwLock<HashSet<Hash>>,
    /// When set, every check fails with this reason.
    failure: RwLock<Option<String>>,
    /// Number of checks received.
    calls: AtomicU64,
}

impl StaticOracle {
    /// Create an oracle that reports every combination compatible.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a module bytecode as conflicting with any set it appears in.
    pub fn deny(&self, bytecode: &Bytes) {
        if let Ok(mut denied) = self.denied.write() {
            denied.insert(bytecode.digest());
        }
    }

    /// Make every subsequent check fail (simulates an unreachable oracle).
    pub fn set_failure(&self, reason: Option<String>) {
        if let Ok(mut failure) = self.failure.write() {
            *failure = reason;
        }
    }

    /// Number of checks this oracle has received.
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CompatibilityOracle for StaticOracle {
    async fn check(
        &self,
        chain: ChainId,
        _core: &Bytes,
        modules: &[Bytes],
    ) -> Result<bool, String> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        if let Ok(failure) = self.failure.read() {
            if let Some(reason) = failure.as_ref() {
                return Err(reason.clone());
            }
        }

        let denied = self
            .denied
            .read()
            .map_err(|_| "oracle state poisoned".to_string())?;
        let compatible = !modules.iter().any(|module| denied.contains(&module.digest()));

        debug!(%chain, modules = modules.len(), compatible, "Oracle verdict");
        Ok(compatible)
    }
}

// =============================================================================
// TESTS
// =============================================================================
