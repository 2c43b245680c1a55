//! # Static Name Resolver
//!
//! In-memory name-resolution table. Counts its calls so tests can assert
//! that address-form input never reaches the resolver.

use crate::errors::RegistryError;
use crate::ports::outbound::NameResolver;
use async_trait::async_trait;
use shared_types::Address;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// In-memory resolver backed by a fixed name table.
#[derive(Debug, Default)]
pub struct StaticNameResolver {
    /// Registered names.
    entries: RwLock<HashMap<String, Address>>,
    /// Number of resolve calls received.
    calls: AtomicU64,
}

impl StaticNameResolver {
    /// Create an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name.
    pub fn register(&self, name: impl Into<String>, address: Address) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(name.into(), address);
        }
    }

    /// Number of resolve calls this resolver has received.
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl NameResolver for StaticNameResolver {
    async fn resolve(&self, name: &str) -> Result<Address, RegistryError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let entries = self
            .entries
            .read()
            .map_err(|_| RegistryError::Unavailable("resolver table poisoned".to_string()))?;

        entries
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::Resolution {
                name: name.to_string(),
                reason: "unknown name".to_string(),
            })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_registered_name() {
        let resolver = StaticNameResolver::new();
        resolver.register("deployer.eth", Address::new([0xdd; 20]));

        let address = resolver.resolve("deployer.eth").await.unwrap();
        assert_eq!(address, Address::new([0xdd; 20]));
        assert_eq!(resolver.calls(), 1);
    }

    #[tokio::test]
    async fn test_resolve_unknown_name() {
        let resolver = StaticNameResolver::new();

        let err = resolver.resolve("nobody.eth").await.unwrap_err();
        assert!(matches!(err, RegistryError::Resolution { .. }));
        assert_eq!(resolver.calls(), 1);
    }
}
