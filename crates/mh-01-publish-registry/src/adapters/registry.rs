//! # In-Memory Registry
//!
//! Catalog adapter backed by a `HashMap`. `latest` is derived from the
//! semver-greatest stored version, so the latest/versions consistency
//! property holds by construction.

use crate::domain::entities::{ModuleName, PublishedModule};
use crate::domain::services::semver_max;
use crate::errors::RegistryError;
use crate::ports::outbound::PublishRegistry;
use async_trait::async_trait;
use shared_types::Address;
use std::collections::HashMap;
use std::sync::RwLock;

type CatalogKey = (Address, String);

/// In-memory publish registry for testing.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    /// Published records per (publisher, module name), in publish order.
    catalog: RwLock<HashMap<CatalogKey, Vec<PublishedModule>>>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a published module version.
    pub fn publish(&self, record: PublishedModule) {
        let key = (record.publisher, record.name.as_str().to_string());
        if let Ok(mut catalog) = self.catalog.write() {
            catalog.entry(key).or_default().push(record);
        }
    }

    /// Number of distinct (publisher, module) catalog entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.catalog.read().map(|c| c.len()).unwrap_or(0)
    }

    /// Returns true if nothing has been published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PublishRegistry for InMemoryRegistry {
    async fn latest(
        &self,
        publisher: Address,
        module: &ModuleName,
    ) -> Result<Option<PublishedModule>, RegistryError> {
        let catalog = self
            .catalog
            .read()
            .map_err(|_| RegistryError::Unavailable("catalog poisoned".to_string()))?;

        let versions = catalog.get(&(publisher, module.as_str().to_string()));
        Ok(versions.and_then(|v| semver_max(v)).cloned())
    }

    async fn versions(
        &self,
        publisher: Address,
        module: &ModuleName,
    ) -> Result<Vec<PublishedModule>, RegistryError> {
        let catalog = self
            .catalog
            .read()
            .map_err(|_| RegistryError::Unavailable("catalog poisoned".to_string()))?;

        Ok(catalog
            .get(&(publisher, module.as_str().to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

// =============================================================================
// TESTS
// =============================================================================
