//! # Registry Service
//!
//! Orchestrates publisher resolution and version catalog lookup over the
//! outbound ports. Stateless apart from the port handles; every call is a
//! fresh lookup (request de-duplication belongs to the caller's query
//! layer, not here).

use crate::domain::entities::{ModuleName, PublishedModule, PublisherId, VersionSelector};
use crate::domain::services::pick_exact_version;
use crate::errors::RegistryError;
use crate::ports::outbound::{NameResolver, PublishRegistry};
use shared_types::Address;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// The registry lookup service.
pub struct RegistryService<N: NameResolver, P: PublishRegistry> {
    /// Name-resolution port.
    resolver: Arc<N>,
    /// Publish-registry port.
    registry: Arc<P>,
}

impl<N: NameResolver, P: PublishRegistry> RegistryService<N, P> {
    /// Create a new registry service.
    pub fn new(resolver: Arc<N>, registry: Arc<P>) -> Self {
        Self { resolver, registry }
    }

    /// Resolve a raw publisher input to a canonical address.
    ///
    /// Address-form input is returned unchanged without calling the
    /// name-resolution port; anything else is delegated to the resolver and
    /// its failure propagates to the caller.
    #[instrument(skip(self))]
    pub async fn resolve_publisher(&self, raw: &str) -> Result<Address, RegistryError> {
        match PublisherId::parse(raw) {
            PublisherId::Address(address) => {
                debug!(publisher = %address, "Publisher input already canonical");
                Ok(address)
            }
            PublisherId::Name(name) => {
                let address = self.resolver.resolve(&name).await?;
                info!(name = %name, publisher = %address, "Publisher name resolved");
                Ok(address)
            }
        }
    }

    /// Look up one published version of a module.
    ///
    /// `Latest` asks the registry's latest-lookup directly; an exact
    /// selector fetches the full version list and scans for a verbatim
    /// match. Either way, a miss is a `NotFound` naming the module and the
    /// requested version.
    #[instrument(skip(self), fields(module = %module, selector = %selector))]
    pub async fn lookup_version(
        &self,
        publisher: Address,
        module: &ModuleName,
        selector: &VersionSelector,
    ) -> Result<PublishedModule, RegistryError> {
        let record = match selector {
            VersionSelector::Latest => self
                .registry
                .latest(publisher, module)
                .await?
                .ok_or_else(|| RegistryError::not_found(module.as_str(), "latest"))?,
            VersionSelector::Exact(version) => {
                let versions = self.registry.versions(publisher, module).await?;
                pick_exact_version(&versions, version)
                    .cloned()
                    .ok_or_else(|| RegistryError::not_found(module.as_str(), version))?
            }
        };

        debug!(record = %record.label(), "Version lookup succeeded");
        Ok(record)
    }

    /// Fetch the full version catalog of a module, oldest first.
    pub async fn list_versions(
        &self,
        publisher: Address,
        module: &ModuleName,
    ) -> Result<Vec<PublishedModule>, RegistryError> {
        self.registry.versions(publisher, module).await
    }

    /// Resolve a raw publisher and look up one version in a single call.
    pub async fn resolve_module(
        &self,
        raw_publisher: &str,
        module: &ModuleName,
        selector: &VersionSelector,
    ) -> Result<PublishedModule, RegistryError> {
        let publisher = self.resolve_publisher(raw_publisher).await?;
        self.lookup_version(publisher, module, selector).await
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryRegistry, StaticNameResolver};

    const PUBLISHER_HEX: &str = "0xdd9900000000000000000000000000000000b024";

    fn publisher() -> Address {
        Address::from_hex(PUBLISHER_HEX).unwrap()
    }

    fn record(name: &str, version: &str) -> PublishedModule {
        PublishedModule {
            name: ModuleName::new(name),
            version: version.to_string(),
            publisher: publisher(),
            metadata_uri: String::new(),
            bytecode_uri: format!("ipfs://code/{version}"),
            abi: None,
        }
    }

    fn service() -> (
        Arc<StaticNameResolver>,
        Arc<InMemoryRegistry>,
        RegistryService<StaticNameResolver, InMemoryRegistry>,
    ) {
        let resolver = Arc::new(StaticNameResolver::new());
        let registry = Arc::new(InMemoryRegistry::new());
        let service = RegistryService::new(resolver.clone(), registry.clone());
        (resolver, registry, service)
    }

    #[tokio::test]
    async fn test_address_input_bypasses_resolver() {
        let (resolver, _registry, service) = service();

        let resolved = service.resolve_publisher(PUBLISHER_HEX).await.unwrap();
        assert_eq!(resolved, publisher());
        // The name-resolution port must not have been touched.
        assert_eq!(resolver.calls(), 0);
    }

    #[tokio::test]
    async fn test_name_input_uses_resolver() {
        let (resolver, _registry, service) = service();
        resolver.register("deployer.eth", publisher());

        let resolved = service.resolve_publisher("deployer.eth").await.unwrap();
        assert_eq!(resolved, publisher());
        assert_eq!(resolver.calls(), 1);
    }

    #[tokio::test]
    async fn test_resolution_failure_propagates() {
        let (_resolver, _registry, service) = service();

        let err = service.resolve_publisher("nobody.eth").await.unwrap_err();
        assert!(matches!(err, RegistryError::Resolution { .. }));
    }

    #[tokio::test]
    async fn test_lookup_latest() {
        let (_resolver, registry, service) = service();
        registry.publish(record("BatchMetadataERC721", "1.0.0"));
        registry.publish(record("BatchMetadataERC721", "1.2.0"));

        let module = ModuleName::new("BatchMetadataERC721");
        let found = service
            .lookup_version(publisher(), &module, &VersionSelector::Latest)
            .await
            .unwrap();
        assert_eq!(found.version, "1.2.0");
    }

    #[tokio::test]
    async fn test_lookup_exact_scans_catalog() {
        let (_resolver, registry, service) = service();
        registry.publish(record("BatchMetadataERC721", "1.0.0"));
        registry.publish(record("BatchMetadataERC721", "1.2.0"));

        let module = ModuleName::new("BatchMetadataERC721");
        let found = service
            .lookup_version(
                publisher(),
                &module,
                &VersionSelector::Exact("1.0.0".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(found.version, "1.0.0");
    }

    #[tokio::test]
    async fn test_lookup_missing_version_names_pair() {
        let (_resolver, registry, service) = service();
        registry.publish(record("BatchMetadataERC721", "1.0.0"));

        let module = ModuleName::new("BatchMetadataERC721");
        let err = service
            .lookup_version(
                publisher(),
                &module,
                &VersionSelector::Exact("9.9.9".to_string()),
            )
            .await
            .unwrap_err();

        assert_eq!(err, RegistryError::not_found("BatchMetadataERC721", "9.9.9"));
    }

    #[tokio::test]
    async fn test_lookup_latest_of_unknown_module() {
        let (_resolver, _registry, service) = service();

        let module = ModuleName::new("Ghost");
        let err = service
            .lookup_version(publisher(), &module, &VersionSelector::Latest)
            .await
            .unwrap_err();
        assert_eq!(err, RegistryError::not_found("Ghost", "latest"));
    }

    #[tokio::test]
    async fn test_resolve_module_end_to_end() {
        let (resolver, registry, service) = service();
        resolver.register("deployer.eth", publisher());
        registry.publish(record("MintableERC20", "2.0.0"));

        let module = ModuleName::new("MintableERC20");
        let found = service
            .resolve_module("deployer.eth", &module, &VersionSelector::Latest)
            .await
            .unwrap();
        assert_eq!(found.version, "2.0.0");
    }
}
