//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the registry subsystem depends on. External adapters implement
//! these traits to provide:
//! - Name resolution (publisher names to addresses)
//! - The publish registry catalog
//!
//! Dependencies point INWARD: adapters implement these traits, the service
//! never knows which backend is behind them. Production adapters call a
//! chain SDK; the in-crate adapters are in-memory reference implementations.

use crate::domain::entities::{ModuleName, PublishedModule};
use crate::errors::RegistryError;
use async_trait::async_trait;
use shared_types::Address;

// =============================================================================
// NAME RESOLVER
// =============================================================================

/// Interface to the name-resolution service.
///
/// Called only for inputs that are not already canonical addresses; the
/// service layer short-circuits address-form input before reaching this
/// port.
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Resolve a registered publisher name to its account address.
    ///
    /// # Arguments
    ///
    /// * `name` - Registered name, e.g. `deployer.eth`
    ///
    /// # Returns
    ///
    /// * `Address` - The canonical account address
    /// * `RegistryError::Resolution` - If the name is unknown or the
    ///   resolver backend failed
    async fn resolve(&self, name: &str) -> Result<Address, RegistryError>;
}

// =============================================================================
// PUBLISH REGISTRY
// =============================================================================

/// Interface to the publish registry catalog.
///
/// ## Implementation Notes
///
/// `latest` and `versions` are separate lookups because the backing
/// registry exposes them separately; the service never derives one from
/// the other. An adapter backed by a registry without a native
/// latest-lookup should derive it from the semver-greatest entry of the
/// full list (see `domain::services::semver_max`).
#[async_trait]
pub trait PublishRegistry: Send + Sync {
    /// Fetch the most recently published version of a module.
    ///
    /// # Returns
    ///
    /// * `Some(PublishedModule)` - The latest published record
    /// * `None` - The publisher never published a module under this name
    async fn latest(
        &self,
        publisher: Address,
        module: &ModuleName,
    ) -> Result<Option<PublishedModule>, RegistryError>;

    /// Fetch every published version of a module, oldest first.
    ///
    /// An unknown module yields an empty list, not an error.
    async fn versions(
        &self,
        publisher: Address,
        module: &ModuleName,
    ) -> Result<Vec<PublishedModule>, RegistryError>;
}

// =============================================================================
// TESTS
// =============================================================================
