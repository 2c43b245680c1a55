//! # MH-01 Publish Registry - Publisher Resolution & Version Catalog
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Resolves a human-entered publisher identifier (account address or
//! registered name) to a canonical address, and looks up published module
//! contracts by name and version in the publish registry.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Address-form input never reaches the name resolver | `service.rs` - `resolve_publisher()` |
//! | INVARIANT-2 | An exact version lookup matches the version string exactly (no range semantics) | `domain/services.rs` - `pick_exact_version()` |
//! | INVARIANT-3 | A failed lookup names the module and requested version | `errors.rs` - `RegistryError::NotFound` |
//!
//! ## Outbound Dependencies
//!
//! | Collaborator | Trait | Purpose |
//! |--------------|-------|---------|
//! | Name resolution service | `NameResolver` | Resolve registered names to addresses |
//! | Publish registry | `PublishRegistry` | Fetch latest / all published versions |
//!
//! ## Usage Example
//!
//! ```ignore
//! use mh_01_publish_registry::prelude::*;
//!
//! let publisher = service.resolve_publisher("0xdd99...b024").await?;
//! let module = service
//!     .lookup_version(publisher, &name, &VersionSelector::Latest)
//!     .await?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{ModuleName, PublishedModule, PublisherId, VersionSelector};

    // Domain services
    pub use crate::domain::services::pick_exact_version;

    // Ports
    pub use crate::ports::outbound::{NameResolver, PublishRegistry};

    // Errors
    pub use crate::errors::RegistryError;

    // Adapters
    pub use crate::adapters::{InMemoryRegistry, StaticNameResolver};

    // Service
    pub use crate::service::RegistryService;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 1;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Publish Registry";

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subsystem_id() {
        assert_eq!(SUBSYSTEM_ID, 1);
    }

    #[test]
    fn test_prelude_exports() {
        // Verify prelude exports compile
        use prelude::*;
        let _ = VersionSelector::Latest;
        let _ = ModuleName::new("BatchMetadataERC721");
    }
}
