//! # Entities
//!
//! Request, transaction, and receipt value objects for the install
//! workflow.

use mh_01_publish_registry::prelude::{ModuleName, VersionSelector};
use serde::{Deserialize, Serialize};
use shared_types::{keccak256, Address, Bytes, ChainId, Hash};

// =============================================================================
// REQUESTS
// =============================================================================

/// A request to plan (and possibly execute) a module installation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstallRequest {
    /// Chain the core contract lives on.
    pub chain: ChainId,
    /// Core contract receiving the module.
    pub core: Address,
    /// Raw publisher input: canonical address or registered name.
    pub publisher: String,
    /// Module name in the publish registry.
    pub module: ModuleName,
    /// Requested version.
    pub version: VersionSelector,
}

/// A request to uninstall a module from a core contract.
///
/// The publisher/version pair locates the published record whose ABI
/// declares the uninstall parameters; the target proxy address comes from
/// the installed set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UninstallRequest {
    /// Chain the core contract lives on.
    pub chain: ChainId,
    /// Core contract the module is installed on.
    pub core: Address,
    /// Raw publisher input: canonical address or registered name.
    pub publisher: String,
    /// Name of the installed module.
    pub module: ModuleName,
    /// Version the ABI should be read from.
    pub version: VersionSelector,
}

// =============================================================================
// INSTALLED MODULES
// =============================================================================

/// One module currently installed on a core contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstalledModule {
    /// On-chain address of the module proxy.
    pub address: Address,
    /// Module name, as reported by the core contract.
    pub name: ModuleName,
    /// Version, when the core contract tracks one.
    pub version: Option<String>,
    /// Deployed bytecode of the module.
    pub bytecode: Bytes,
}

/// Order-independent fingerprint of an installed set.
///
/// Used as part of compatibility cache keys: two installed sets with the
/// same module bytecodes produce the same fingerprint regardless of
/// enumeration order.
#[must_use]
pub fn installed_fingerprint(installed: &[InstalledModule]) -> Hash {
    let mut digests: Vec<[u8; 32]> = installed
        .iter()
        .map(|module| module.bytecode.digest().0)
        .collect();
    digests.sort_unstable();

    let mut concatenated = Vec::with_capacity(digests.len() * 32);
    for digest in digests {
        concatenated.extend_from_slice(&digest);
    }
    keccak256(&concatenated)
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

/// A transaction built by the gateway, ready for submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreparedTransaction {
    /// Chain to submit on.
    pub chain: ChainId,
    /// Target contract (the core).
    pub to: Address,
    /// Encoded call data.
    pub data: Bytes,
    /// Short human-readable description for logs and notifications.
    pub description: String,
}

/// On-chain receipt of a submitted transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Transaction hash.
    pub tx_hash: Hash,
    /// Block the transaction was included in.
    pub block_number: u64,
    /// Whether execution succeeded on-chain.
    pub success: bool,
}

// =============================================================================
// TESTS
// =============================================================================
