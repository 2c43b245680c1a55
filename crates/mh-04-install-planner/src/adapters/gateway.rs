//! # In-Memory Gateway
//!
//! Single-process devnet stand-in for the transaction layer. Install and
//! uninstall effects are applied when the receipt is observed, mirroring
//! the on-chain ordering (submission alone changes nothing).

use crate::domain::entities::{InstalledModule, PreparedTransaction, Receipt};
use crate::errors::GatewayError;
use crate::ports::outbound::TransactionGateway;
use async_trait::async_trait;
use mh_01_publish_registry::prelude::{ModuleName, PublishedModule};
use shared_types::{keccak256, Address, Bytes, ChainId, Hash};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;
use tracing::debug;

type CoreKey = (ChainId, Address);

/// What a prepared transaction will do once its receipt lands.
#[derive(Clone, Debug)]
enum Effect {
    Install {
        key: CoreKey,
        module: InstalledModule,
    },
    Uninstall {
        key: CoreKey,
        address: Address,
    },
}

/// In-memory transaction gateway for testing.
#[derive(Default)]
pub struct InMemoryGateway {
    /// Deployed core contracts and their bytecode.
    cores: RwLock<HashMap<CoreKey, Bytes>>,
    /// Installed modules per core.
    installed: RwLock<HashMap<CoreKey, Vec<InstalledModule>>>,
    /// Module bytecode by publish URI (what a devnet deploy would pin).
    module_code: RwLock<HashMap<String, Bytes>>,
    /// Effects of prepared transactions, keyed by transaction digest.
    prepared: RwLock<HashMap<Hash, Effect>>,
    /// Effects of submitted transactions, keyed by transaction hash.
    pending: RwLock<HashMap<Hash, Effect>>,
    /// Monotonic nonce for hash derivation and block numbers.
    nonce: AtomicU64,
    /// When set, `send` fails with this reason.
    fail_submission: RwLock<Option<String>>,
    /// When set, the next receipt reports a revert.
    revert_next: AtomicBool,
    /// Number of send calls received.
    sends: AtomicU64,
}

impl InMemoryGateway {
    /// Create an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploy a core contract.
    pub fn set_core(&self, chain: ChainId, core: Address, bytecode: Bytes) {
        if let Ok(mut cores) = self.cores.write() {
            cores.insert((chain, core), bytecode);
        }
    }

    /// Pin the deployed bytecode behind a publish URI, so installs can
    /// record it on the installed module.
    pub fn register_module_code(&self, uri: impl Into<String>, bytecode: Bytes) {
        if let Ok(mut code) = self.module_code.write() {
            code.insert(uri.into(), bytecode);
        }
    }

    /// Pre-install a module directly (devnet state setup).
    pub fn seed_installed(&self, chain: ChainId, core: Address, module: InstalledModule) {
        if let Ok(mut installed) = self.installed.write() {
            installed.entry((chain, core)).or_default().push(module);
        }
    }

    /// Make every subsequent `send` fail.
    pub fn set_fail_submission(&self, reason: Option<String>) {
        if let Ok(mut fail) = self.fail_submission.write() {
            *fail = reason;
        }
    }

    /// Make the next receipt report an on-chain revert.
    pub fn revert_next_receipt(&self) {
        self.revert_next.store(true, Ordering::SeqCst);
    }

    /// Number of send calls this gateway has received.
    #[must_use]
    pub fn sends(&self) -> u64 {
        self.sends.load(Ordering::Relaxed)
    }

    /// Deterministic module proxy address for an install.
    fn module_address(module: &PublishedModule) -> Address {
        let mut preimage = Vec::new();
        preimage.extend_from_slice(module.publisher.as_bytes());
        preimage.extend_from_slice(module.name.as_str().as_bytes());
        preimage.extend_from_slice(module.version.as_bytes());
        let digest = keccak256(&preimage);
        Address::from_slice(&digest.as_bytes()[12..]).unwrap_or(Address::ZERO)
    }

    /// Digest identifying a prepared transaction.
    fn tx_digest(tx: &PreparedTransaction) -> Hash {
        let mut preimage = Vec::new();
        preimage.extend_from_slice(&tx.chain.value().to_be_bytes());
        preimage.extend_from_slice(tx.to.as_bytes());
        preimage.extend_from_slice(tx.data.as_slice());
        preimage.extend_from_slice(tx.description.as_bytes());
        keccak256(&preimage)
    }

    fn remember(&self, tx: &PreparedTransaction, effect: Effect) {
        if let Ok(mut prepared) = self.prepared.write() {
            prepared.insert(Self::tx_digest(tx), effect);
        }
    }
}

#[async_trait]
impl TransactionGateway for InMemoryGateway {
    async fn core_bytecode(&self, chain: ChainId, core: Address) -> Result<Bytes, GatewayError> {
        let cores = self
            .cores
            .read()
            .map_err(|_| GatewayError::Unavailable("gateway state poisoned".to_string()))?;
        cores
            .get(&(chain, core))
            .cloned()
            .ok_or_else(|| GatewayError::Unavailable(format!("no core contract at {core:?}")))
    }

    async fn installed_modules(
        &self,
        chain: ChainId,
        core: Address,
    ) -> Result<Vec<InstalledModule>, GatewayError> {
        {
            let cores = self
                .cores
                .read()
                .map_err(|_| GatewayError::Unavailable("gateway state poisoned".to_string()))?;
            if !cores.contains_key(&(chain, core)) {
                return Err(GatewayError::Unavailable(format!(
                    "no core contract at {core:?}"
                )));
            }
        }

        let installed = self
            .installed
            .read()
            .map_err(|_| GatewayError::Unavailable("gateway state poisoned".to_string()))?;
        Ok(installed.get(&(chain, core)).cloned().unwrap_or_default())
    }

    async fn prepare_install(
        &self,
        chain: ChainId,
        core: Address,
        module: &PublishedModule,
        data: &Bytes,
    ) -> Result<PreparedTransaction, GatewayError> {
        let bytecode = self
            .module_code
            .read()
            .ok()
            .and_then(|code| code.get(&module.bytecode_uri).cloned())
            .unwrap_or_default();

        let tx = PreparedTransaction {
            chain,
            to: core,
            data: data.clone(),
            description: format!("install {} on {core:?}", module.label()),
        };

        self.remember(
            &tx,
            Effect::Install {
                key: (chain, core),
                module: InstalledModule {
                    address: Self::module_address(module),
                    name: ModuleName::new(module.name.as_str()),
                    version: Some(module.version.clone()),
                    bytecode,
                },
            },
        );
        Ok(tx)
    }

    async fn prepare_uninstall(
        &self,
        chain: ChainId,
        core: Address,
        module: &InstalledModule,
        data: &Bytes,
    ) -> Result<PreparedTransaction, GatewayError> {
        let tx = PreparedTransaction {
            chain,
            to: core,
            data: data.clone(),
            description: format!("uninstall {} from {core:?}", module.name),
        };

        self.remember(
            &tx,
            Effect::Uninstall {
                key: (chain, core),
                address: module.address,
            },
        );
        Ok(tx)
    }

    async fn send(&self, tx: &PreparedTransaction, from: Address) -> Result<Hash, GatewayError> {
        self.sends.fetch_add(1, Ordering::Relaxed);

        if let Ok(fail) = self.fail_submission.read() {
            if let Some(reason) = fail.as_ref() {
                return Err(GatewayError::Submission(reason.clone()));
            }
        }

        let effect = {
            let prepared = self
                .prepared
                .read()
                .map_err(|_| GatewayError::Unavailable("gateway state poisoned".to_string()))?;
            prepared.get(&Self::tx_digest(tx)).cloned().ok_or_else(|| {
                GatewayError::Submission("transaction was not prepared here".to_string())
            })?
        };

        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
        let mut preimage = Self::tx_digest(tx).as_bytes().to_vec();
        preimage.extend_from_slice(from.as_bytes());
        preimage.extend_from_slice(&nonce.to_be_bytes());
        let tx_hash = keccak256(&preimage);

        if let Ok(mut pending) = self.pending.write() {
            pending.insert(tx_hash, effect);
        }

        debug!(%tx_hash, description = %tx.description, "Transaction submitted");
        Ok(tx_hash)
    }

    async fn wait_for_receipt(
        &self,
        _chain: ChainId,
        tx_hash: Hash,
    ) -> Result<Receipt, GatewayError> {
        let effect = {
            let mut pending = self
                .pending
                .write()
                .map_err(|_| GatewayError::Unavailable("gateway state poisoned".to_string()))?;
            pending
                .remove(&tx_hash)
                .ok_or_else(|| GatewayError::Receipt(format!("unknown transaction {tx_hash}")))?
        };

        let block_number = self.nonce.load(Ordering::SeqCst);

        if self.revert_next.swap(false, Ordering::SeqCst) {
            return Ok(Receipt {
                tx_hash,
                block_number,
                success: false,
            });
        }

        match effect {
            Effect::Install { key, module } => {
                if let Ok(mut installed) = self.installed.write() {
                    installed.entry(key).or_default().push(module);
                }
            }
            Effect::Uninstall { key, address } => {
                if let Ok(mut installed) = self.installed.write() {
                    if let Some(modules) = installed.get_mut(&key) {
                        modules.retain(|module| module.address != address);
                    }
                }
            }
        }

        Ok(Receipt {
            tx_hash,
            block_number,
            success: true,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mh_01_publish_registry::prelude::ModuleName;

    const CHAIN: ChainId = ChainId::new(31337);

    fn core() -> Address {
        Address::new([0xc0; 20])
    }

    fn published(name: &str, version: &str) -> PublishedModule {
        PublishedModule {
            name: ModuleName::new(name),
            version: version.to_string(),
            publisher: Address::new([0xdd; 20]),
            metadata_uri: String::new(),
            bytecode_uri: format!("ipfs://code/{name}"),
            abi: None,
        }
    }

    fn deployed_gateway() -> InMemoryGateway {
        let gateway = InMemoryGateway::new();
        gateway.set_core(CHAIN, core(), Bytes::from(vec![0xc0, 0xde]));
        gateway
    }

    #[tokio::test]
    async fn test_core_bytecode_roundtrip() {
        let gateway = deployed_gateway();
        let bytecode = gateway.core_bytecode(CHAIN, core()).await.unwrap();
        assert_eq!(bytecode.as_slice(), &[0xc0, 0xde]);

        let err = gateway
            .core_bytecode(CHAIN, Address::new([0x01; 20]))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_install_applies_on_receipt_not_send() {
        let gateway = deployed_gateway();
        let module = published("BatchMetadataERC721", "1.0.0");
        gateway.register_module_code("ipfs://code/BatchMetadataERC721", Bytes::from(vec![0x01]));

        let tx = gateway
            .prepare_install(CHAIN, core(), &module, &Bytes::new())
            .await
            .unwrap();
        let tx_hash = gateway.send(&tx, Address::new([0xaa; 20])).await.unwrap();

        // Not yet installed.
        assert!(gateway
            .installed_modules(CHAIN, core())
            .await
            .unwrap()
            .is_empty());

        let receipt = gateway.wait_for_receipt(CHAIN, tx_hash).await.unwrap();
        assert!(receipt.success);

        let installed = gateway.installed_modules(CHAIN, core()).await.unwrap();
        assert_eq!(installed.len(), 1);
        assert_eq!(installed[0].name.as_str(), "BatchMetadataERC721");
        assert_eq!(installed[0].bytecode.as_slice(), &[0x01]);
    }

    #[tokio::test]
    async fn test_uninstall_removes_module() {
        let gateway = deployed_gateway();
        let module = published("RoyaltyERC721", "1.0.0");

        let install_tx = gateway
            .prepare_install(CHAIN, core(), &module, &Bytes::new())
            .await
            .unwrap();
        let hash = gateway.send(&install_tx, Address::ZERO).await.unwrap();
        gateway.wait_for_receipt(CHAIN, hash).await.unwrap();

        let installed = gateway.installed_modules(CHAIN, core()).await.unwrap();
        let target = installed[0].clone();

        let uninstall_tx = gateway
            .prepare_uninstall(CHAIN, core(), &target, &Bytes::new())
            .await
            .unwrap();
        let hash = gateway.send(&uninstall_tx, Address::ZERO).await.unwrap();
        let receipt = gateway.wait_for_receipt(CHAIN, hash).await.unwrap();
        assert!(receipt.success);

        assert!(gateway
            .installed_modules(CHAIN, core())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_submission_failure() {
        let gateway = deployed_gateway();
        gateway.set_fail_submission(Some("nonce too low".to_string()));

        let module = published("MintableERC20", "1.0.0");
        let tx = gateway
            .prepare_install(CHAIN, core(), &module, &Bytes::new())
            .await
            .unwrap();
        let err = gateway.send(&tx, Address::ZERO).await.unwrap_err();
        assert!(matches!(err, GatewayError::Submission(_)));
    }

    #[tokio::test]
    async fn test_reverted_receipt_applies_nothing() {
        let gateway = deployed_gateway();
        gateway.revert_next_receipt();

        let module = published("MintableERC20", "1.0.0");
        let tx = gateway
            .prepare_install(CHAIN, core(), &module, &Bytes::new())
            .await
            .unwrap();
        let hash = gateway.send(&tx, Address::ZERO).await.unwrap();
        let receipt = gateway.wait_for_receipt(CHAIN, hash).await.unwrap();

        assert!(!receipt.success);
        assert!(gateway
            .installed_modules(CHAIN, core())
            .await
            .unwrap()
            .is_empty());
    }
}
