//! # Driven Ports (SPI - Outbound)
//!
//! The transaction gateway: everything the planner needs from the chain.
//! A production adapter wraps the host's chain SDK (read calls for
//! bytecode and the installed set, write calls for install/uninstall
//! transactions); the in-crate adapter simulates a single-chain devnet.

use crate::domain::entities::{InstalledModule, PreparedTransaction, Receipt};
use crate::errors::GatewayError;
use async_trait::async_trait;
use mh_01_publish_registry::prelude::PublishedModule;
use shared_types::{Address, Bytes, ChainId, Hash};

/// Interface to the chain for reads and module transactions.
#[async_trait]
pub trait TransactionGateway: Send + Sync {
    /// Fetch the deployed bytecode of a core contract.
    async fn core_bytecode(&self, chain: ChainId, core: Address) -> Result<Bytes, GatewayError>;

    /// Fetch the modules currently installed on a core contract,
    /// including their deployed bytecodes.
    async fn installed_modules(
        &self,
        chain: ChainId,
        core: Address,
    ) -> Result<Vec<InstalledModule>, GatewayError>;

    /// Build an install-module transaction for a published record.
    ///
    /// `data` is the ABI-encoded install parameters (empty for a module
    /// that takes none).
    async fn prepare_install(
        &self,
        chain: ChainId,
        core: Address,
        module: &PublishedModule,
        data: &Bytes,
    ) -> Result<PreparedTransaction, GatewayError>;

    /// Build an uninstall-module transaction for an installed module.
    async fn prepare_uninstall(
        &self,
        chain: ChainId,
        core: Address,
        module: &InstalledModule,
        data: &Bytes,
    ) -> Result<PreparedTransaction, GatewayError>;

    /// Submit a prepared transaction from an authorized account.
    ///
    /// Returns the transaction hash; inclusion is observed separately via
    /// [`wait_for_receipt`](Self::wait_for_receipt).
    async fn send(&self, tx: &PreparedTransaction, from: Address) -> Result<Hash, GatewayError>;

    /// Wait for the on-chain receipt of a submitted transaction.
    async fn wait_for_receipt(&self, chain: ChainId, tx_hash: Hash)
        -> Result<Receipt, GatewayError>;
}
