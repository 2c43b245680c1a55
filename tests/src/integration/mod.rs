//! # Integration Tests
//!
//! Cross-subsystem choreography: registry (1), module ABI (2),
//! compatibility (3), and the install planner (4) wired together over the
//! in-memory adapters and the shared bus.

pub mod install_flow;
pub mod reactivity;
pub mod registry_consistency;

use mh_01_publish_registry::prelude::{
    InMemoryRegistry, ModuleName, PublishedModule, RegistryService, StaticNameResolver,
};
use mh_03_compatibility::prelude::{CompatibilityChecker, InMemoryBytecodeStore, StaticOracle};
use mh_04_install_planner::prelude::{InMemoryGateway, InstallPlanner, PlannerConfig};
use shared_bus::InMemoryEventBus;
use shared_types::{Address, Bytes, ChainId};
use std::sync::Arc;

/// Devnet chain id used across the suite.
pub const CHAIN: ChainId = ChainId::new(31337);

/// Publisher address used across the suite (address-form input).
pub const PUBLISHER_HEX: &str = "0xdd9900000000000000000000000000000000b024";

/// A fully wired planner over in-memory adapters.
pub struct TestStack {
    pub resolver: Arc<StaticNameResolver>,
    pub registry: Arc<InMemoryRegistry>,
    pub store: Arc<InMemoryBytecodeStore>,
    pub oracle: Arc<StaticOracle>,
    pub gateway: Arc<InMemoryGateway>,
    pub bus: Arc<InMemoryEventBus>,
    pub planner: InstallPlanner<
        StaticNameResolver,
        InMemoryRegistry,
        InMemoryBytecodeStore,
        StaticOracle,
        InMemoryGateway,
    >,
}

/// Core contract address deployed by [`stack`].
pub fn core() -> Address {
    Address::new([0xc0; 20])
}

/// Publisher account for the suite's published modules.
pub fn publisher() -> Address {
    Address::from_hex(PUBLISHER_HEX).expect("suite publisher address")
}

/// Builds the full stack with one deployed core contract.
pub fn stack() -> TestStack {
    modhub_telemetry::try_init_for_tests();

    let resolver = Arc::new(StaticNameResolver::new());
    let registry = Arc::new(InMemoryRegistry::new());
    let store = Arc::new(InMemoryBytecodeStore::new());
    let oracle = Arc::new(StaticOracle::new());
    let gateway = Arc::new(InMemoryGateway::new());
    let bus = Arc::new(InMemoryEventBus::new());

    gateway.set_core(CHAIN, core(), Bytes::from(vec![0xc0, 0xde]));

    let planner = InstallPlanner::new(
        RegistryService::new(resolver.clone(), registry.clone()),
        CompatibilityChecker::new(store.clone(), oracle.clone()),
        gateway.clone(),
        bus.clone(),
        PlannerConfig::default(),
    );

    TestStack {
        resolver,
        registry,
        store,
        oracle,
        gateway,
        bus,
        planner,
    }
}

/// Publishes a module version and pins its bytecode everywhere it is
/// needed (content store for compatibility, gateway for install effects).
pub fn publish(stack: &TestStack, name: &str, version: &str, abi: Option<serde_json::Value>) {
    let bytecode_uri = format!("ipfs://code/{name}/{version}");
    let bytecode = Bytes::from(format!("{name}:{version}").into_bytes());
    stack.store.pin(bytecode_uri.clone(), bytecode.clone());
    stack
        .gateway
        .register_module_code(bytecode_uri.clone(), bytecode);

    stack.registry.publish(PublishedModule {
        name: ModuleName::new(name),
        version: version.to_string(),
        publisher: publisher(),
        metadata_uri: format!("ipfs://meta/{name}/{version}"),
        bytecode_uri,
        abi,
    });
}

/// The bytecode [`publish`] pins for a module version.
pub fn bytecode_of(name: &str, version: &str) -> Bytes {
    Bytes::from(format!("{name}:{version}").into_bytes())
}

/// ABI with a parameterless install encoder.
pub fn zero_param_abi() -> serde_json::Value {
    serde_json::json!([
        { "type": "function", "name": "encodeBytesOnInstall", "inputs": [] },
        { "type": "function", "name": "encodeBytesOnUninstall", "inputs": [] }
    ])
}
