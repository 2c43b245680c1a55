//! # Install Planner Service
//!
//! Runs the install workflow over the subsystem services and the
//! transaction gateway, honoring the gating DAG declared in
//! `domain/plan.rs`:
//!
//! 1. Publisher resolution + version lookup, concurrently with the core
//!    bytecode and installed-set fetches (independent branches).
//! 2. The compatibility check, once its three inputs are available.
//! 3. Parameter extraction, once the verdict is `Compatible`.
//! 4. Call-data encoding, transaction build, submit, receipt wait.
//!
//! Lifecycle outcomes are published on the shared bus; a successful
//! install or uninstall invalidates the compatibility cache (the installed
//! set changed) and tells subscribers to refetch the installed list.

use crate::domain::entities::{
    installed_fingerprint, InstallRequest, InstalledModule, Receipt, UninstallRequest,
};
use crate::domain::plan::{InstallPlan, PlanStep};
use crate::errors::{GatewayError, PlannerError};
use crate::ports::outbound::TransactionGateway;
use crate::query::QueryCache;

use mh_01_publish_registry::prelude::{NameResolver, PublishRegistry, PublishedModule, RegistryService};
use mh_02_module_abi::{encode_values, install_params, uninstall_params, AbiValue, ContractAbi};
use mh_03_compatibility::prelude::{
    BytecodeStore, CompatibilityChecker, CompatibilityOracle, CompatibilityReport,
};
use shared_bus::{EventPublisher, InMemoryEventBus, ModuleEvent};
use shared_types::{Address, Bytes, ChainId, Hash};

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// =============================================================================
// CONFIG & STATS
// =============================================================================

/// Install planner configuration.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// How long to wait for a receipt before giving up.
    pub receipt_timeout_ms: u64,
    /// Whether to memoize compatibility verdicts per input tuple.
    pub cache_compatibility: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            receipt_timeout_ms: 60_000,
            cache_compatibility: true,
        }
    }
}

/// Statistics for the install planner.
#[derive(Debug, Default, Clone)]
pub struct PlannerStats {
    /// Plans computed.
    pub plans_computed: u64,
    /// Compatibility verdicts served from cache.
    pub cache_hits: u64,
    /// Plans blocked at the compatibility gate.
    pub compatibility_blocks: u64,
    /// Install transactions attempted.
    pub installs_attempted: u64,
    /// Install transactions confirmed successful.
    pub installs_succeeded: u64,
    /// Install transactions that failed (submission, receipt, revert).
    pub installs_failed: u64,
    /// Uninstall transactions attempted.
    pub uninstalls_attempted: u64,
    /// Uninstall transactions confirmed successful.
    pub uninstalls_succeeded: u64,
    /// Uninstall transactions that failed.
    pub uninstalls_failed: u64,
}

// =============================================================================
// SERVICE
// =============================================================================

/// The main install planner service.
///
/// This service:
/// 1. Computes install plans honoring the gating DAG
/// 2. Executes install/uninstall transactions through the gateway
/// 3. Publishes lifecycle events on the shared bus
/// 4. Maintains workflow statistics
pub struct InstallPlanner<N, P, B, O, G>
where
    N: NameResolver,
    P: PublishRegistry,
    B: BytecodeStore,
    O: CompatibilityOracle,
    G: TransactionGateway,
{
    /// Subsystem 1: publisher resolution and version lookup.
    registry: RegistryService<N, P>,
    /// Subsystem 3: compatibility gating.
    compatibility: CompatibilityChecker<B, O>,
    /// Transaction gateway port.
    gateway: Arc<G>,
    /// Lifecycle event bus.
    bus: Arc<InMemoryEventBus>,
    /// Service configuration.
    config: PlannerConfig,
    /// Memoized compatibility verdicts.
    compat_cache: QueryCache<CompatibilityReport>,
    /// Service statistics.
    stats: Arc<RwLock<PlannerStats>>,
}

impl<N, P, B, O, G> InstallPlanner<N, P, B, O, G>
where
    N: NameResolver,
    P: PublishRegistry,
    B: BytecodeStore,
    O: CompatibilityOracle,
    G: TransactionGateway,
{
    /// Create a new install planner.
    pub fn new(
        registry: RegistryService<N, P>,
        compatibility: CompatibilityChecker<B, O>,
        gateway: Arc<G>,
        bus: Arc<InMemoryEventBus>,
        config: PlannerConfig,
    ) -> Self {
        Self {
            registry,
            compatibility,
            gateway,
            bus,
            config,
            compat_cache: QueryCache::new(),
            stats: Arc::new(RwLock::new(PlannerStats::default())),
        }
    }

    /// Get current service statistics.
    pub async fn stats(&self) -> PlannerStats {
        self.stats.read().await.clone()
    }

    /// Fetch the modules currently installed on a core contract.
    pub async fn installed_modules(
        &self,
        chain: ChainId,
        core: Address,
    ) -> Result<Vec<InstalledModule>, PlannerError> {
        Ok(self.gateway.installed_modules(chain, core).await?)
    }

    /// Drop every memoized compatibility verdict.
    ///
    /// Called internally after a confirmed install/uninstall; exposed for
    /// hosts that learn about installed-set changes out of band.
    pub fn invalidate_compatibility(&self) {
        self.compat_cache.invalidate_all();
    }

    // =========================================================================
    // PLANNING
    // =========================================================================

    /// Compute an install plan for a request.
    ///
    /// Never fails: every step failure is recorded as a blocked gate in the
    /// returned plan, which callers render directly (blocked step, reason,
    /// parameter schema for the form).
    #[instrument(skip(self), fields(module = %request.module, version = %request.version))]
    pub async fn plan_install(&self, request: &InstallRequest) -> InstallPlan {
        let mut plan = InstallPlan::new(request.clone());
        let started_at = self.compat_cache.generation();

        // Independent branches run concurrently: the registry chain on one
        // side, the two chain reads on the other.
        let (registry_outcome, core_outcome, installed_outcome) = tokio::join!(
            self.resolve_and_lookup(request),
            self.gateway.core_bytecode(request.chain, request.core),
            self.gateway.installed_modules(request.chain, request.core),
        );

        match registry_outcome {
            Ok((publisher, module)) => {
                plan.satisfy(PlanStep::ResolvePublisher);
                plan.satisfy(PlanStep::LookupVersion);
                plan.publisher = Some(publisher);
                plan.module = Some(module);
            }
            Err((step, reason)) => {
                if step == PlanStep::LookupVersion {
                    plan.satisfy(PlanStep::ResolvePublisher);
                }
                plan.block(step, reason);
            }
        }

        let core_bytecode = match core_outcome {
            Ok(bytecode) => {
                plan.satisfy(PlanStep::FetchCoreBytecode);
                Some(bytecode)
            }
            Err(e) => {
                plan.block(PlanStep::FetchCoreBytecode, e.to_string());
                None
            }
        };

        let installed = match installed_outcome {
            Ok(modules) => {
                plan.satisfy(PlanStep::FetchInstalledModules);
                Some(modules)
            }
            Err(e) => {
                plan.block(PlanStep::FetchInstalledModules, e.to_string());
                None
            }
        };

        // Compatibility gate: requires the version record and both
        // bytecode fetches.
        if plan.gates_open(PlanStep::CheckCompatibility) {
            // The gate just passed, so all three are present.
            if let (Some(module), Some(core_bytecode), Some(installed)) =
                (plan.module.clone(), core_bytecode, installed)
            {
                let report = self
                    .compatibility_verdict(request, &module, &core_bytecode, &installed, started_at)
                    .await;

                match report {
                    Ok(report) => {
                        self.bus
                            .publish(ModuleEvent::CompatibilityEvaluated {
                                core: request.core,
                                module: module.name.as_str().to_string(),
                                version: module.version.clone(),
                                installable: report.is_installable(),
                            })
                            .await;

                        if report.is_installable() {
                            plan.satisfy(PlanStep::CheckCompatibility);
                        } else {
                            self.stats.write().await.compatibility_blocks += 1;
                            plan.block(
                                PlanStep::CheckCompatibility,
                                format!("module is not installable: {}", report.label()),
                            );
                        }
                        plan.compatibility = Some(report);
                    }
                    Err(e) => {
                        plan.block(PlanStep::CheckCompatibility, e.to_string());
                    }
                }
            }
        }

        // Parameter gate: requires a definite Compatible verdict.
        if plan.gates_open(PlanStep::ExtractParams) {
            if let Some(module) = &plan.module {
                match extract_install_schema(module) {
                    Ok(params) => {
                        plan.params = params;
                        plan.satisfy(PlanStep::ExtractParams);
                    }
                    Err(e) => plan.block(PlanStep::ExtractParams, e.to_string()),
                }
            }
        }

        self.stats.write().await.plans_computed += 1;
        debug!(ready = plan.is_ready(), "Install plan computed");
        plan
    }

    /// Resolve the publisher and locate the requested version.
    async fn resolve_and_lookup(
        &self,
        request: &InstallRequest,
    ) -> Result<(Address, PublishedModule), (PlanStep, String)> {
        let publisher = self
            .registry
            .resolve_publisher(&request.publisher)
            .await
            .map_err(|e| (PlanStep::ResolvePublisher, e.to_string()))?;

        let module = self
            .registry
            .lookup_version(publisher, &request.module, &request.version)
            .await
            .map_err(|e| (PlanStep::LookupVersion, e.to_string()))?;

        Ok((publisher, module))
    }

    /// Compatibility verdict, memoized per full input tuple.
    async fn compatibility_verdict(
        &self,
        request: &InstallRequest,
        module: &PublishedModule,
        core_bytecode: &Bytes,
        installed: &[InstalledModule],
        started_at: u64,
    ) -> Result<CompatibilityReport, PlannerError> {
        let key = format!(
            "{}:{:?}:{}:{:?}:{:?}",
            request.chain,
            request.core,
            module.label(),
            core_bytecode.digest(),
            installed_fingerprint(installed),
        );

        if self.config.cache_compatibility {
            if let Some(report) = self.compat_cache.get(&key) {
                self.stats.write().await.cache_hits += 1;
                debug!(verdict = report.label(), "Compatibility verdict from cache");
                return Ok(report);
            }
        }

        let installed_bytecodes: Vec<Bytes> = installed
            .iter()
            .map(|entry| entry.bytecode.clone())
            .collect();

        let report = self
            .compatibility
            .check_candidate(
                request.chain,
                core_bytecode,
                &installed_bytecodes,
                &module.bytecode_uri,
            )
            .await?;

        // Only definite verdicts are memoized: an Unknown means the check
        // itself failed and must re-run on the next plan. Results computed
        // under an older generation are discarded either way.
        if self.config.cache_compatibility
            && !matches!(report, CompatibilityReport::Unknown { .. })
        {
            self.compat_cache.insert(key, started_at, report.clone());
        }
        Ok(report)
    }

    // =========================================================================
    // INSTALL / UNINSTALL
    // =========================================================================

    /// Plan and execute a module installation.
    ///
    /// The plan must come out fully satisfied; otherwise the first blocked
    /// gate is returned and nothing is submitted. `values` are matched
    /// against the extracted parameter schema (empty for a parameterless
    /// module).
    #[instrument(skip(self, values), fields(module = %request.module))]
    pub async fn install(
        &self,
        request: &InstallRequest,
        values: &[AbiValue],
        from: Address,
    ) -> Result<Receipt, PlannerError> {
        self.stats.write().await.installs_attempted += 1;

        let plan = self.plan_install(request).await;
        if let Some((step, reason)) = plan.first_unsatisfied() {
            warn!(%step, %reason, "Install blocked");
            return Err(PlannerError::Blocked { step, reason });
        }
        let module = plan.module.clone().ok_or_else(|| PlannerError::Blocked {
            step: PlanStep::LookupVersion,
            reason: "plan carries no published record".to_string(),
        })?;

        let data = encode_values(&plan.params, values)?;
        let correlation_id = Uuid::new_v4();

        let receipt = self
            .submit_install(request, &module, &data, from)
            .await
            .inspect_err(|e| {
                error!(error = %e, module = %module.label(), "Install failed");
            });

        match receipt {
            Ok(receipt) => {
                self.stats.write().await.installs_succeeded += 1;
                self.compat_cache.invalidate_all();
                self.bus
                    .publish(ModuleEvent::ModuleInstalled {
                        correlation_id,
                        chain: request.chain,
                        core: request.core,
                        module: module.name.as_str().to_string(),
                        version: module.version.clone(),
                        publisher: module.publisher,
                        tx_hash: receipt.tx_hash,
                    })
                    .await;
                info!(
                    module = %module.label(),
                    tx_hash = %receipt.tx_hash,
                    "Module installed"
                );
                Ok(receipt)
            }
            Err(e) => {
                self.stats.write().await.installs_failed += 1;
                self.bus
                    .publish(ModuleEvent::InstallFailed {
                        correlation_id,
                        core: request.core,
                        module: module.name.as_str().to_string(),
                        version: module.version.clone(),
                        reason: e.to_string(),
                    })
                    .await;
                Err(e)
            }
        }
    }

    async fn submit_install(
        &self,
        request: &InstallRequest,
        module: &PublishedModule,
        data: &Bytes,
        from: Address,
    ) -> Result<Receipt, PlannerError> {
        let tx = self
            .gateway
            .prepare_install(request.chain, request.core, module, data)
            .await?;
        let tx_hash = self.gateway.send(&tx, from).await?;
        let receipt = self.await_receipt(request.chain, tx_hash).await?;

        if !receipt.success {
            return Err(GatewayError::Reverted { tx_hash }.into());
        }
        Ok(receipt)
    }

    /// Plan and execute a module uninstallation.
    ///
    /// The published record (for the uninstall parameter schema) comes from
    /// the registry; the target proxy address comes from the installed set.
    #[instrument(skip(self, values), fields(module = %request.module))]
    pub async fn uninstall(
        &self,
        request: &UninstallRequest,
        values: &[AbiValue],
        from: Address,
    ) -> Result<Receipt, PlannerError> {
        self.stats.write().await.uninstalls_attempted += 1;

        let outcome = self.submit_uninstall(request, values, from).await;
        let correlation_id = Uuid::new_v4();

        match outcome {
            Ok((target, receipt)) => {
                self.stats.write().await.uninstalls_succeeded += 1;
                self.compat_cache.invalidate_all();
                self.bus
                    .publish(ModuleEvent::ModuleUninstalled {
                        correlation_id,
                        chain: request.chain,
                        core: request.core,
                        module: request.module.as_str().to_string(),
                        module_address: target,
                        tx_hash: receipt.tx_hash,
                    })
                    .await;
                info!(module = %request.module, tx_hash = %receipt.tx_hash, "Module uninstalled");
                Ok(receipt)
            }
            Err(e) => {
                self.stats.write().await.uninstalls_failed += 1;
                error!(error = %e, module = %request.module, "Uninstall failed");
                self.bus
                    .publish(ModuleEvent::UninstallFailed {
                        correlation_id,
                        core: request.core,
                        module: request.module.as_str().to_string(),
                        reason: e.to_string(),
                    })
                    .await;
                Err(e)
            }
        }
    }

    async fn submit_uninstall(
        &self,
        request: &UninstallRequest,
        values: &[AbiValue],
        from: Address,
    ) -> Result<(Address, Receipt), PlannerError> {
        let record = self
            .registry
            .resolve_module(&request.publisher, &request.module, &request.version)
            .await?;

        let installed = self
            .gateway
            .installed_modules(request.chain, request.core)
            .await?;
        let target = installed
            .iter()
            .find(|module| module.name == request.module)
            .cloned()
            .ok_or_else(|| PlannerError::ModuleNotInstalled {
                module: request.module.as_str().to_string(),
                core: request.core,
            })?;

        let params = extract_uninstall_schema(&record)?;
        let data = encode_values(&params, values)?;

        let tx = self
            .gateway
            .prepare_uninstall(request.chain, request.core, &target, &data)
            .await?;
        let tx_hash = self.gateway.send(&tx, from).await?;
        let receipt = self.await_receipt(request.chain, tx_hash).await?;

        if !receipt.success {
            return Err(GatewayError::Reverted { tx_hash }.into());
        }
        Ok((target.address, receipt))
    }

    async fn await_receipt(&self, chain: ChainId, tx_hash: Hash) -> Result<Receipt, PlannerError> {
        let window = Duration::from_millis(self.config.receipt_timeout_ms);
        match timeout(window, self.gateway.wait_for_receipt(chain, tx_hash)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(GatewayError::Timeout {
                waited_ms: self.config.receipt_timeout_ms,
            }
            .into()),
        }
    }
}

// =============================================================================
// SCHEMA HELPERS
// =============================================================================

fn parse_abi(module: &PublishedModule) -> Result<ContractAbi, PlannerError> {
    let raw = module
        .abi
        .as_ref()
        .ok_or(mh_02_module_abi::AbiError::MissingAbi)?;
    Ok(ContractAbi::from_value(raw).map_err(PlannerError::Abi)?)
}

fn extract_install_schema(
    module: &PublishedModule,
) -> Result<Vec<mh_02_module_abi::AbiParam>, PlannerError> {
    Ok(install_params(&parse_abi(module)?))
}

fn extract_uninstall_schema(
    module: &PublishedModule,
) -> Result<Vec<mh_02_module_abi::AbiParam>, PlannerError> {
    Ok(uninstall_params(&parse_abi(module)?))
}

// =============================================================================
// TESTS
// =============================================================================
