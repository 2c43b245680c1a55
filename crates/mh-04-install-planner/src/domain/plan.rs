//! # Install Plan
//!
//! The explicit dependency DAG of the install workflow. Gating is declared
//! as data (`PlanStep::requires`), and a plan records the per-step outcome
//! of one planning pass.

use crate::domain::entities::InstallRequest;
use mh_01_publish_registry::prelude::PublishedModule;
use mh_02_module_abi::AbiParam;
use mh_03_compatibility::prelude::CompatibilityReport;
use shared_types::Address;
use std::fmt;

// =============================================================================
// STEPS
// =============================================================================

/// One step of the install workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlanStep {
    /// Resolve the raw publisher input to a canonical address.
    ResolvePublisher,
    /// Locate the requested published version in the catalog.
    LookupVersion,
    /// Fetch the core contract's deployed bytecode.
    FetchCoreBytecode,
    /// Fetch the installed module set (with bytecodes).
    FetchInstalledModules,
    /// Run the compatibility check on the assembled bytecodes.
    CheckCompatibility,
    /// Extract the install-parameter schema from the module ABI.
    ExtractParams,
}

impl PlanStep {
    /// Every step, in topological order.
    pub const ALL: [PlanStep; 6] = [
        Self::ResolvePublisher,
        Self::LookupVersion,
        Self::FetchCoreBytecode,
        Self::FetchInstalledModules,
        Self::CheckCompatibility,
        Self::ExtractParams,
    ];

    /// Steps that must be satisfied before this one may run.
    ///
    /// This is the gating DAG, declared as data rather than implied by
    /// call order.
    #[must_use]
    pub fn requires(self) -> &'static [PlanStep] {
        match self {
            Self::ResolvePublisher | Self::FetchCoreBytecode | Self::FetchInstalledModules => &[],
            Self::LookupVersion => &[Self::ResolvePublisher],
            Self::CheckCompatibility => &[
                Self::LookupVersion,
                Self::FetchCoreBytecode,
                Self::FetchInstalledModules,
            ],
            Self::ExtractParams => &[Self::CheckCompatibility],
        }
    }
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ResolvePublisher => "publisher resolution",
            Self::LookupVersion => "version lookup",
            Self::FetchCoreBytecode => "core bytecode fetch",
            Self::FetchInstalledModules => "installed module fetch",
            Self::CheckCompatibility => "compatibility check",
            Self::ExtractParams => "parameter extraction",
        };
        f.write_str(label)
    }
}

/// Outcome of one step within a plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepState {
    /// Not attempted; an upstream gate is unsatisfied.
    Pending,
    /// Completed; downstream steps may run.
    Satisfied,
    /// Attempted and failed, or gated off by its verdict.
    Blocked {
        /// Why this step blocks the workflow.
        reason: String,
    },
}

// =============================================================================
// PLAN
// =============================================================================

/// The outcome of one planning pass over the install workflow.
///
/// A plan is a snapshot: it records what each step produced and which gate
/// (if any) blocks the install action. It holds no live handles and can be
/// rendered directly by a caller (step list for a progress surface, the
/// parameter schema for a dynamic form).
#[derive(Clone, Debug)]
pub struct InstallPlan {
    /// The request this plan was computed for.
    pub request: InstallRequest,
    /// Per-step outcome, in topological order.
    steps: Vec<(PlanStep, StepState)>,
    /// Resolved publisher address, once resolution succeeded.
    pub publisher: Option<Address>,
    /// Located published record, once the lookup succeeded.
    pub module: Option<PublishedModule>,
    /// Compatibility verdict, once the check ran.
    pub compatibility: Option<CompatibilityReport>,
    /// Install-parameter schema, once extracted.
    pub params: Vec<AbiParam>,
}

impl InstallPlan {
    /// Creates a plan with every step pending.
    #[must_use]
    pub fn new(request: InstallRequest) -> Self {
        Self {
            request,
            steps: PlanStep::ALL
                .iter()
                .map(|step| (*step, StepState::Pending))
                .collect(),
            publisher: None,
            module: None,
            compatibility: None,
            params: Vec::new(),
        }
    }

    /// Marks a step satisfied.
    pub fn satisfy(&mut self, step: PlanStep) {
        self.set(step, StepState::Satisfied);
    }

    /// Marks a step blocked with a reason.
    pub fn block(&mut self, step: PlanStep, reason: impl Into<String>) {
        self.set(
            step,
            StepState::Blocked {
                reason: reason.into(),
            },
        );
    }

    /// Returns the state of a step.
    #[must_use]
    pub fn state(&self, step: PlanStep) -> &StepState {
        self.steps
            .iter()
            .find(|(s, _)| *s == step)
            .map(|(_, state)| state)
            .unwrap_or(&StepState::Pending)
    }

    /// True when a step's declared requirements are all satisfied.
    #[must_use]
    pub fn gates_open(&self, step: PlanStep) -> bool {
        step.requires()
            .iter()
            .all(|dep| matches!(self.state(*dep), StepState::Satisfied))
    }

    /// True when every step is satisfied and the install action may run.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.steps
            .iter()
            .all(|(_, state)| matches!(state, StepState::Satisfied))
    }

    /// The first blocked or pending step, if the plan is not ready.
    #[must_use]
    pub fn first_unsatisfied(&self) -> Option<(PlanStep, String)> {
        self.steps.iter().find_map(|(step, state)| match state {
            StepState::Satisfied => None,
            StepState::Pending => Some((*step, "not attempted".to_string())),
            StepState::Blocked { reason } => Some((*step, reason.clone())),
        })
    }

    /// Iterates over the per-step outcomes in topological order.
    pub fn steps(&self) -> impl Iterator<Item = &(PlanStep, StepState)> {
        self.steps.iter()
    }

    fn set(&mut self, step: PlanStep, state: StepState) {
        if let Some(slot) = self.steps.iter_mut().find(|(s, _)| *s == step) {
            slot.1 = state;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mh_01_publish_registry::prelude::{ModuleName, VersionSelector};
    use shared_types::ChainId;

    fn request() -> InstallRequest {
        InstallRequest {
            chain: ChainId::new(1),
            core: Address::new([0xc0; 20]),
            publisher: "0xdd9900000000000000000000000000000000b024".to_string(),
            module: ModuleName::new("BatchMetadataERC721"),
            version: VersionSelector::Latest,
        }
    }

    #[test]
    fn test_dag_declares_compatibility_gates() {
        let deps = PlanStep::CheckCompatibility.requires();
        assert!(deps.contains(&PlanStep::LookupVersion));
        assert!(deps.contains(&PlanStep::FetchCoreBytecode));
        assert!(deps.contains(&PlanStep::FetchInstalledModules));
    }

    #[test]
    fn test_dag_gates_params_on_compatibility() {
        assert_eq!(
            PlanStep::ExtractParams.requires(),
            &[PlanStep::CheckCompatibility]
        );
    }

    #[test]
    fn test_gates_open_tracks_dependencies() {
        let mut plan = InstallPlan::new(request());
        assert!(!plan.gates_open(PlanStep::CheckCompatibility));

        plan.satisfy(PlanStep::ResolvePublisher);
        plan.satisfy(PlanStep::LookupVersion);
        plan.satisfy(PlanStep::FetchCoreBytecode);
        assert!(!plan.gates_open(PlanStep::CheckCompatibility));

        plan.satisfy(PlanStep::FetchInstalledModules);
        assert!(plan.gates_open(PlanStep::CheckCompatibility));
    }

    #[test]
    fn test_is_ready_requires_all_steps() {
        let mut plan = InstallPlan::new(request());
        for step in PlanStep::ALL {
            assert!(!plan.is_ready());
            plan.satisfy(step);
        }
        assert!(plan.is_ready());
    }

    #[test]
    fn test_first_unsatisfied_prefers_topological_order() {
        let mut plan = InstallPlan::new(request());
        plan.satisfy(PlanStep::ResolvePublisher);
        plan.block(PlanStep::LookupVersion, "no published version 9.9.9");
        plan.satisfy(PlanStep::FetchCoreBytecode);

        let (step, reason) = plan.first_unsatisfied().unwrap();
        assert_eq!(step, PlanStep::LookupVersion);
        assert!(reason.contains("9.9.9"));
    }

    #[test]
    fn test_blocked_compatibility_blocks_plan() {
        let mut plan = InstallPlan::new(request());
        for step in [
            PlanStep::ResolvePublisher,
            PlanStep::LookupVersion,
            PlanStep::FetchCoreBytecode,
            PlanStep::FetchInstalledModules,
        ] {
            plan.satisfy(step);
        }
        plan.block(PlanStep::CheckCompatibility, "verdict: incompatible");

        assert!(!plan.is_ready());
        let (step, _) = plan.first_unsatisfied().unwrap();
        assert_eq!(step, PlanStep::CheckCompatibility);
    }
}
