//! # MH-04 Install Planner - Workflow Orchestration
//!
//! **Subsystem ID:** 4
//!
//! ## Purpose
//!
//! Orchestrates the module installation workflow end to end: publisher
//! resolution and version lookup (subsystem 1), compatibility gating
//! (subsystem 3), install-parameter extraction and call-data encoding
//! (subsystem 2), and finally transaction build/submit/receipt through the
//! transaction gateway port. Lifecycle outcomes are announced on the shared
//! bus.
//!
//! ## Gating DAG
//!
//! Step dependencies are declared explicitly (`PlanStep::requires`), not
//! implied by call order:
//!
//! ```text
//! ResolvePublisher ──► LookupVersion ──┐
//! FetchCoreBytecode ───────────────────┼──► CheckCompatibility ──► ExtractParams
//! FetchInstalledModules ───────────────┘
//! ```
//!
//! Independent branches run concurrently; a blocked step blocks everything
//! downstream of it and nothing else.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Compatibility runs only after core and installed bytecodes are available | `service.rs` - `plan_install()` |
//! | INVARIANT-2 | Parameters are extracted only after a `Compatible` verdict | `domain/plan.rs` - `PlanStep::requires()` |
//! | INVARIANT-3 | A non-`Compatible` verdict blocks the install transaction regardless of parameter validity | `service.rs` - `install()` |
//! | INVARIANT-4 | Cached verdicts are keyed by their full input tuple; stale in-flight results are discarded | `query.rs` - `QueryCache` |

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
pub mod query;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        InstallRequest, InstalledModule, PreparedTransaction, Receipt, UninstallRequest,
    };

    // Plan types
    pub use crate::domain::plan::{InstallPlan, PlanStep, StepState};

    // Query cache
    pub use crate::query::QueryCache;

    // Ports
    pub use crate::ports::outbound::TransactionGateway;

    // Errors
    pub use crate::errors::{GatewayError, PlannerError};

    // Adapters
    pub use crate::adapters::InMemoryGateway;

    // Service
    pub use crate::service::{InstallPlanner, PlannerConfig, PlannerStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 4;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Install Planner";

// =============================================================================
// TESTS
// =============================================================================
