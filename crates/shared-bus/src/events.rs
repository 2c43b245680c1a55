//! # Module Lifecycle Events
//!
//! Defines all event types that flow through the shared bus.
//!
//! Events are facts, not commands: subscribers react (refresh the installed
//! list, show a notification, append to an audit log) but the publishing
//! subsystem never waits for them.

use serde::{Deserialize, Serialize};
use shared_types::{Address, ChainId, Hash};
use uuid::Uuid;

/// All events that can be published to the event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ModuleEvent {
    // =========================================================================
    // SUBSYSTEM 3: COMPATIBILITY
    // =========================================================================
    /// A compatibility check for a candidate module completed.
    ///
    /// `installable` is true only for a definite `Compatible` verdict; both
    /// `Incompatible` and an unreachable oracle report false here.
    CompatibilityEvaluated {
        /// Core contract the candidate was checked against.
        core: Address,
        /// Candidate module name.
        module: String,
        /// Candidate module version.
        version: String,
        /// Whether installation is unblocked.
        installable: bool,
    },

    // =========================================================================
    // SUBSYSTEM 4: INSTALL PLANNER
    // =========================================================================
    /// A module was installed on a core contract.
    ///
    /// Consumers holding a cached installed-module list MUST refetch it.
    ModuleInstalled {
        /// Correlates with the install action that produced this event.
        correlation_id: Uuid,
        /// Chain the transaction landed on.
        chain: ChainId,
        /// Core contract the module was installed on.
        core: Address,
        /// Installed module name.
        module: String,
        /// Installed module version.
        version: String,
        /// Publisher account of the installed module.
        publisher: Address,
        /// Hash of the install transaction.
        tx_hash: Hash,
    },

    /// An install transaction failed (submission, receipt, or revert).
    InstallFailed {
        /// Correlates with the install action that produced this event.
        correlation_id: Uuid,
        /// Core contract targeted by the failed install.
        core: Address,
        /// Module name.
        module: String,
        /// Requested version.
        version: String,
        /// Human-readable failure reason (also logged).
        reason: String,
    },

    /// A module was uninstalled from a core contract.
    ///
    /// Consumers holding a cached installed-module list MUST refetch it.
    ModuleUninstalled {
        /// Correlates with the uninstall action that produced this event.
        correlation_id: Uuid,
        /// Chain the transaction landed on.
        chain: ChainId,
        /// Core contract the module was removed from.
        core: Address,
        /// Uninstalled module name.
        module: String,
        /// On-chain address of the removed module.
        module_address: Address,
        /// Hash of the uninstall transaction.
        tx_hash: Hash,
    },

    /// An uninstall transaction failed.
    UninstallFailed {
        /// Correlates with the uninstall action that produced this event.
        correlation_id: Uuid,
        /// Core contract targeted by the failed uninstall.
        core: Address,
        /// Module name.
        module: String,
        /// Human-readable failure reason (also logged).
        reason: String,
    },
}

impl ModuleEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::CompatibilityEvaluated { .. } => EventTopic::Compatibility,
            Self::ModuleInstalled { .. }
            | Self::InstallFailed { .. }
            | Self::ModuleUninstalled { .. }
            | Self::UninstallFailed { .. } => EventTopic::Installer,
        }
    }

    /// Get the originating subsystem ID.
    #[must_use]
    pub fn source_subsystem(&self) -> u8 {
        match self {
            Self::CompatibilityEvaluated { .. } => 3,
            Self::ModuleInstalled { .. }
            | Self::InstallFailed { .. }
            | Self::ModuleUninstalled { .. }
            | Self::UninstallFailed { .. } => 4,
        }
    }

    /// Get the core contract this event concerns.
    #[must_use]
    pub fn core(&self) -> Address {
        match self {
            Self::CompatibilityEvaluated { core, .. }
            | Self::ModuleInstalled { core, .. }
            | Self::InstallFailed { core, .. }
            | Self::ModuleUninstalled { core, .. }
            | Self::UninstallFailed { core, .. } => *core,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Subsystem 1 events (publish registry).
    PublishRegistry,
    /// Subsystem 2 events (module ABI).
    ModuleAbi,
    /// Subsystem 3 events (compatibility).
    Compatibility,
    /// Subsystem 4 events (install planner).
    Installer,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Core contracts to include. Empty means all cores.
    pub cores: Vec<Address>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            cores: Vec::new(),
        }
    }

    /// Create a filter for events concerning specific core contracts.
    #[must_use]
    pub fn for_cores(cores: Vec<Address>) -> Self {
        Self {
            topics: Vec::new(),
            cores,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &ModuleEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let core_match = self.cores.is_empty() || self.cores.contains(&event.core());

        topic_match && core_match
    }
}
