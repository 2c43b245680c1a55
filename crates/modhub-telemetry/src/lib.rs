//! # ModHub Telemetry
//!
//! Structured logging for ModHub subsystems, built on `tracing`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use modhub_telemetry::{TelemetryConfig, init_telemetry};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(&config).expect("telemetry init");
//!
//!     // Application code here; spans and events are now collected.
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MODHUB_SERVICE_NAME` | `modhub` | Service name attached to log lines |
//! | `MODHUB_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `MODHUB_JSON_LOGS` | `false` (true in containers) | JSON-formatted output |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{init_telemetry, try_init_for_tests, TracingGuard};

use thiserror::Error;

/// Telemetry initialization errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The log filter directive could not be parsed.
    #[error("invalid log filter {filter:?}: {reason}")]
    InvalidFilter { filter: String, reason: String },

    /// A global subscriber was already installed.
    #[error("tracing subscriber already installed")]
    AlreadyInitialized,
}

/// Convenience macro for creating a span with subsystem context.
///
/// # Example
///
/// ```rust,ignore
/// use modhub_telemetry::subsystem_span;
///
/// fn lookup_version() {
///     let _span = subsystem_span!("lookup_version", subsystem = "publish-registry");
///     // ... lookup logic
/// }
/// ```
#[macro_export]
macro_rules! subsystem_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
