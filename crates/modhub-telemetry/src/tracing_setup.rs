//! Tracing subscriber installation.
//!
//! One global subscriber per process. Output is either a compact
//! human-readable format (development) or JSON lines (containers, log
//! shipping agents).

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::EnvFilter;

/// Guard that keeps the tracing subscriber active.
///
/// Hold it for the lifetime of the application; dropping it flushes nothing
/// today but reserves the slot for buffered writers.
pub struct TracingGuard {
    _private: (),
}

/// Install the global tracing subscriber from `config`.
///
/// Returns `TelemetryError::AlreadyInitialized` if a subscriber was already
/// installed in this process.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TracingGuard, TelemetryError> {
    let filter = build_filter(config)?;

    let result = if config.json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.with_targets)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.with_targets)
            .compact()
            .try_init()
    };

    result.map_err(|_| TelemetryError::AlreadyInitialized)?;

    tracing::debug!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );

    Ok(TracingGuard { _private: () })
}

/// Install a subscriber for tests, ignoring double initialization.
///
/// Test binaries share a process; whichever test runs first wins and the
/// rest reuse its subscriber.
pub fn try_init_for_tests() {
    let config = TelemetryConfig {
        log_level: "debug".to_string(),
        ..TelemetryConfig::default()
    };
    let _ = init_telemetry(&config);
}

fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::InvalidFilter {
        filter: config.log_level.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_level_and_directives() {
        let mut config = TelemetryConfig::default();
        assert!(build_filter(&config).is_ok());

        config.log_level = "info,mh_04_install_planner=debug".to_string();
        assert!(build_filter(&config).is_ok());
    }

    #[test]
    fn test_build_filter_rejects_garbage() {
        let config = TelemetryConfig {
            log_level: "not==a==filter".to_string(),
            ..TelemetryConfig::default()
        };
        assert!(build_filter(&config).is_err());
    }

    #[test]
    fn test_try_init_for_tests_is_idempotent() {
        try_init_for_tests();
        try_init_for_tests();
    }
}
