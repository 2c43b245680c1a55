//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for structured logging.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to log lines.
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `env-filter` directive string.
    pub log_level: String,

    /// Whether to emit JSON formatted logs.
    pub json_logs: bool,

    /// Whether to include span targets in output (for development).
    pub with_targets: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "modhub".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            with_targets: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MODHUB_SERVICE_NAME`: Service name (default: modhub)
    /// - `MODHUB_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `MODHUB_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    /// - `MODHUB_LOG_TARGETS`: Include targets in output (default: true)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("MODHUB_SERVICE_NAME").unwrap_or_else(|_| "modhub".to_string()),

            log_level: env::var("MODHUB_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("MODHUB_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),

            with_targets: env::var("MODHUB_LOG_TARGETS")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),
        }
    }

    /// Create configuration for a specific subsystem.
    pub fn for_subsystem(subsystem_id: &str, subsystem_name: &str) -> Self {
        let mut config = Self::from_env();
        config.service_name = format!("mh-{subsystem_id}-{subsystem_name}");
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "modhub");
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
    }

    #[test]
    fn test_for_subsystem() {
        let config = TelemetryConfig::for_subsystem("01", "publish-registry");
        assert_eq!(config.service_name, "mh-01-publish-registry");
    }
}
