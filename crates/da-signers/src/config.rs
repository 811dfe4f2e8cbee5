//! Module configuration from environment variables.

use std::env;

/// Governance module account used when none is configured.
pub const DEFAULT_GOVERNANCE_AUTHORITY: &str = "7b5fe22b5446f7c62ea27b8bd71cef94e03f3df2";

/// Configuration for the DA signers module.
#[derive(Debug, Clone)]
pub struct DaSignersConfig {
    /// Account allowed to change params.
    pub governance_authority: String,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for DaSignersConfig {
    fn default() -> Self {
        Self {
            governance_authority: DEFAULT_GOVERNANCE_AUTHORITY.to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl DaSignersConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DA_GOV_AUTHORITY`: Governance account (default: gov module account)
    /// - `DA_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `DA_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        Self {
            governance_authority: env::var("DA_GOV_AUTHORITY")
                .map(|v| v.trim().to_lowercase())
                .unwrap_or_else(|_| DEFAULT_GOVERNANCE_AUTHORITY.to_string()),

            log_level: env::var("DA_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("DA_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validate_account;

    #[test]
    fn test_default_authority_is_canonical_account() {
        let config = DaSignersConfig::default();
        assert!(validate_account(&config.governance_authority).is_ok());
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
    }
}
