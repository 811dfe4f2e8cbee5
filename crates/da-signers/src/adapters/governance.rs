//! Governance authority adapter.

use crate::config::DaSignersConfig;
use crate::ports::GovernanceAuthority;

/// Governance authority fixed at construction.
#[derive(Clone, Debug)]
pub struct StaticGovernanceAuthority {
    authority: String,
}

impl StaticGovernanceAuthority {
    /// Authority fixed to the given account.
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
        }
    }

    /// Authority taken from module configuration.
    pub fn from_config(config: &DaSignersConfig) -> Self {
        Self::new(config.governance_authority.clone())
    }
}

impl GovernanceAuthority for StaticGovernanceAuthority {
    fn authority(&self) -> String {
        self.authority.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let config = DaSignersConfig {
            governance_authority: "gov".to_string(),
            ..Default::default()
        };
        assert_eq!(StaticGovernanceAuthority::from_config(&config).authority(), "gov");
    }
}
