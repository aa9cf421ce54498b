//! Ledger configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use energy_types::EnergyParams;
use energy_verifier::context::{SPEND_ACTION, VERIFIED_HUMANS_GROUP};
use energy_verifier::ActionContext;

use crate::LedgerError;

/// Configuration for an Energy ledger deployment.
///
/// Can be loaded from a TOML file via [`EnergyConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnergyConfig {
    /// Application id proofs are scoped to.
    #[serde(default = "default_app_id")]
    pub app_id: String,

    /// Action tag proofs are scoped to.
    #[serde(default = "default_action")]
    pub action: String,

    /// Identity set proofs must come from.
    #[serde(default = "default_group_id")]
    pub group_id: u64,

    /// Accrual parameters.
    #[serde(default)]
    pub params: EnergyParams,

    /// Data directory for the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// LMDB map size in bytes.
    #[serde(default = "default_map_size")]
    pub map_size: usize,

    /// Address the HTTP server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Endpoint of the remote proof verification service.
    #[serde(default = "default_verifier_url")]
    pub verifier_url: String,

    /// Per-request timeout for the verifier, in seconds.
    #[serde(default = "default_verifier_timeout_secs")]
    pub verifier_timeout_secs: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_app_id() -> String {
    "app_staging_energy".to_string()
}

fn default_action() -> String {
    SPEND_ACTION.to_string()
}

fn default_group_id() -> u64 {
    VERIFIED_HUMANS_GROUP
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./energy_data")
}

fn default_map_size() -> usize {
    1 << 30
}

fn default_listen_addr() -> String {
    "127.0.0.1:7077".to_string()
}

fn default_verifier_url() -> String {
    "http://127.0.0.1:7080/verify".to_string()
}

fn default_verifier_timeout_secs() -> u64 {
    10
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl EnergyConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, LedgerError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| LedgerError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, LedgerError> {
        toml::from_str(s).map_err(|e| LedgerError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, LedgerError> {
        toml::to_string_pretty(self).map_err(|e| LedgerError::Config(e.to_string()))
    }

    /// The app/action/group scope spend proofs are checked against.
    pub fn action_context(&self) -> ActionContext {
        ActionContext {
            app_id: self.app_id.clone(),
            action: self.action.clone(),
            group_id: self.group_id,
        }
    }
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            app_id: default_app_id(),
            action: default_action(),
            group_id: default_group_id(),
            params: EnergyParams::default(),
            data_dir: default_data_dir(),
            map_size: default_map_size(),
            listen_addr: default_listen_addr(),
            verifier_url: default_verifier_url(),
            verifier_timeout_secs: default_verifier_timeout_secs(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = EnergyConfig::default();
        let toml_str = config.to_toml_string().expect("should serialize");
        let parsed = EnergyConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.listen_addr, config.listen_addr);
        assert_eq!(parsed.params, config.params);
        assert_eq!(parsed.map_size, config.map_size);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = EnergyConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.action, "spend-energy");
        assert_eq!(config.group_id, 1);
        assert_eq!(config.params.rate_per_period, 100);
        assert_eq!(config.params.period_secs, 604_800);
        assert_eq!(config.params.bootstrap_periods, 2);
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            app_id = "app_prod"
            listen_addr = "0.0.0.0:9000"

            [params]
            rate_per_period = 250
        "#;
        let config = EnergyConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.app_id, "app_prod");
        assert_eq!(config.listen_addr, "0.0.0.0:9000");
        assert_eq!(config.params.rate_per_period, 250);
        assert_eq!(config.params.period_secs, 604_800); // default
    }

    #[test]
    fn action_context_follows_config() {
        let config = EnergyConfig {
            app_id: "app_x".into(),
            ..Default::default()
        };
        let ctx = config.action_context();
        assert_eq!(ctx, ActionContext::spend("app_x"));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = EnergyConfig::from_toml_file("/nonexistent/energy.toml");
        assert!(matches!(result, Err(LedgerError::Config(_))));
    }
}
