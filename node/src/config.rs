//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use rumor_types::MarketParams;

use crate::NodeError;

/// Configuration for a Rumor Protocol node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Market parameters are not
/// TOML-configurable: amounts are raw u128 values that TOML integers
/// cannot carry, so they are set programmatically and default to the
/// deployed contract's values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Account authorized to resolve claims.
    pub resolver: String,

    /// Market parameters (set programmatically, not from TOML).
    #[serde(skip)]
    pub market: MarketParams,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether to register Prometheus metrics.
    #[serde(default = "default_true")]
    pub enable_metrics: bool,

    /// Endpoint of the AI confidence-scoring service. Annotation is
    /// disabled when unset.
    #[serde(default)]
    pub confidence_api_url: Option<String>,

    /// Timeout for a single confidence-scoring request.
    #[serde(default = "default_confidence_timeout")]
    pub confidence_timeout_secs: u64,
}

impl NodeConfig {
    /// Minimal configuration with default parameters, for tests.
    pub fn for_resolver(resolver: impl Into<String>) -> Self {
        Self {
            resolver: resolver.into(),
            market: MarketParams::default(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            enable_metrics: true,
            confidence_api_url: None,
            confidence_timeout_secs: default_confidence_timeout(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, NodeError> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| NodeError::Config(e.to_string()))
    }
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_confidence_timeout() -> u64 {
    10
}
