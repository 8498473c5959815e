use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::complexity::ComplexityConfig;
use super::corpus::CorpusConfig;
use super::parallel::ParallelConfig;
use super::scoring::ScoringConfig;

/// Root configuration structure for archmap
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchmapConfig {
    /// Replacement classification rule table (TOML)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_path: Option<PathBuf>,

    /// Parallel processing configuration
    #[serde(default)]
    pub parallel: ParallelConfig,

    /// Node complexity baseline weights
    #[serde(default)]
    pub complexity: ComplexityConfig,

    /// Quality score weights and thresholds
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Directory loading bounds
    #[serde(default)]
    pub corpus: CorpusConfig,
}

impl ArchmapConfig {
    /// Render as TOML, as written by `archmap init`
    pub fn to_toml_string(&self) -> crate::core::Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::core::Error::Configuration(format!("Failed to serialize: {}", e)))
    }
}
