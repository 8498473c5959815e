//! Parallelism configuration for per-file analysis.
//!
//! Extraction and classification are independent per file, so they fan out
//! over rayon's thread pool when enabled.

use serde::{Deserialize, Serialize};

/// Default value for parallel processing enabled
fn default_enabled() -> bool {
    true
}

/// Configuration for parallel processing operations.
///
/// # Example
///
/// ```rust
/// use archmap::config::ParallelConfig;
///
/// let config = ParallelConfig {
///     enabled: true,
///     max_concurrency: Some(4),
/// };
/// assert_eq!(config.effective_concurrency(), 4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParallelConfig {
    /// Enable parallel processing (default: true)
    ///
    /// When disabled, files are processed sequentially.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Maximum worker threads (default: number of CPU cores)
    #[serde(default)]
    pub max_concurrency: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_concurrency: None,
        }
    }
}

impl ParallelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with parallel processing disabled.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Configured worker count, or the number of CPU cores
    pub fn effective_concurrency(&self) -> usize {
        self.max_concurrency
            .filter(|n| *n > 0)
            .unwrap_or_else(num_cpus::get)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_config_default() {
        let config = ParallelConfig::default();
        assert!(config.enabled);
        assert!(config.max_concurrency.is_none());
    }

    #[test]
    fn test_parallel_config_sequential() {
        let config = ParallelConfig::sequential();
        assert!(!config.enabled);
    }

    #[test]
    fn test_effective_concurrency() {
        let config = ParallelConfig {
            enabled: true,
            max_concurrency: Some(4),
        };
        assert_eq!(config.effective_concurrency(), 4);

        let config = ParallelConfig {
            enabled: true,
            max_concurrency: Some(0),
        };
        assert!(config.effective_concurrency() >= 1);

        let config = ParallelConfig::default();
        assert!(config.effective_concurrency() >= 1);
    }

    #[test]
    fn test_parallel_config_toml_defaults() {
        let config: ParallelConfig = toml::from_str("max_concurrency = 2").unwrap();
        assert!(config.enabled);
        assert_eq!(config.max_concurrency, Some(2));
    }
}
