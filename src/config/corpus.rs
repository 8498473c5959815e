use serde::{Deserialize, Serialize};

/// Bounds applied when loading a repository from disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Stop after this many files
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Files larger than this keep their size but not their content
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,

    /// Glob patterns excluded in addition to .gitignore rules
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            max_files: default_max_files(),
            max_file_bytes: default_max_file_bytes(),
            ignore_patterns: default_ignore_patterns(),
        }
    }
}

fn default_max_files() -> usize {
    5_000
}

fn default_max_file_bytes() -> u64 {
    512 * 1024
}

fn default_ignore_patterns() -> Vec<String> {
    [
        "**/node_modules/**",
        "**/.git/**",
        "**/dist/**",
        "**/build/**",
        "**/.next/**",
        "**/coverage/**",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}
