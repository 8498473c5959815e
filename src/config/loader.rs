use std::fs;
use std::path::{Path, PathBuf};

use super::core::ArchmapConfig;
use super::scoring::CategoryWeights;
use crate::core::{Error, Result};

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".archmap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<ArchmapConfig> {
    let mut config = toml::from_str::<ArchmapConfig>(contents)?;

    let weights = &mut config.scoring.weights;
    if let Err(e) = weights.validate() {
        log::warn!("Invalid scoring weights: {}. Using defaults.", e);
        *weights = CategoryWeights::default();
    } else {
        weights.normalize();
    }

    Ok(config)
}

/// Load an explicitly named config file; errors are reported to the caller
pub fn load_config_from_path(path: &Path) -> Result<ArchmapConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read config file", path, e))?;
    let mut config = parse_and_validate_config(&contents)?;

    // Relative rule tables are resolved against the config file's directory
    if let (Some(rules), Some(dir)) = (config.rules_path.as_ref(), path.parent()) {
        if rules.is_relative() {
            config.rules_path = Some(dir.join(rules));
        }
    }

    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try loading config from a path found during discovery
fn try_load_config_from_path(config_path: &Path) -> Option<ArchmapConfig> {
    if !config_path.is_file() {
        return None;
    }

    match load_config_from_path(config_path) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.archmap.toml`
pub fn discover_config(start: &Path) -> ArchmapConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            ArchmapConfig::default()
        })
}

/// Load configuration starting from the current directory
pub fn load_config() -> ArchmapConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(&dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            ArchmapConfig::default()
        }
    }
}
