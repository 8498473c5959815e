//! Configuration loaded from `.archmap.toml`.
//!
//! Every field has a serde default, so a partial file (or none at all)
//! yields a complete configuration.

mod complexity;
mod core;
mod corpus;
mod loader;
mod parallel;
mod scoring;

pub use self::core::ArchmapConfig;
pub use complexity::{ComplexityConfig, TypeWeights};
pub use corpus::CorpusConfig;
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
pub use parallel::ParallelConfig;
pub use scoring::{CategoryWeights, ScoringConfig};
