//! CLI command implementations for archmap.
//!
//! - **analyze**: build the architecture graph and quality score
//! - **init**: write a default `.archmap.toml`
//! - **rules**: print the embedded classification rules

pub mod analyze;
pub mod init;
pub mod rules;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use init::init_config;
pub use rules::print_rules;
