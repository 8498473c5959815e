//! CLI module for archmap
//!
//! - Argument parsing (`args`)
//! - Runtime setup (`setup`)
//!
//! Command handlers live in [`crate::commands`].

pub mod args;
pub mod setup;

pub use args::{Cli, Commands, OutputFormat};
pub use setup::{configure_thread_pool, init_logging, log_level};

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    args::parse_args()
}
