pub mod corpus;
pub mod output;

pub use corpus::{load_activity, load_snapshot, load_snapshot_json, walk_directory};
pub use output::{create_writer, JsonWriter, MarkdownWriter, OutputFormat, OutputWriter, TerminalWriter};

use crate::core::{Error, Result};
use std::fs;
use std::path::Path;

/// Write `content`, creating parent directories as needed
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| Error::file_system("Failed to create directory", parent, e))?;
    }
    fs::write(path, content).map_err(|e| Error::file_system("Failed to write file", path, e))
}
