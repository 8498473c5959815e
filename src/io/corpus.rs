//! Loading repository snapshots from disk.
//!
//! A snapshot is either a JSON document in the fetcher's format or a local
//! directory walked with gitignore rules applied.

use crate::config::CorpusConfig;
use crate::core::{ActivityMetadata, Error, PackageJson, RepositorySnapshot, Result, SourceFile};
use ignore::WalkBuilder;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Load a directory or a snapshot JSON file
pub fn load_snapshot(path: &Path, config: &CorpusConfig) -> Result<RepositorySnapshot> {
    if path.is_dir() {
        walk_directory(path, config)
    } else {
        load_snapshot_json(path)
    }
}

pub fn load_snapshot_json(path: &Path) -> Result<RepositorySnapshot> {
    let text = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read snapshot", path, e))?;
    let snapshot: RepositorySnapshot = serde_json::from_str(&text)?;
    log::debug!("Loaded {} entries from {}", snapshot.files.len(), path.display());
    Ok(snapshot)
}

pub fn load_activity(path: &Path) -> Result<ActivityMetadata> {
    let text = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read activity metadata", path, e))?;
    Ok(serde_json::from_str(&text)?)
}

fn compile_patterns(config: &CorpusConfig) -> Result<Vec<glob::Pattern>> {
    config
        .ignore_patterns
        .iter()
        .map(|p| glob::Pattern::new(p).map_err(Error::from))
        .collect()
}

/// Whether a relative path is excluded by the configured globs.
///
/// `**/dir/**` only matches entries below `dir`, so directories are tested
/// with a child path to prune them before descending.
fn is_ignored(patterns: &[glob::Pattern], relative: &str, is_dir: bool) -> bool {
    let candidate = if is_dir {
        format!("{}/_", relative)
    } else {
        relative.to_string()
    };
    patterns
        .iter()
        .any(|p| p.matches(relative) || p.matches(&candidate))
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

fn read_source_file(path: &Path, relative: String, config: &CorpusConfig) -> Result<SourceFile> {
    let size = fs::metadata(path)
        .map_err(|e| Error::file_system("Failed to stat file", path, e))?
        .len();
    if size > config.max_file_bytes {
        log::debug!("{} is {} bytes; skipping content", relative, size);
        return Ok(SourceFile::without_content(relative, size));
    }

    let bytes = fs::read(path).map_err(|e| Error::file_system("Failed to read file", path, e))?;
    let sha = sha256_hex(&bytes);
    let mut file = if bytes.contains(&0) {
        SourceFile::without_content(relative, size)
    } else {
        match String::from_utf8(bytes) {
            Ok(text) => SourceFile::new(relative, text),
            Err(_) => SourceFile::without_content(relative, size),
        }
    };
    file.sha = Some(sha);
    Ok(file)
}

/// Walk `root`, honoring `.gitignore` files and the configured ignore globs.
///
/// Text files up to `max_file_bytes` carry their content; larger or binary
/// files are listed without it. The walk stops after `max_files` files.
/// Entries that cannot be read (broken links, permission errors) are logged
/// and left out; only an unreadable `root` fails the walk.
pub fn walk_directory(root: &Path, config: &CorpusConfig) -> Result<RepositorySnapshot> {
    let patterns = compile_patterns(config)?;
    fs::read_dir(root)
        .map_err(|e| Error::Corpus(format!("Cannot walk {}: {}", root.display(), e)))?;
    let walk_root = root.to_path_buf();
    let prune_patterns = patterns.clone();

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .require_git(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            match relative_path(&walk_root, entry.path()) {
                Some(relative) => !is_ignored(&prune_patterns, &relative, is_dir),
                None => true,
            }
        })
        .build();

    let mut files = Vec::new();
    let mut file_count = 0;
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        let Some(relative) = relative_path(root, entry.path()) else {
            continue;
        };
        let is_dir = entry.file_type().is_some_and(|t| t.is_dir());

        if is_dir {
            files.push(SourceFile::directory(relative));
            continue;
        }
        if is_ignored(&patterns, &relative, false) {
            continue;
        }
        if file_count >= config.max_files {
            log::warn!(
                "Stopped after {} files; raise corpus.max_files to include more",
                config.max_files
            );
            break;
        }
        match read_source_file(entry.path(), relative, config) {
            Ok(file) => {
                files.push(file);
                file_count += 1;
            }
            Err(e) => log::warn!("Skipping {}: {}", entry.path().display(), e),
        }
    }

    let package_json = files
        .iter()
        .find(|f| f.path == "package.json")
        .and_then(|f| f.content.as_deref())
        .and_then(|text| match serde_json::from_str::<PackageJson>(text) {
            Ok(pkg) => Some(pkg),
            Err(e) => {
                log::warn!("Ignoring unparseable package.json: {}", e);
                None
            }
        });

    log::debug!("Walked {}: {} entries", root.display(), files.len());
    Ok(RepositorySnapshot {
        files,
        package_json,
        activity: None,
    })
}
