//! Input corpus types and per-file extraction results.
//!
//! These are the shapes supplied by the repository-content fetcher and the
//! activity aggregator. Field names serialize in camelCase to match the JSON
//! those collaborators produce.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether a corpus entry is a file or a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    File,
    Dir,
}

/// One entry of the repository snapshot.
///
/// `content` is absent for binary files or files over the fetcher's size cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    pub path: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
    #[serde(default)]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

impl SourceFile {
    /// Create a file entry with content; `name` is derived from the last path segment.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let content = content.into();
        Self {
            name: file_name_of(&path).to_string(),
            size: content.len() as u64,
            path,
            kind: EntryKind::File,
            content: Some(content),
            sha: None,
        }
    }

    /// Create a file entry whose content was not materialized.
    pub fn without_content(path: impl Into<String>, size: u64) -> Self {
        let path = path.into();
        Self {
            name: file_name_of(&path).to_string(),
            path,
            kind: EntryKind::File,
            size,
            content: None,
            sha: None,
        }
    }

    /// Create a directory entry.
    pub fn directory(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: file_name_of(&path).to_string(),
            path,
            kind: EntryKind::Dir,
            size: 0,
            content: None,
            sha: None,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// Content as a string slice, empty when absent
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// Lowercased extension without the dot, if any
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.path).map(str::to_ascii_lowercase)
    }
}

/// Last `/`-separated segment of a path
pub fn file_name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Extension of the last path segment, without the dot
pub fn extension_of(path: &str) -> Option<&str> {
    let name = file_name_of(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&name[idx + 1..]),
    }
}

/// The dependency sections of a `package.json` manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub peer_dependencies: BTreeMap<String, String>,
}

impl PackageJson {
    /// All dependency names: `dependencies`, then `devDependencies`, then
    /// `peerDependencies`, each sorted by name regardless of manifest order
    pub fn all_dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .chain(self.peer_dependencies.keys())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitInfo {
    pub sha: String,
    pub message: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestInfo {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub merged: bool,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub changed_files: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub review_comments: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequestInfo {
    pub fn total_changes(&self) -> u64 {
        self.additions + self.deletions
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyInfo {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub dev: bool,
}

/// Commit, pull request and dependency summaries supplied by the activity aggregator.
///
/// Only the scoring engine reads this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityMetadata {
    #[serde(default)]
    pub commits: Vec<CommitInfo>,
    #[serde(default)]
    pub pull_requests: Vec<PullRequestInfo>,
    #[serde(default)]
    pub dependencies: Vec<DependencyInfo>,
}

/// A complete, already-materialized repository snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySnapshot {
    #[serde(default)]
    pub files: Vec<SourceFile>,
    #[serde(default)]
    pub package_json: Option<PackageJson>,
    #[serde(default)]
    pub activity: Option<ActivityMetadata>,
}

impl RepositorySnapshot {
    pub fn new(files: Vec<SourceFile>) -> Self {
        Self {
            files,
            package_json: None,
            activity: None,
        }
    }

    pub fn with_package_json(mut self, package_json: PackageJson) -> Self {
        self.package_json = Some(package_json);
        self
    }

    pub fn with_activity(mut self, activity: ActivityMetadata) -> Self {
        self.activity = Some(activity);
        self
    }

    /// Non-directory entries
    pub fn source_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter().filter(|f| !f.is_directory())
    }
}

/// Kind of construct found by the component extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// Declaration in a file that renders JSX
    Component,
    Function,
    Class,
    /// Name matches `^use[A-Z]`
    Hook,
    /// CommonJS export assignment (`module.exports = ...`)
    Util,
}

/// A named construct found in one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeComponent {
    pub name: String,
    pub kind: ComponentKind,
    pub file_path: String,
    /// 1-indexed, inclusive
    pub start_line: usize,
    /// 1-indexed, inclusive
    pub end_line: usize,
    pub complexity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exports: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CodeComponent {
    pub fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    Default,
    Named,
    Namespace,
    Dynamic,
}

/// An import as written in the source; never resolved at extraction time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportInfo {
    pub raw_source: String,
    pub kind: ImportKind,
    #[serde(default)]
    pub imported_names: Vec<String>,
    /// `export ... from "x"`
    #[serde(default)]
    pub reexport: bool,
}

impl ImportInfo {
    pub fn new(raw_source: impl Into<String>, kind: ImportKind) -> Self {
        Self {
            raw_source: raw_source.into(),
            kind,
            imported_names: Vec::new(),
            reexport: false,
        }
    }

    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.imported_names = names;
        self
    }

    /// `./x` or `../x`
    pub fn is_relative(&self) -> bool {
        self.raw_source.starts_with("./")
            || self.raw_source.starts_with("../")
            || self.raw_source == "."
            || self.raw_source == ".."
    }
}

/// Everything the extractor found in one file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileExtraction {
    pub components: Vec<CodeComponent>,
    pub imports: Vec<ImportInfo>,
}

impl FileExtraction {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.imports.is_empty()
    }
}
