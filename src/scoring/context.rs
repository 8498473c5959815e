//! Read-only view of a snapshot shared by the category analyzers.

use crate::config::ScoringConfig;
use crate::core::{file_name_of, PackageJson, PullRequestInfo, RepositorySnapshot, SourceFile};

/// Extensions treated as source code by the analyzers
pub const CODE_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs", "py", "vue", "svelte",
];

const JS_FAMILY: &[&str] = &["js", "jsx", "mjs", "cjs"];
const TS_FAMILY: &[&str] = &["ts", "tsx", "mts", "cts"];

/// A source file with text content
#[derive(Debug, Clone)]
pub struct CodeFile<'a> {
    pub path: &'a str,
    pub name: &'a str,
    pub extension: String,
    pub content: &'a str,
    pub line_count: usize,
}

impl<'a> CodeFile<'a> {
    fn from_source(file: &'a SourceFile) -> Option<Self> {
        let extension = file.extension()?;
        if !CODE_EXTENSIONS.contains(&extension.as_str()) {
            return None;
        }
        let content = file.content.as_deref()?;
        Some(Self {
            path: &file.path,
            name: file_name_of(&file.path),
            extension,
            content,
            line_count: content.lines().count(),
        })
    }

    /// File name up to the first dot
    pub fn stem(&self) -> &'a str {
        self.name.split('.').next().unwrap_or(self.name)
    }

    pub fn is_typescript(&self) -> bool {
        TS_FAMILY.contains(&self.extension.as_str())
    }

    pub fn is_javascript(&self) -> bool {
        JS_FAMILY.contains(&self.extension.as_str())
    }

    pub fn is_python(&self) -> bool {
        self.extension == "py"
    }

    pub fn is_test(&self) -> bool {
        is_test_path(self.path)
    }
}

/// Test files by directory (`__tests__`, `test`, `tests`, `spec`) or by name
pub fn is_test_path(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    let name = file_name_of(&lower);
    let in_test_dir = lower
        .split('/')
        .rev()
        .skip(1)
        .any(|segment| matches!(segment, "__tests__" | "test" | "tests" | "spec"));

    in_test_dir
        || name.contains(".test.")
        || name.contains(".spec.")
        || (name.ends_with(".py") && (name.starts_with("test_") || name.ends_with("_test.py")))
}

pub struct ScoringContext<'a> {
    pub snapshot: &'a RepositorySnapshot,
    pub config: &'a ScoringConfig,
    pub code_files: Vec<CodeFile<'a>>,
}

impl<'a> ScoringContext<'a> {
    pub fn new(snapshot: &'a RepositorySnapshot, config: &'a ScoringConfig) -> Self {
        let code_files = snapshot
            .source_files()
            .filter_map(CodeFile::from_source)
            .collect();
        Self {
            snapshot,
            config,
            code_files,
        }
    }

    pub fn has_code(&self) -> bool {
        !self.code_files.is_empty()
    }

    pub fn total_lines(&self) -> usize {
        self.code_files.iter().map(|f| f.line_count).sum()
    }

    /// Every non-directory path in the snapshot
    pub fn paths(&self) -> impl Iterator<Item = &'a str> {
        self.snapshot.source_files().map(|f| f.path.as_str())
    }

    pub fn has_path(&self, predicate: impl Fn(&str) -> bool) -> bool {
        self.paths().any(|p| predicate(&p.to_ascii_lowercase()))
    }

    pub fn package_json(&self) -> Option<&'a PackageJson> {
        self.snapshot.package_json.as_ref()
    }

    /// Declared dependency names from the manifest, or from activity metadata without one
    pub fn dependency_names(&self) -> Vec<&'a str> {
        if let Some(pkg) = self.package_json() {
            return pkg.all_dependency_names().collect();
        }
        self.snapshot
            .activity
            .as_ref()
            .map(|a| a.dependencies.iter().map(|d| d.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Runtime dependencies only
    pub fn runtime_dependency_names(&self) -> Vec<&'a str> {
        if let Some(pkg) = self.package_json() {
            return pkg.dependencies.keys().map(String::as_str).collect();
        }
        self.snapshot
            .activity
            .as_ref()
            .map(|a| {
                a.dependencies
                    .iter()
                    .filter(|d| !d.dev)
                    .map(|d| d.name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_dependency_info(&self) -> bool {
        self.package_json().is_some()
            || self
                .snapshot
                .activity
                .as_ref()
                .is_some_and(|a| !a.dependencies.is_empty())
    }

    pub fn pull_requests(&self) -> &'a [PullRequestInfo] {
        self.snapshot
            .activity
            .as_ref()
            .map(|a| a.pull_requests.as_slice())
            .unwrap_or(&[])
    }
}
