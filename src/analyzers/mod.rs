//! Component and import extraction.
//!
//! [`ComponentExtractor`] dispatches on the classifier's language name. Files
//! that fail to parse, and languages without an extractor, produce an empty
//! [`FileExtraction`]; extraction never fails a batch.

pub mod python;
pub mod typescript;

use crate::core::{extension_of, FileExtraction};
use once_cell::sync::Lazy;
use regex::Regex;

pub use python::PythonExtractor;
pub use typescript::TypeScriptExtractor;

static HOOK_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^use[A-Z]").unwrap());

/// `useThing`, but not `user` or `use`
pub fn is_hook_name(name: &str) -> bool {
    HOOK_NAME.is_match(name)
}

/// Per-language extraction. `None` means the content did not parse.
pub trait LanguageExtractor: Send + Sync {
    fn extract(&self, content: &str, file_path: &str, extension: Option<&str>) -> Option<FileExtraction>;
}

/// Languages with an extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    TypeScript,
    JavaScript,
    Python,
}

impl SourceLanguage {
    /// Parse a language name as produced by the classifier
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "typescript" | "ts" | "tsx" => Some(SourceLanguage::TypeScript),
            "javascript" | "js" | "jsx" => Some(SourceLanguage::JavaScript),
            "python" | "py" => Some(SourceLanguage::Python),
            _ => None,
        }
    }
}

/// Extracts code components and imports from one file's content
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentExtractor;

impl ComponentExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract without a path; TypeScript tries the TSX grammar, then TS
    pub fn extract(&self, content: &str, language: &str) -> FileExtraction {
        self.extract_for_path("", content, language)
    }

    /// Extract with the grammar chosen from the path's extension
    pub fn extract_for_path(&self, path: &str, content: &str, language: &str) -> FileExtraction {
        let Some(source_language) = SourceLanguage::from_name(language) else {
            return FileExtraction::empty();
        };
        if content.trim().is_empty() {
            return FileExtraction::empty();
        }

        let extension = extension_of(path).map(str::to_ascii_lowercase);
        let extracted = match source_language {
            SourceLanguage::TypeScript => {
                TypeScriptExtractor::typescript().extract(content, path, extension.as_deref())
            }
            SourceLanguage::JavaScript => {
                TypeScriptExtractor::javascript().extract(content, path, extension.as_deref())
            }
            SourceLanguage::Python => PythonExtractor::new().extract(content, path, extension.as_deref()),
        };

        extracted.unwrap_or_else(|| {
            log::debug!("Parse failed for {} ({}); no components extracted", path, language);
            FileExtraction::empty()
        })
    }
}
