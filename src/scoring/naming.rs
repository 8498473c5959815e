//! Naming conventions for files, identifiers and UI components.

use super::{share_score, ScoringContext, NEUTRAL_SCORE};
use crate::core::SubFactor;
use once_cell::sync::Lazy;
use regex::Regex;

static KEBAB_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());
static SNAKE_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:_[a-z0-9]+)*$").unwrap());
static CAMEL_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-zA-Z0-9]*$").unwrap());
static PASCAL_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").unwrap());
static SCREAMING_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9]*(?:_[A-Z0-9]+)*$").unwrap());

static DECLARED_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:const|let|var|function|class|def)\s+([A-Za-z_$][A-Za-z0-9_$]*)").unwrap()
});

/// Short names accepted as descriptive enough
const CONVENTIONAL_SHORT_NAMES: &[&str] = &[
    "i", "j", "k", "x", "y", "z", "id", "db", "fs", "io", "ok", "el", "fn", "cb", "e", "_", "$",
];

/// Lowercase file names some frameworks require for routes and entry points
const FRAMEWORK_FILE_NAMES: &[&str] = &[
    "index", "page", "layout", "route", "loading", "error", "not-found", "template", "default",
    "_app", "_document", "middleware",
];

const COMPONENT_EXTENSIONS: &[&str] = &["tsx", "jsx", "vue", "svelte"];

pub fn analyze(ctx: &ScoringContext<'_>) -> Vec<SubFactor> {
    let identifiers = declared_identifiers(ctx);
    vec![
        SubFactor::new("fileNaming", file_naming(ctx)),
        SubFactor::new("identifierStyle", identifier_style(&identifiers)),
        SubFactor::new("descriptiveNames", descriptive_names(&identifiers)),
        SubFactor::new("componentNaming", component_naming(ctx)),
    ]
}

/// Whether a file stem follows one consistent convention.
///
/// Dynamic route segments (`[slug]`) and dunder modules (`__init__`) are
/// accepted as-is.
pub fn is_conventional_file_stem(stem: &str) -> bool {
    if stem.starts_with('[') && stem.ends_with(']') {
        return true;
    }
    let core = stem.trim_matches('_');
    if core.is_empty() {
        return false;
    }
    KEBAB_CASE.is_match(core)
        || SNAKE_CASE.is_match(core)
        || CAMEL_CASE.is_match(core)
        || PASCAL_CASE.is_match(core)
}

pub fn is_conventional_identifier(name: &str) -> bool {
    let core = name.trim_start_matches(['_', '$']);
    if core.is_empty() {
        return true;
    }
    CAMEL_CASE.is_match(core)
        || PASCAL_CASE.is_match(core)
        || SCREAMING_CASE.is_match(core)
        || SNAKE_CASE.is_match(core)
}

fn is_descriptive(name: &str) -> bool {
    name.chars().count() >= 3 || CONVENTIONAL_SHORT_NAMES.contains(&name)
}

fn declared_identifiers<'a>(ctx: &ScoringContext<'a>) -> Vec<&'a str> {
    ctx.code_files
        .iter()
        .flat_map(|f| {
            DECLARED_IDENTIFIER
                .captures_iter(f.content)
                .filter_map(|c| c.get(1).map(|m| m.as_str()))
        })
        .collect()
}

fn file_naming(ctx: &ScoringContext<'_>) -> f64 {
    let conforming = ctx
        .code_files
        .iter()
        .filter(|f| is_conventional_file_stem(f.stem()))
        .count();
    share_score(conforming, ctx.code_files.len(), NEUTRAL_SCORE)
}

fn identifier_style(identifiers: &[&str]) -> f64 {
    let conforming = identifiers
        .iter()
        .filter(|name| is_conventional_identifier(name))
        .count();
    share_score(conforming, identifiers.len(), NEUTRAL_SCORE)
}

fn descriptive_names(identifiers: &[&str]) -> f64 {
    let descriptive = identifiers.iter().filter(|name| is_descriptive(name)).count();
    share_score(descriptive, identifiers.len(), NEUTRAL_SCORE)
}

/// UI component files should be PascalCase unless a framework fixes the name.
fn component_naming(ctx: &ScoringContext<'_>) -> f64 {
    let components: Vec<_> = ctx
        .code_files
        .iter()
        .filter(|f| COMPONENT_EXTENSIONS.contains(&f.extension.as_str()) && !f.is_test())
        .collect();
    let conforming = components
        .iter()
        .filter(|f| {
            let stem = f.stem();
            PASCAL_CASE.is_match(stem)
                || FRAMEWORK_FILE_NAMES.contains(&stem)
                || (stem.starts_with('[') && stem.ends_with(']'))
        })
        .count();
    share_score(conforming, components.len(), NEUTRAL_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::core::{RepositorySnapshot, SourceFile};

    fn factor(files: Vec<SourceFile>, name: &str) -> f64 {
        let snapshot = RepositorySnapshot::new(files);
        let config = ScoringConfig::default();
        analyze(&ScoringContext::new(&snapshot, &config))
            .into_iter()
            .find(|f| f.name == name)
            .map(|f| f.score)
            .unwrap()
    }

    #[test]
    fn test_file_stems() {
        assert!(is_conventional_file_stem("user-profile"));
        assert!(is_conventional_file_stem("user_profile"));
        assert!(is_conventional_file_stem("userProfile"));
        assert!(is_conventional_file_stem("UserProfile"));
        assert!(is_conventional_file_stem("__init__"));
        assert!(is_conventional_file_stem("[slug]"));
        assert!(!is_conventional_file_stem("User_profile-Page"));
        assert!(!is_conventional_file_stem("user profile"));
    }

    #[test]
    fn test_identifiers() {
        assert!(is_conventional_identifier("fetchUser"));
        assert!(is_conventional_identifier("UserService"));
        assert!(is_conventional_identifier("MAX_RETRIES"));
        assert!(is_conventional_identifier("load_config"));
        assert!(is_conventional_identifier("_private"));
        assert!(!is_conventional_identifier("fetch_User"));
        assert!(!is_conventional_identifier("Max_retries"));
    }

    #[test]
    fn test_descriptive_names_factor() {
        let score = factor(
            vec![SourceFile::new(
                "a.ts",
                "const a = 1;\nconst total = 2;\nlet i = 0;\nfunction q() {}\n",
            )],
            "descriptiveNames",
        );
        assert_eq!(score, 50.0);
    }

    #[test]
    fn test_component_naming_factor() {
        let score = factor(
            vec![
                SourceFile::new("src/components/Button.tsx", "export const Button = () => null;"),
                SourceFile::new("src/components/card.tsx", "export const Card = () => null;"),
                SourceFile::new("app/page.tsx", "export default function Page() {}"),
                SourceFile::new("src/util.ts", "export const x = 1;"),
            ],
            "componentNaming",
        );
        assert!((score - 66.666).abs() < 0.01);
    }
}
