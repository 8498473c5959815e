//! Documentation: README, inline comments, doc comments and project docs.

use super::duplication::is_comment_line;
use super::{clamp_score, ratio, ScoringContext, MAX_SCORE, NEUTRAL_SCORE};
use crate::core::{file_name_of, SubFactor};
use once_cell::sync::Lazy;
use regex::Regex;

/// Comment share of all lines that earns the full score
const TARGET_COMMENT_RATIO: f64 = 0.15;
const README_PRESENT_SCORE: f64 = 60.0;
const README_FULL_LINES: f64 = 50.0;

static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?(?:function\*?|class|def)\s+\w+").unwrap()
});

static JS_DOC_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*\*").unwrap());

static PY_DOCSTRING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?ms)^\s*(?:""".*?"""|'''.*?''')"#).unwrap());

pub fn analyze(ctx: &ScoringContext<'_>) -> Vec<SubFactor> {
    vec![
        SubFactor::new("readme", readme(ctx)),
        SubFactor::new("commentRatio", comment_ratio(ctx)),
        SubFactor::new("docComments", doc_comments(ctx)),
        SubFactor::new("projectDocs", project_docs(ctx)),
    ]
}

fn is_readme(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower == "readme" || lower.starts_with("readme.")
}

fn readme(ctx: &ScoringContext<'_>) -> f64 {
    let Some(file) = ctx
        .snapshot
        .source_files()
        .find(|f| !f.path.contains('/') && is_readme(&f.path))
    else {
        return 0.0;
    };

    let lines = file.text().lines().filter(|l| !l.trim().is_empty()).count();
    let depth = (lines as f64 / README_FULL_LINES).min(1.0);
    clamp_score(README_PRESENT_SCORE + depth * (MAX_SCORE - README_PRESENT_SCORE))
}

fn comment_ratio(ctx: &ScoringContext<'_>) -> f64 {
    let total = ctx.total_lines();
    if total == 0 {
        return NEUTRAL_SCORE;
    }
    let comments: usize = ctx
        .code_files
        .iter()
        .map(|f| f.content.lines().filter(|l| is_comment_line(l.trim())).count())
        .sum();
    clamp_score(ratio(comments, total) / TARGET_COMMENT_RATIO * MAX_SCORE)
}

fn doc_comments(ctx: &ScoringContext<'_>) -> f64 {
    let declarations: usize = ctx
        .code_files
        .iter()
        .map(|f| DECLARATION.find_iter(f.content).count())
        .sum();
    if declarations == 0 {
        return NEUTRAL_SCORE;
    }
    let documented: usize = ctx
        .code_files
        .iter()
        .map(|f| {
            if f.is_python() {
                PY_DOCSTRING.find_iter(f.content).count()
            } else {
                JS_DOC_BLOCK.find_iter(f.content).count()
            }
        })
        .sum();
    clamp_score(ratio(documented.min(declarations), declarations) * MAX_SCORE)
}

/// 25 points each for a docs directory, CONTRIBUTING, CHANGELOG and LICENSE
fn project_docs(ctx: &ScoringContext<'_>) -> f64 {
    let has_docs_dir = ctx
        .snapshot
        .files
        .iter()
        .any(|f| {
            let lower = f.path.to_ascii_lowercase();
            lower == "docs" || lower.starts_with("docs/") || lower == "doc" || lower.starts_with("doc/")
        });
    let has_root_file = |prefix: &str| {
        ctx.paths().any(|p| {
            !p.contains('/') && file_name_of(p).to_ascii_lowercase().starts_with(prefix)
        })
    };

    let present = [
        has_docs_dir,
        has_root_file("contributing"),
        has_root_file("changelog"),
        has_root_file("license"),
    ]
    .iter()
    .filter(|p| **p)
    .count();
    present as f64 * 25.0
}
