//! Maintainability: file length, nesting, dependency load and modularity.

use super::{clamp_score, ScoringContext, MAX_SCORE, NEUTRAL_SCORE};
use crate::complexity::max_brace_depth;
use crate::core::SubFactor;
use std::collections::BTreeSet;

const COMFORTABLE_AVERAGE_LINES: f64 = 200.0;
const COMFORTABLE_NESTING: f64 = 4.0;
const COMFORTABLE_DEPENDENCIES: usize = 30;
const COMFORTABLE_FILES_PER_DIRECTORY: f64 = 10.0;

pub fn analyze(ctx: &ScoringContext<'_>) -> Vec<SubFactor> {
    vec![
        SubFactor::new("averageFileSize", average_file_size(ctx)),
        SubFactor::new("nestingDepth", nesting_depth(ctx)),
        SubFactor::new("dependencyCount", dependency_count(ctx)),
        SubFactor::new("modularity", modularity(ctx)),
    ]
}

fn average_file_size(ctx: &ScoringContext<'_>) -> f64 {
    if !ctx.has_code() {
        return NEUTRAL_SCORE;
    }
    let average = ctx.total_lines() as f64 / ctx.code_files.len() as f64;
    clamp_score(MAX_SCORE - (average - COMFORTABLE_AVERAGE_LINES).max(0.0) / 8.0)
}

fn nesting_depth(ctx: &ScoringContext<'_>) -> f64 {
    if !ctx.has_code() {
        return NEUTRAL_SCORE;
    }
    let total: u32 = ctx
        .code_files
        .iter()
        .map(|f| max_brace_depth(f.content))
        .sum();
    let average = total as f64 / ctx.code_files.len() as f64;
    clamp_score(MAX_SCORE - (average - COMFORTABLE_NESTING).max(0.0) * 15.0)
}

fn dependency_count(ctx: &ScoringContext<'_>) -> f64 {
    if !ctx.has_dependency_info() {
        return NEUTRAL_SCORE;
    }
    let count = ctx.dependency_names().len();
    let excess = count.saturating_sub(COMFORTABLE_DEPENDENCIES);
    clamp_score(MAX_SCORE - excess as f64 * 2.0)
}

/// Rewards code spread across directories over one flat folder
fn modularity(ctx: &ScoringContext<'_>) -> f64 {
    if !ctx.has_code() {
        return NEUTRAL_SCORE;
    }
    let directories: BTreeSet<&str> = ctx
        .code_files
        .iter()
        .map(|f| f.path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or(""))
        .collect();
    let per_directory = ctx.code_files.len() as f64 / directories.len().max(1) as f64;
    clamp_score(MAX_SCORE - (per_directory - COMFORTABLE_FILES_PER_DIRECTORY).max(0.0) * 5.0)
}
