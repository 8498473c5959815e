//! Code quality: branching density, file size, smells and type safety.

use super::{clamp_score, penalty_score, share_score, ScoringContext, MAX_SCORE, NEUTRAL_SCORE};
use crate::complexity::count_branch_points;
use crate::core::SubFactor;
use once_cell::sync::Lazy;
use regex::Regex;

/// Branch points per 100 lines tolerated before the score drops
const BRANCH_DENSITY_ALLOWANCE: f64 = 10.0;
const BRANCH_DENSITY_PENALTY: f64 = 4.0;

static CODE_SMELLS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\bconsole\.(?:log|debug|trace)\s*\(",
        r"\bdebugger\s*;",
        r"\b(?:TODO|FIXME|HACK|XXX)\b",
        r"eslint-disable",
        r"@ts-ignore",
        r"catch\s*(?:\([^)]*\))?\s*\{\s*\}",
        r"(?m)^\s*except\s*:",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static ANY_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?::\s*any\b|\bas\s+any\b|<any>)").unwrap());

pub fn analyze(ctx: &ScoringContext<'_>) -> Vec<SubFactor> {
    vec![
        SubFactor::new("branchDensity", branch_density(ctx)),
        SubFactor::new("fileSize", file_size(ctx)),
        SubFactor::new("codeSmells", code_smells(ctx)),
        SubFactor::new("typeSafety", type_safety(ctx)),
    ]
}

fn branch_density(ctx: &ScoringContext<'_>) -> f64 {
    let lines = ctx.total_lines();
    if lines == 0 {
        return NEUTRAL_SCORE;
    }
    let branches: u32 = ctx
        .code_files
        .iter()
        .map(|f| count_branch_points(f.content) - 1)
        .sum();
    let density = branches as f64 * 100.0 / lines as f64;
    clamp_score(MAX_SCORE - (density - BRANCH_DENSITY_ALLOWANCE).max(0.0) * BRANCH_DENSITY_PENALTY)
}

fn file_size(ctx: &ScoringContext<'_>) -> f64 {
    let limit = ctx.config.large_file_lines;
    let within = ctx
        .code_files
        .iter()
        .filter(|f| f.line_count <= limit)
        .count();
    share_score(within, ctx.code_files.len(), NEUTRAL_SCORE)
}

pub fn count_smells(content: &str) -> usize {
    CODE_SMELLS.iter().map(|re| re.find_iter(content).count()).sum()
}

fn code_smells(ctx: &ScoringContext<'_>) -> f64 {
    if !ctx.has_code() {
        return NEUTRAL_SCORE;
    }
    let smells: usize = ctx.code_files.iter().map(|f| count_smells(f.content)).sum();
    let per_file = smells as f64 / ctx.code_files.len() as f64;
    clamp_score(MAX_SCORE - per_file * 10.0)
}

/// Share of JS-family files written in TypeScript, less a penalty for `any`.
fn type_safety(ctx: &ScoringContext<'_>) -> f64 {
    let typescript: Vec<_> = ctx.code_files.iter().filter(|f| f.is_typescript()).collect();
    let javascript = ctx.code_files.iter().filter(|f| f.is_javascript()).count();
    let total = typescript.len() + javascript;
    if total == 0 {
        return NEUTRAL_SCORE;
    }

    let coverage = share_score(typescript.len(), total, NEUTRAL_SCORE);
    let any_uses: usize = typescript
        .iter()
        .map(|f| ANY_TYPE.find_iter(f.content).count())
        .sum();
    let any_penalty = if typescript.is_empty() {
        0.0
    } else {
        (MAX_SCORE - penalty_score(any_uses, 5.0 / typescript.len() as f64)).min(30.0)
    };
    clamp_score(coverage - any_penalty)
}
