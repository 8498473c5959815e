//! Copy-paste detection by hashing fixed-size windows of normalized lines.
//!
//! Lines are trimmed and blank or comment-only lines dropped before
//! windowing, so reformatting and comment edits do not hide duplicates.

use super::{clamp_score, ratio, ScoringContext, MAX_SCORE, NEUTRAL_SCORE};
use crate::core::SubFactor;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};

type Fingerprint = [u8; 32];

pub fn analyze(ctx: &ScoringContext<'_>) -> Vec<SubFactor> {
    if !ctx.has_code() {
        return vec![
            SubFactor::new("duplicateBlocks", NEUTRAL_SCORE),
            SubFactor::new("duplicateLines", NEUTRAL_SCORE),
            SubFactor::new("duplicateFiles", NEUTRAL_SCORE),
        ];
    }

    let normalized: Vec<Vec<&str>> = ctx
        .code_files
        .iter()
        .map(|f| normalized_lines(f.content))
        .collect();
    let report = DuplicationReport::compute(&normalized, ctx.config.duplication_chunk_lines);

    vec![
        SubFactor::new(
            "duplicateBlocks",
            clamp_score(MAX_SCORE * (1.0 - 2.0 * report.block_ratio())),
        ),
        SubFactor::new(
            "duplicateLines",
            clamp_score(MAX_SCORE * (1.0 - report.line_ratio())),
        ),
        SubFactor::new(
            "duplicateFiles",
            clamp_score(MAX_SCORE * (1.0 - report.file_ratio())),
        ),
    ]
}

pub fn is_comment_line(line: &str) -> bool {
    line.starts_with("//")
        || line.starts_with("/*")
        || line.starts_with('*')
        || line.starts_with("*/")
        || line.starts_with('#')
}

/// Trimmed, non-blank, non-comment lines
pub fn normalized_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !is_comment_line(l))
        .collect()
}

fn fingerprint(lines: &[&str]) -> Fingerprint {
    let mut hasher = Sha256::new();
    for line in lines {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&hasher.finalize());
    digest
}

#[derive(Debug, Default, PartialEq)]
pub struct DuplicationReport {
    pub total_windows: usize,
    pub duplicate_windows: usize,
    pub total_lines: usize,
    pub duplicate_lines: usize,
    pub total_files: usize,
    pub duplicate_files: usize,
}

impl DuplicationReport {
    /// Windows are `chunk` consecutive normalized lines, stepping one line at a time.
    /// A window is duplicated when its hash occurs more than once anywhere in the corpus.
    pub fn compute(files: &[Vec<&str>], chunk: usize) -> Self {
        let chunk = chunk.max(1);
        let mut window_counts: HashMap<Fingerprint, usize> = HashMap::new();
        for lines in files {
            for window in lines.windows(chunk) {
                *window_counts.entry(fingerprint(window)).or_insert(0) += 1;
            }
        }

        let mut report = DuplicationReport::default();
        for lines in files {
            report.total_lines += lines.len();
            let mut covered: HashSet<usize> = HashSet::new();
            for (start, window) in lines.windows(chunk).enumerate() {
                report.total_windows += 1;
                if window_counts.get(&fingerprint(window)).copied().unwrap_or(0) > 1 {
                    report.duplicate_windows += 1;
                    covered.extend(start..start + chunk);
                }
            }
            report.duplicate_lines += covered.len();
        }

        let mut file_counts: HashMap<Fingerprint, usize> = HashMap::new();
        let non_empty: Vec<&Vec<&str>> = files.iter().filter(|l| !l.is_empty()).collect();
        for lines in &non_empty {
            *file_counts.entry(fingerprint(lines)).or_insert(0) += 1;
        }
        report.total_files = non_empty.len();
        report.duplicate_files = non_empty
            .iter()
            .filter(|lines| file_counts.get(&fingerprint(lines)).copied().unwrap_or(0) > 1)
            .count();

        report
    }

    pub fn block_ratio(&self) -> f64 {
        ratio(self.duplicate_windows, self.total_windows)
    }

    pub fn line_ratio(&self) -> f64 {
        ratio(self.duplicate_lines, self.total_lines)
    }

    pub fn file_ratio(&self) -> f64 {
        ratio(self.duplicate_files, self.total_files)
    }
}
