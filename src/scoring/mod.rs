//! Repository quality scoring.
//!
//! Nine category analyzers each turn the snapshot into a handful of named
//! sub-factors in `[0, 100]`. A category score is the mean of its factors;
//! the overall score is the weighted mean of the categories in
//! [`QualityCategory::ALL`] order, so the result does not depend on which
//! analyzer finishes first.

pub mod code_quality;
pub mod context;
pub mod documentation;
pub mod duplication;
pub mod maintainability;
pub mod naming;
pub mod performance;
pub mod pr_quality;
pub mod security;
pub mod testing;

pub use context::{is_test_path, CodeFile, ScoringContext};

use crate::config::ScoringConfig;
use crate::core::{CategoryBreakdown, QualityCategory, QualityReport, QualityScore, SubFactor};
use crate::core::RepositorySnapshot;
use rayon::prelude::*;

/// Score used when a factor has nothing to measure
pub const NEUTRAL_SCORE: f64 = 50.0;

pub const MAX_SCORE: f64 = 100.0;

/// Clamp to `[0, 100]`; NaN becomes 0
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, MAX_SCORE)
    }
}

/// `numerator / denominator`, or 0 when the denominator is 0
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// 100 minus a fixed penalty per occurrence, floored at 0
pub fn penalty_score(count: usize, per_occurrence: f64) -> f64 {
    clamp_score(MAX_SCORE - count as f64 * per_occurrence)
}

/// Share of `matching` out of `total` as a score; `empty` when `total` is 0
pub fn share_score(matching: usize, total: usize, empty: f64) -> f64 {
    if total == 0 {
        empty
    } else {
        clamp_score(ratio(matching, total) * MAX_SCORE)
    }
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean of the factor scores, 0 when there are none
pub fn mean_score(factors: &[SubFactor]) -> f64 {
    if factors.is_empty() {
        return 0.0;
    }
    let total: f64 = factors.iter().map(|f| clamp_score(f.score)).sum();
    round1(clamp_score(total / factors.len() as f64))
}

fn analyze_category(category: QualityCategory, ctx: &ScoringContext<'_>) -> Vec<SubFactor> {
    match category {
        QualityCategory::CodeQuality => code_quality::analyze(ctx),
        QualityCategory::NamingConventions => naming::analyze(ctx),
        QualityCategory::PrQuality => pr_quality::analyze(ctx),
        QualityCategory::Maintainability => maintainability::analyze(ctx),
        QualityCategory::CodeDuplication => duplication::analyze(ctx),
        QualityCategory::Documentation => documentation::analyze(ctx),
        QualityCategory::Testing => testing::analyze(ctx),
        QualityCategory::Security => security::analyze(ctx),
        QualityCategory::Performance => performance::analyze(ctx),
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, snapshot: &RepositorySnapshot) -> QualityScore {
        self.analyze(snapshot).score
    }

    /// Run every category analyzer and combine the results.
    pub fn analyze(&self, snapshot: &RepositorySnapshot) -> QualityReport {
        let ctx = ScoringContext::new(snapshot, &self.config);
        log::debug!(
            "Scoring {} code files out of {} entries",
            ctx.code_files.len(),
            snapshot.files.len()
        );

        let breakdown: Vec<CategoryBreakdown> = QualityCategory::ALL
            .par_iter()
            .map(|&category| {
                let factors: Vec<SubFactor> = analyze_category(category, &ctx)
                    .into_iter()
                    .map(|f| SubFactor::new(f.name, round1(clamp_score(f.score))))
                    .collect();
                CategoryBreakdown {
                    category,
                    score: mean_score(&factors),
                    factors,
                }
            })
            .collect();

        let score = self.combine(&breakdown);
        QualityReport { score, breakdown }
    }

    /// Fold category scores into a [`QualityScore`] with the weighted overall.
    pub fn combine(&self, breakdown: &[CategoryBreakdown]) -> QualityScore {
        let mut score = QualityScore::default();
        let mut weighted = 0.0;
        let mut total_weight = 0.0;

        for category in QualityCategory::ALL {
            let category_score = breakdown
                .iter()
                .find(|b| b.category == category)
                .map(|b| b.score)
                .unwrap_or(0.0);
            score.set_category(category, category_score);

            let weight = self.config.weights.weight(category);
            weighted += weight * category_score;
            total_weight += weight;
        }

        score.overall = if total_weight > 0.0 {
            round1(clamp_score(weighted / total_weight))
        } else {
            0.0
        };
        score
    }
}
