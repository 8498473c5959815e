//! Scoring configuration for the quality score
//!
//! - Category weights feeding the overall score
//! - Duplication and large-file thresholds used by individual analyzers

use crate::core::QualityCategory;
use serde::{Deserialize, Serialize};

/// Weights of each category in the overall score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    #[serde(default = "default_code_quality_weight")]
    pub code_quality: f64,

    #[serde(default = "default_naming_weight")]
    pub naming_conventions: f64,

    #[serde(default = "default_pr_quality_weight")]
    pub pr_quality: f64,

    #[serde(default = "default_maintainability_weight")]
    pub maintainability: f64,

    #[serde(default = "default_duplication_weight")]
    pub code_duplication: f64,

    #[serde(default = "default_documentation_weight")]
    pub documentation: f64,

    #[serde(default = "default_testing_weight")]
    pub testing: f64,

    #[serde(default = "default_security_weight")]
    pub security: f64,

    /// Computed but not weighted by default
    #[serde(default = "default_performance_weight")]
    pub performance: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            code_quality: default_code_quality_weight(),
            naming_conventions: default_naming_weight(),
            pr_quality: default_pr_quality_weight(),
            maintainability: default_maintainability_weight(),
            code_duplication: default_duplication_weight(),
            documentation: default_documentation_weight(),
            testing: default_testing_weight(),
            security: default_security_weight(),
            performance: default_performance_weight(),
        }
    }
}

impl CategoryWeights {
    // Pure function: Check if a weight is in valid range
    pub fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    // Pure function: Validate a single weight with name
    pub fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!("{} weight must be between 0.0 and 1.0", name))
        }
    }

    pub fn weight(&self, category: QualityCategory) -> f64 {
        match category {
            QualityCategory::CodeQuality => self.code_quality,
            QualityCategory::NamingConventions => self.naming_conventions,
            QualityCategory::PrQuality => self.pr_quality,
            QualityCategory::Maintainability => self.maintainability,
            QualityCategory::CodeDuplication => self.code_duplication,
            QualityCategory::Documentation => self.documentation,
            QualityCategory::Testing => self.testing,
            QualityCategory::Security => self.security,
            QualityCategory::Performance => self.performance,
        }
    }

    fn weight_mut(&mut self, category: QualityCategory) -> &mut f64 {
        match category {
            QualityCategory::CodeQuality => &mut self.code_quality,
            QualityCategory::NamingConventions => &mut self.naming_conventions,
            QualityCategory::PrQuality => &mut self.pr_quality,
            QualityCategory::Maintainability => &mut self.maintainability,
            QualityCategory::CodeDuplication => &mut self.code_duplication,
            QualityCategory::Documentation => &mut self.documentation,
            QualityCategory::Testing => &mut self.testing,
            QualityCategory::Security => &mut self.security,
            QualityCategory::Performance => &mut self.performance,
        }
    }

    pub fn sum(&self) -> f64 {
        QualityCategory::ALL.iter().map(|c| self.weight(*c)).sum()
    }

    /// Validate that weights sum to 1.0 (with small tolerance for floating point)
    pub fn validate(&self) -> Result<(), String> {
        for category in QualityCategory::ALL {
            Self::validate_weight(self.weight(category), category.display_name())?;
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > 0.001 {
            return Err(format!(
                "Category weights must sum to 1.0, but sum to {:.3}",
                sum
            ));
        }

        Ok(())
    }

    /// Normalize weights to ensure they sum to 1.0
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum > 0.0 && (sum - 1.0).abs() > f64::EPSILON {
            for category in QualityCategory::ALL {
                *self.weight_mut(category) /= sum;
            }
        }
    }
}

/// Analyzer thresholds and category weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Lines per block hashed by the duplication analyzer
    #[serde(default = "default_duplication_chunk_lines")]
    pub duplication_chunk_lines: usize,

    /// Line count above which a file counts as large
    #[serde(default = "default_large_file_lines")]
    pub large_file_lines: usize,

    #[serde(default)]
    pub weights: CategoryWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            duplication_chunk_lines: default_duplication_chunk_lines(),
            large_file_lines: default_large_file_lines(),
            weights: CategoryWeights::default(),
        }
    }
}

pub fn default_code_quality_weight() -> f64 {
    0.20
}

pub fn default_naming_weight() -> f64 {
    0.10
}

pub fn default_pr_quality_weight() -> f64 {
    0.15
}

pub fn default_maintainability_weight() -> f64 {
    0.20
}

pub fn default_duplication_weight() -> f64 {
    0.10
}

pub fn default_documentation_weight() -> f64 {
    0.10
}

pub fn default_testing_weight() -> f64 {
    0.10
}

pub fn default_security_weight() -> f64 {
    0.05
}

pub fn default_performance_weight() -> f64 {
    0.0
}

pub fn default_duplication_chunk_lines() -> usize {
    6
}

pub fn default_large_file_lines() -> usize {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_are_valid() {
        let weights = CategoryWeights::default();
        assert!(weights.validate().is_ok());
        assert!((weights.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_performance_weight_is_zero() {
        assert_eq!(CategoryWeights::default().performance, 0.0);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let weights = CategoryWeights {
            security: 1.5,
            ..Default::default()
        };
        let err = weights.validate().unwrap_err();
        assert!(err.contains("Security"));
    }

    #[test]
    fn test_validate_rejects_bad_sum() {
        let weights = CategoryWeights {
            code_quality: 0.5,
            ..Default::default()
        };
        assert!(weights.validate().unwrap_err().contains("sum to 1.0"));
    }

    #[test]
    fn test_normalize_rescales_to_one() {
        let mut weights = CategoryWeights {
            code_quality: 0.4,
            maintainability: 0.4,
            ..Default::default()
        };
        weights.normalize();
        assert!((weights.sum() - 1.0).abs() < 1e-9);
        assert!(weights.code_quality > weights.documentation);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ScoringConfig = toml::from_str(
            r#"
            large_file_lines = 500

            [weights]
            performance = 0.1
            "#,
        )
        .unwrap();
        assert_eq!(config.large_file_lines, 500);
        assert_eq!(config.duplication_chunk_lines, 6);
        assert_eq!(config.weights.performance, 0.1);
        assert_eq!(config.weights.code_quality, 0.20);
    }
}
