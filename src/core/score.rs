//! Quality score types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The nine independently scored quality categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QualityCategory {
    CodeQuality,
    NamingConventions,
    PrQuality,
    Maintainability,
    CodeDuplication,
    Documentation,
    Testing,
    Security,
    Performance,
}

impl QualityCategory {
    pub const ALL: [QualityCategory; 9] = [
        QualityCategory::CodeQuality,
        QualityCategory::NamingConventions,
        QualityCategory::PrQuality,
        QualityCategory::Maintainability,
        QualityCategory::CodeDuplication,
        QualityCategory::Documentation,
        QualityCategory::Testing,
        QualityCategory::Security,
        QualityCategory::Performance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityCategory::CodeQuality => "codeQuality",
            QualityCategory::NamingConventions => "namingConventions",
            QualityCategory::PrQuality => "prQuality",
            QualityCategory::Maintainability => "maintainability",
            QualityCategory::CodeDuplication => "codeDuplication",
            QualityCategory::Documentation => "documentation",
            QualityCategory::Testing => "testing",
            QualityCategory::Security => "security",
            QualityCategory::Performance => "performance",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            QualityCategory::CodeQuality => "Code Quality",
            QualityCategory::NamingConventions => "Naming Conventions",
            QualityCategory::PrQuality => "PR Quality",
            QualityCategory::Maintainability => "Maintainability",
            QualityCategory::CodeDuplication => "Code Duplication",
            QualityCategory::Documentation => "Documentation",
            QualityCategory::Testing => "Testing",
            QualityCategory::Security => "Security",
            QualityCategory::Performance => "Performance",
        }
    }
}

impl fmt::Display for QualityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall score plus the nine category scores, each in [0, 100]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityScore {
    pub overall: f64,
    pub code_quality: f64,
    pub naming_conventions: f64,
    pub pr_quality: f64,
    pub maintainability: f64,
    pub code_duplication: f64,
    pub documentation: f64,
    pub testing: f64,
    pub security: f64,
    pub performance: f64,
}

impl QualityScore {
    pub fn category(&self, category: QualityCategory) -> f64 {
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

    pub fn set_category(&mut self, category: QualityCategory, score: f64) {
        let slot = match category {
            QualityCategory::CodeQuality => &mut self.code_quality,
            QualityCategory::NamingConventions => &mut self.naming_conventions,
            QualityCategory::PrQuality => &mut self.pr_quality,
            QualityCategory::Maintainability => &mut self.maintainability,
            QualityCategory::CodeDuplication => &mut self.code_duplication,
            QualityCategory::Documentation => &mut self.documentation,
            QualityCategory::Testing => &mut self.testing,
            QualityCategory::Security => &mut self.security,
            QualityCategory::Performance => &mut self.performance,
        };
        *slot = score;
    }
}

/// One named signal feeding a category score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubFactor {
    pub name: String,
    pub score: f64,
}

impl SubFactor {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: QualityCategory,
    pub score: f64,
    pub factors: Vec<SubFactor>,
}

impl CategoryBreakdown {
    pub fn factor(&self, name: &str) -> Option<f64> {
        self.factors.iter().find(|f| f.name == name).map(|f| f.score)
    }
}

/// Score plus the per-category sub-factor detail that produced it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub score: QualityScore,
    pub breakdown: Vec<CategoryBreakdown>,
}

impl QualityReport {
    pub fn breakdown_for(&self, category: QualityCategory) -> Option<&CategoryBreakdown> {
        self.breakdown.iter().find(|b| b.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_category_round_trip_all() {
        let mut score = QualityScore::default();
        for (i, category) in QualityCategory::ALL.iter().enumerate() {
            score.set_category(*category, i as f64);
        }
        for (i, category) in QualityCategory::ALL.iter().enumerate() {
            assert_eq!(score.category(*category), i as f64);
        }
    }

    #[test]
    fn test_score_serializes_contract_names() {
        let json = serde_json::to_value(QualityScore::default()).unwrap();
        for category in QualityCategory::ALL {
            assert!(json.get(category.as_str()).is_some(), "{}", category);
        }
        assert!(json.get("overall").is_some());
    }
}
