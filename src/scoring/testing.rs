//! Testing: test file share, framework presence, assertions and CI.

use super::{clamp_score, ratio, ScoringContext, MAX_SCORE, NEUTRAL_SCORE};
use crate::core::{file_name_of, SubFactor};
use once_cell::sync::Lazy;
use regex::Regex;

/// One test file per two source files earns the full score
const TARGET_TEST_RATIO: f64 = 0.5;

const TEST_FRAMEWORK_PACKAGES: &[&str] = &[
    "jest",
    "vitest",
    "mocha",
    "jasmine",
    "ava",
    "tap",
    "cypress",
    "@playwright/test",
    "@testing-library/react",
    "pytest",
    "nose2",
];

const TEST_CONFIG_PREFIXES: &[&str] = &[
    "jest.config.",
    "vitest.config.",
    "karma.conf.",
    "cypress.config.",
    "playwright.config.",
    ".mocharc",
    "pytest.ini",
    "conftest.py",
    "tox.ini",
];

static TEST_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)\b(?:it|test)\s*\(|^\s*(?:async\s+)?def\s+test_\w*").unwrap());

static ASSERTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bexpect\s*\(|\bassert(?:\w*)?\b|\.should\b").unwrap());

pub fn analyze(ctx: &ScoringContext<'_>) -> Vec<SubFactor> {
    vec![
        SubFactor::new("testFileRatio", test_file_ratio(ctx)),
        SubFactor::new("testFramework", test_framework(ctx)),
        SubFactor::new("assertionDensity", assertion_density(ctx)),
        SubFactor::new("continuousIntegration", continuous_integration(ctx)),
    ]
}

fn test_file_ratio(ctx: &ScoringContext<'_>) -> f64 {
    let tests = ctx.code_files.iter().filter(|f| f.is_test()).count();
    let sources = ctx.code_files.len() - tests;
    if sources == 0 {
        return if tests > 0 { MAX_SCORE } else { NEUTRAL_SCORE };
    }
    clamp_score(ratio(tests, sources) / TARGET_TEST_RATIO * MAX_SCORE)
}

fn test_framework(ctx: &ScoringContext<'_>) -> f64 {
    let declared = ctx
        .dependency_names()
        .iter()
        .any(|name| TEST_FRAMEWORK_PACKAGES.contains(name));
    let configured = ctx.paths().any(|p| {
        let name = file_name_of(p).to_ascii_lowercase();
        TEST_CONFIG_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
    });
    if declared || configured {
        MAX_SCORE
    } else {
        0.0
    }
}

/// At least one assertion per test case earns the full score
fn assertion_density(ctx: &ScoringContext<'_>) -> f64 {
    let tests: Vec<_> = ctx.code_files.iter().filter(|f| f.is_test()).collect();
    if tests.is_empty() {
        return 0.0;
    }
    let cases: usize = tests.iter().map(|f| TEST_CASE.find_iter(f.content).count()).sum();
    let assertions: usize = tests.iter().map(|f| ASSERTION.find_iter(f.content).count()).sum();
    clamp_score(ratio(assertions, cases.max(1)) * MAX_SCORE)
}

pub fn is_ci_config(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    (lower.starts_with(".github/workflows/") && (lower.ends_with(".yml") || lower.ends_with(".yaml")))
        || matches!(
            lower.as_str(),
            ".gitlab-ci.yml"
                | ".travis.yml"
                | ".circleci/config.yml"
                | "jenkinsfile"
                | "azure-pipelines.yml"
                | "bitbucket-pipelines.yml"
        )
}

fn continuous_integration(ctx: &ScoringContext<'_>) -> f64 {
    if ctx.paths().any(is_ci_config) {
        MAX_SCORE
    } else {
        0.0
    }
}
