//! Security: hardcoded secrets, dangerous APIs, string-built SQL and committed env files.

use super::{penalty_score, ScoringContext, MAX_SCORE};
use crate::core::{file_name_of, SubFactor};
use once_cell::sync::Lazy;
use regex::Regex;

static SECRET_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r#"(?i)(api[_-]?key|apikey)[\s]*[:=][\s]*['"][\w\-]{20,}['"]"#).unwrap(),
            "API key",
        ),
        (
            Regex::new(r#"(?i)(secret|password|passwd|pwd)[\s]*[:=][\s]*['"][^'"]{8,}['"]"#).unwrap(),
            "Password or secret",
        ),
        (
            Regex::new(r#"(?i)(token|bearer)[\s]*[:=][\s]*['"][\w\-\.]{20,}['"]"#).unwrap(),
            "Authentication token",
        ),
        (
            Regex::new(r#"(?i)aws[_-]?access[_-]?key[_-]?id[\s]*[:=][\s]*['"][A-Z0-9]{20}['"]"#).unwrap(),
            "AWS Access Key",
        ),
        (
            Regex::new(r#"(?i)aws[_-]?secret[_-]?access[_-]?key[\s]*[:=][\s]*['"][A-Za-z0-9/+=]{40}['"]"#).unwrap(),
            "AWS Secret Key",
        ),
        (
            Regex::new(r"sk[_-]live[_-][0-9a-zA-Z]{24,}").unwrap(),
            "Stripe API key",
        ),
        (
            Regex::new(r"-----BEGIN (?:RSA |EC |OPENSSH )?PRIVATE KEY-----").unwrap(),
            "Private key",
        ),
    ]
});

static DANGEROUS_APIS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\beval\s*\(",
        r"\bnew\s+Function\s*\(",
        r"dangerouslySetInnerHTML",
        r"\.(?:inner|outer)HTML\s*=",
        r"\bdocument\.write\s*\(",
        r"\bsetTimeout\s*\(\s*['`]",
        r"\bexecSync\s*\(",
        r"\bos\.system\s*\(",
        r"\bpickle\.loads?\s*\(",
        r"\bshell\s*=\s*True\b",
        r"\byaml\.load\s*\([^)]*\)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static SQL_INJECTION: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)`\s*(?:SELECT|INSERT|UPDATE|DELETE)\b[^`]*\$\{",
        r#"(?i)["']\s*(?:SELECT|INSERT|UPDATE|DELETE)\b[^"']*["']\s*\+"#,
        r#"(?i)\bf["']\s*(?:SELECT|INSERT|UPDATE|DELETE)\b[^"']*\{"#,
        r#"(?i)["']\s*(?:SELECT|INSERT|UPDATE|DELETE)\b[^"']*%s[^"']*["']\s*%"#,
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

const ENV_TEMPLATE_SUFFIXES: &[&str] = &["example", "sample", "template", "dist"];

pub fn analyze(ctx: &ScoringContext<'_>) -> Vec<SubFactor> {
    vec![
        SubFactor::new("hardcodedSecrets", penalty_score(count_secrets(ctx), 25.0)),
        SubFactor::new(
            "dangerousApis",
            penalty_score(count_matches(ctx, &DANGEROUS_APIS), 10.0),
        ),
        SubFactor::new(
            "sqlInjection",
            penalty_score(count_matches(ctx, &SQL_INJECTION), 20.0),
        ),
        SubFactor::new("envFiles", env_files(ctx)),
    ]
}

/// Secret kinds found in `content`, at most one report per line
pub fn find_secrets(content: &str) -> Vec<&'static str> {
    content
        .lines()
        .filter_map(|line| {
            SECRET_PATTERNS
                .iter()
                .find(|(pattern, _)| pattern.is_match(line))
                .map(|(_, kind)| *kind)
        })
        .collect()
}

fn count_secrets(ctx: &ScoringContext<'_>) -> usize {
    ctx.snapshot
        .source_files()
        .filter(|f| !is_env_file(&f.path))
        .map(|f| {
            let found = find_secrets(f.text());
            if !found.is_empty() {
                log::debug!("{}: possible hardcoded {}", f.path, found.join(", "));
            }
            found.len()
        })
        .sum()
}

fn count_matches(ctx: &ScoringContext<'_>, patterns: &[Regex]) -> usize {
    ctx.code_files
        .iter()
        .filter(|f| !f.is_test())
        .map(|f| {
            patterns
                .iter()
                .map(|re| re.find_iter(f.content).count())
                .sum::<usize>()
        })
        .sum()
}

/// `.env` or `.env.<stage>`, but not example templates
pub fn is_env_file(path: &str) -> bool {
    let name = file_name_of(path).to_ascii_lowercase();
    if name == ".env" {
        return true;
    }
    match name.strip_prefix(".env.") {
        Some(suffix) => !ENV_TEMPLATE_SUFFIXES.contains(&suffix),
        None => false,
    }
}

fn env_files(ctx: &ScoringContext<'_>) -> f64 {
    if ctx.paths().any(is_env_file) {
        0.0
    } else {
        MAX_SCORE
    }
}
