//! Performance hazards: blocking calls, nested loops, heavy packages, oversized files.

use super::{penalty_score, ScoringContext};
use crate::core::SubFactor;
use once_cell::sync::Lazy;
use regex::Regex;

const HEAVY_PACKAGES: &[&str] = &[
    "moment",
    "lodash",
    "jquery",
    "core-js",
    "aws-sdk",
    "@material-ui/core",
    "antd",
    "rxjs",
    "underscore",
];

static SYNC_OPERATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[a-z][A-Za-z]*Sync\s*\(|\btime\.sleep\s*\(|\brequests\.(?:get|post|put|delete)\s*\(").unwrap()
});

static LOOP_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:for|while)\b|\.(?:forEach|map|filter|reduce)\s*\(").unwrap());

pub fn analyze(ctx: &ScoringContext<'_>) -> Vec<SubFactor> {
    vec![
        SubFactor::new("syncOperations", sync_operations(ctx)),
        SubFactor::new("nestedLoops", nested_loops(ctx)),
        SubFactor::new("heavyDependencies", heavy_dependencies(ctx)),
        SubFactor::new("largeFiles", large_files(ctx)),
    ]
}

fn sync_operations(ctx: &ScoringContext<'_>) -> f64 {
    let count: usize = ctx
        .code_files
        .iter()
        .filter(|f| !f.is_test())
        .map(|f| SYNC_OPERATION.find_iter(f.content).count())
        .sum();
    penalty_score(count, 5.0)
}

fn indentation(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

/// Loops that start inside the indented body of another loop.
///
/// Works on indentation alone, so it covers brace languages and Python
/// alike as long as the code is conventionally formatted.
pub fn count_nested_loops(content: &str) -> usize {
    let mut open_loops: Vec<usize> = Vec::new();
    let mut nested = 0;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('}') {
            continue;
        }
        let indent = indentation(line);
        while open_loops.last().is_some_and(|&outer| outer >= indent) {
            open_loops.pop();
        }
        if LOOP_START.is_match(trimmed) {
            if !open_loops.is_empty() {
                nested += 1;
            }
            open_loops.push(indent);
        }
    }
    nested
}

fn nested_loops(ctx: &ScoringContext<'_>) -> f64 {
    let count: usize = ctx
        .code_files
        .iter()
        .map(|f| count_nested_loops(f.content))
        .sum();
    penalty_score(count, 5.0)
}

fn heavy_dependencies(ctx: &ScoringContext<'_>) -> f64 {
    let count = ctx
        .runtime_dependency_names()
        .iter()
        .filter(|name| HEAVY_PACKAGES.contains(name))
        .count();
    penalty_score(count, 20.0)
}

fn large_files(ctx: &ScoringContext<'_>) -> f64 {
    let limit = ctx.config.large_file_lines;
    let count = ctx
        .code_files
        .iter()
        .filter(|f| f.line_count > limit)
        .count();
    penalty_score(count, 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::core::{PackageJson, RepositorySnapshot, SourceFile};
    use indoc::indoc;

    #[test]
    fn test_count_nested_loops_braces() {
        let source = indoc! {"
            for (const a of xs) {
              for (const b of ys) {
                use(a, b);
              }
            }
            for (const c of zs) {
              use(c);
            }
        "};
        assert_eq!(count_nested_loops(source), 1);
    }

    #[test]
    fn test_count_nested_loops_python() {
        let source = indoc! {"
            for a in xs:
                while a:
                    for b in ys:
                        pass
            for c in zs:
                pass
        "};
        assert_eq!(count_nested_loops(source), 2);
    }

    #[test]
    fn test_iterator_callbacks_count_as_loops() {
        let source = indoc! {"
            items.forEach((item) => {
              item.children.map((child) => child.id);
            });
        "};
        assert_eq!(count_nested_loops(source), 1);
    }

    #[test]
    fn test_sync_and_heavy_dependencies() {
        let mut pkg = PackageJson::default();
        pkg.dependencies.insert("moment".into(), "2.0.0".into());
        pkg.dependencies.insert("react".into(), "18.0.0".into());
        pkg.dev_dependencies.insert("lodash".into(), "4.0.0".into());
        let snapshot = RepositorySnapshot::new(vec![SourceFile::new(
            "src/load.js",
            "const data = fs.readFileSync(path);\n",
        )])
        .with_package_json(pkg);
        let config = ScoringConfig::default();
        let scores: Vec<f64> = analyze(&ScoringContext::new(&snapshot, &config))
            .into_iter()
            .map(|f| f.score)
            .collect();
        assert_eq!(scores, vec![95.0, 100.0, 80.0, 100.0]);
    }
}
