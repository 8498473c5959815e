//! End-to-end tests of the `archmap` binary.

mod common;

use archmap::AnalysisOutput;
use assert_cmd::Command;
use common::write_tree;
use std::fs;
use tempfile::TempDir;

fn archmap() -> Command {
    Command::cargo_bin("archmap").unwrap()
}

fn sample_repo(root: &std::path::Path) {
    write_tree(
        root,
        &[
            (
                "package.json",
                r#"{"name":"demo","dependencies":{"react":"18.2.0","express":"4.18.0"}}"#,
            ),
            (
                "src/components/Button.tsx",
                "import React from 'react';\nexport function Button(props){ if (props.disabled) return null; return <button/> }\n",
            ),
            (
                "src/pages/index.tsx",
                "import { Button } from 'src/components/Button';\nexport default function Home() { return <Button/>; }\n",
            ),
            (
                "src/api/users/route.ts",
                "export async function GET(req) { return Response.json([]); }\n",
            ),
            ("README.md", "# Demo\n\nA small demo repository.\n"),
            ("node_modules/react/index.js", "module.exports = {};\n"),
        ],
    );
}

#[test]
fn test_analyze_json_to_stdout() {
    let temp = TempDir::new().unwrap();
    sample_repo(temp.path());

    let assert = archmap()
        .args(["analyze", "--format", "json"])
        .arg(temp.path())
        .assert()
        .success();

    let output: AnalysisOutput = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let graph = &output.graph;
    assert!(graph.node_by_path("src/components/Button.tsx").is_some());
    assert!(graph.node("external_react").is_some());
    assert!(graph.nodes.iter().all(|n| !n.path.starts_with("node_modules")));
    assert!(graph.dangling_edges().is_empty());
    assert_eq!(output.breakdown.len(), 9);
}

#[test]
fn test_analyze_writes_markdown_file() {
    let temp = TempDir::new().unwrap();
    let repo = temp.path().join("repo");
    sample_repo(&repo);
    let report = temp.path().join("reports/architecture.md");

    archmap()
        .args(["analyze", "--format", "markdown", "--no-parallel", "--output"])
        .arg(&report)
        .arg(&repo)
        .assert()
        .success();

    let text = fs::read_to_string(report).unwrap();
    assert!(text.starts_with("# Architecture Report"));
    assert!(text.contains("## Quality Score"));
}

#[test]
fn test_analyze_snapshot_json_with_activity() {
    let temp = TempDir::new().unwrap();
    let snapshot = temp.path().join("snapshot.json");
    let activity = temp.path().join("activity.json");
    fs::write(
        &snapshot,
        r#"{"files":[{"path":"src/lib/db.ts","name":"db.ts","type":"file","size":40,"content":"export const query = (sql) => sql;"}]}"#,
    )
    .unwrap();
    fs::write(
        &activity,
        r#"{"pullRequests":[{"number":1,"title":"Add database query helper","body":"Adds a small helper used by the API routes.","additions":20,"deletions":2,"comments":1}]}"#,
    )
    .unwrap();

    let assert = archmap()
        .args(["analyze", "--format", "json", "--activity"])
        .arg(&activity)
        .arg(&snapshot)
        .assert()
        .success();

    let output: AnalysisOutput = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(output.graph.nodes.len(), 1);
    assert_eq!(output.quality.pr_quality, 100.0);
}

#[test]
fn test_analyze_missing_path_fails() {
    let temp = TempDir::new().unwrap();
    archmap()
        .arg("analyze")
        .arg(temp.path().join("does-not-exist.json"))
        .assert()
        .failure();
}

#[test]
fn test_analyze_rejects_missing_rules_file() {
    let temp = TempDir::new().unwrap();
    sample_repo(temp.path());
    archmap()
        .args(["analyze", "--rules", "no-such-rules.toml"])
        .arg(temp.path())
        .assert()
        .failure();
}

#[test]
fn test_init_creates_config_and_refuses_overwrite() {
    let temp = TempDir::new().unwrap();

    archmap()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success();
    let config = temp.path().join(".archmap.toml");
    assert!(fs::read_to_string(&config).unwrap().contains("[scoring]"));

    archmap()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .failure();

    archmap()
        .args(["init", "--force"])
        .current_dir(temp.path())
        .assert()
        .success();
}

#[test]
fn test_rules_prints_embedded_table() {
    let assert = archmap().arg("rules").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let rules = archmap::RuleSet::from_toml_str(&stdout).unwrap();
    assert_eq!(
        rules.type_rules.len(),
        archmap::RuleSet::default().type_rules.len()
    );
}
