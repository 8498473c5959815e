mod common;

use archmap::core::{ComponentKind, ComponentType, RepositorySnapshot, SourceFile};
use archmap::{ArchmapConfig, ComponentExtractor};
use common::{analyze, assert_no_dangling_edges, degrees, package_json, snapshot_of};
use indoc::indoc;
use pretty_assertions::assert_eq;

const BUTTON: &str =
    "export function Button(props){ if (props.disabled) return null; return <button/> }";

#[test]
fn test_button_component_extraction_and_node() {
    let extraction =
        ComponentExtractor::new().extract_for_path("src/components/Button.tsx", BUTTON, "TypeScript");
    assert_eq!(extraction.components.len(), 1);
    let button = &extraction.components[0];
    assert_eq!(button.name, "Button");
    assert_eq!(button.kind, ComponentKind::Component);
    assert_eq!(button.complexity, 2);

    let output = analyze(&snapshot_of(&[("src/components/Button.tsx", BUTTON)]));
    let node = output.graph.node_by_path("src/components/Button.tsx").unwrap();
    assert_eq!(node.component_type, ComponentType::Component);
    assert_eq!(node.layer.as_deref(), Some("components"));
}

#[test]
fn test_api_route_is_classified_as_api() {
    let output = analyze(&snapshot_of(&[(
        "src/api/users/route.ts",
        "export async function GET(req){ return Response.json([]); }",
    )]));
    let node = output.graph.node_by_path("src/api/users/route.ts").unwrap();
    assert_eq!(node.component_type, ComponentType::Api);
    assert_eq!(node.layer.as_deref(), Some("api"));
}

#[test]
fn test_package_dependency_becomes_one_external_node() {
    let snapshot = snapshot_of(&[(
        "src/App.tsx",
        "import React from 'react';\nexport default function App() { return <div/>; }\n",
    )])
    .with_package_json(package_json(&[("react", "18.2.0")]));
    let graph = analyze(&snapshot).graph;

    let externals: Vec<_> = graph.nodes.iter().filter(|n| n.is_external()).collect();
    assert_eq!(externals.len(), 1);
    assert_eq!(externals[0].id, "external_react");
    assert_eq!(externals[0].complexity, 0);
    assert_no_dangling_edges(&graph);
}

#[test]
fn test_empty_input_produces_empty_graph() {
    let graph = analyze(&RepositorySnapshot::default()).graph;
    assert!(graph.nodes.is_empty());
    assert!(graph.edges.is_empty());
    assert_eq!(graph.stats.total_nodes, 0);
    assert_eq!(graph.stats.total_edges, 0);
    assert_eq!(graph.stats.average_connections, 0.0);
    assert!(graph.stats.layers.is_empty());
    assert!(graph.stats.frameworks.is_empty());
    assert!(graph.stats.languages.is_empty());
}

#[test]
fn test_node_ids_are_deterministic() {
    let files = [
        ("src/pages/index.tsx", "export default function Home() { return <main/>; }"),
        ("src/lib/db.ts", "export const query = (sql: string) => sql;"),
    ];
    let first = analyze(&snapshot_of(&files)).graph;
    let second = analyze(&snapshot_of(&files)).graph;

    let ids = |g: &archmap::ArchitectureGraph| -> Vec<String> {
        g.nodes.iter().map(|n| n.id.clone()).collect()
    };
    assert_eq!(ids(&first), ids(&second));
}

#[test]
fn test_missing_content_still_yields_a_node() {
    let snapshot = RepositorySnapshot::new(vec![SourceFile::without_content(
        "assets/bundle.min.js",
        2_000_000,
    )]);
    let graph = analyze(&snapshot).graph;
    assert_eq!(graph.nodes.len(), 1);
    assert!(graph.edges.is_empty());
    assert!(graph.nodes[0].complexity <= 100);
}

#[test]
fn test_unparseable_file_does_not_abort_the_batch() {
    let output = analyze(&snapshot_of(&[
        ("src/broken.ts", "export function ((( {{{ <<<"),
        ("src/ok.ts", "export function ok() { return 1; }"),
    ]));
    assert!(output.graph.node_by_path("src/broken.ts").is_some());
    assert!(output.graph.node_by_path("src/ok.ts").is_some());
}

fn sample_repository() -> RepositorySnapshot {
    let hub = indoc! {"
        export function format(value) {
          if (value === null) { return ''; }
          if (typeof value === 'number') { return value.toFixed(2); }
          return String(value);
        }
    "};
    let mut files = vec![("src/utils/format.ts".to_string(), hub.to_string())];
    for i in 0..7 {
        files.push((
            format!("src/components/Widget{}.tsx", i),
            format!(
                "import {{ format }} from 'src/utils/format';\nexport function Widget{}(p) {{ return <span>{{format(p.v)}}</span>; }}\n",
                i
            ),
        ));
    }
    files.push((
        "src/lonely.py".to_string(),
        "def lonely():\n    return 1\n".to_string(),
    ));

    let borrowed: Vec<(&str, &str)> = files
        .iter()
        .map(|(p, c)| (p.as_str(), c.as_str()))
        .collect();
    snapshot_of(&borrowed).with_package_json(package_json(&[("react", "18.2.0")]))
}

#[test]
fn test_graph_insights_match_their_definitions() {
    let graph = analyze(&sample_repository()).graph;
    assert_no_dangling_edges(&graph);
    let degrees = degrees(&graph);

    let mut expected_isolated: Vec<String> = graph
        .nodes
        .iter()
        .filter(|n| degrees[&n.id] == 0)
        .map(|n| n.id.clone())
        .collect();
    let mut isolated = graph.insights.isolated.clone();
    expected_isolated.sort();
    isolated.sort();
    assert_eq!(isolated, expected_isolated);

    let mut high: Vec<_> = graph.nodes.iter().filter(|n| n.complexity > 50).collect();
    high.sort_by(|a, b| b.complexity.cmp(&a.complexity).then_with(|| a.id.cmp(&b.id)));
    let expected_high: Vec<String> = high.iter().take(5).map(|n| n.id.clone()).collect();
    assert_eq!(graph.insights.high_complexity, expected_high);

    for id in &graph.insights.critical {
        assert!(degrees[id] > 5);
    }
}

#[test]
fn test_hub_file_is_critical() {
    let graph = analyze(&sample_repository()).graph;
    let hub = graph.node_by_path("src/utils/format.ts").unwrap();
    assert!(graph.insights.critical.contains(&hub.id));
    assert!(graph
        .insights
        .patterns
        .contains(&"Component-Based Architecture".to_string()));
}

#[test]
fn test_stats_count_nodes_and_edges() {
    let graph = analyze(&sample_repository()).graph;
    assert_eq!(graph.stats.total_nodes, graph.nodes.len());
    assert_eq!(graph.stats.total_edges, graph.edges.len());
    for node in &graph.nodes {
        assert!(node.complexity <= 100);
    }
}

#[test]
fn test_sequential_config_matches_parallel() {
    let snapshot = sample_repository();
    let mut config = ArchmapConfig::default();
    config.parallel.enabled = false;
    assert_eq!(
        archmap::analyze_repository(&snapshot, &config),
        common::analyze(&snapshot)
    );
}
