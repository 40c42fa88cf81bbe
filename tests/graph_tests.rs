use std::time::{Duration, Instant};

use casgraph::{
    CasGraphError, Graph, GraphConfig, Vertex,
    bench_utils::{HistoryShape, generate_history},
};

#[derive(Clone, Debug, PartialEq)]
struct Step {
    id: &'static str,
    revision: u32,
}

impl Vertex for Step {
    type Id = &'static str;

    fn id(&self) -> &&'static str {
        &self.id
    }
}

fn step(id: &'static str) -> Step {
    Step { id, revision: 0 }
}

fn prepared_graph() -> Graph<Step> {
    let mut graph = Graph::new();
    for id in ["a", "b", "c"] {
        graph.add_vertex(step(id)).expect("vertex");
    }
    graph.add_edge(&"a", &"b").expect("edge");
    graph.add_edge(&"a", &"c").expect("edge");
    graph.add_edge(&"b", &"c").expect("edge");
    graph
}

fn vertex_ids(graph: &Graph<Step>) -> Vec<&'static str> {
    graph.vertices().map(|v| v.id).collect()
}

#[test]
fn test_empty_graph() {
    let graph: Graph<Step> = Graph::new();
    assert_eq!(graph.size(), 0);
    assert!(graph.is_empty());
    assert_eq!(graph.vertices().count(), 0);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_vertices_in_insertion_order() {
    let mut graph = Graph::new();
    let a = step("a");
    let b = step("b");
    graph.add_vertex(a.clone()).unwrap();
    graph.add_vertex(b.clone()).unwrap();
    assert_eq!(graph.size(), 2);
    assert_eq!(graph.vertices().collect::<Vec<_>>(), vec![&a, &b]);
}

#[test]
fn test_incoming_and_outgoing_vertices() {
    let graph = prepared_graph();
    assert_eq!(graph.size(), 3);
    assert_eq!(graph.outgoing_vertices_of(&"a"), vec!["b", "c"]);
    assert_eq!(graph.outgoing_vertices_of(&"b"), vec!["c"]);
    assert!(graph.outgoing_vertices_of(&"c").is_empty());
    assert!(graph.incoming_vertices_of(&"a").is_empty());
    assert_eq!(graph.incoming_vertices_of(&"b"), vec!["a"]);
    assert_eq!(graph.incoming_vertices_of(&"c"), vec!["a", "b"]);
}

#[test]
fn test_remove_vertex_purges_edges() {
    let mut graph = prepared_graph();

    let removed = graph.remove_vertex(&"b").expect("removed");
    assert_eq!(removed.id, "b");
    assert_eq!(graph.size(), 2);
    assert_eq!(graph.outgoing_vertices_of(&"a"), vec!["c"]);
    assert!(graph.outgoing_vertices_of(&"b").is_empty());
    assert!(graph.outgoing_vertices_of(&"c").is_empty());
    assert!(graph.incoming_vertices_of(&"a").is_empty());
    assert!(graph.incoming_vertices_of(&"b").is_empty());
    assert_eq!(graph.incoming_vertices_of(&"c"), vec!["a"]);

    graph.remove_vertex(&"a").expect("removed");
    assert_eq!(graph.size(), 1);
    for id in ["a", "b", "c"] {
        assert!(graph.outgoing_vertices_of(&id).is_empty());
        assert!(graph.incoming_vertices_of(&id).is_empty());
    }
    assert_eq!(graph.edge_count(), 0);
    assert!(matches!(graph.vertex(&"a"), Err(CasGraphError::NotFound(_))));
}

#[test]
fn test_remove_absent_vertex_is_noop() {
    let mut graph = prepared_graph();
    assert!(graph.remove_vertex(&"zz").is_none());
    assert_eq!(graph.size(), 3);
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn test_remove_preserves_order_of_remaining_vertices() {
    let mut graph = Graph::new();
    for id in ["a", "b", "c", "d"] {
        graph.add_vertex(step(id)).unwrap();
    }
    graph.remove_vertex(&"b");
    assert_eq!(vertex_ids(&graph), vec!["a", "c", "d"]);
}

#[test]
fn test_replace_with_different_id_keeps_edges() {
    let mut graph = prepared_graph();

    let original = graph.replace_vertex(&"b", step("d")).expect("replace");
    assert_eq!(original.id, "b");

    assert_eq!(graph.outgoing_vertices_of(&"a"), vec!["d", "c"]);
    assert_eq!(graph.outgoing_vertices_of(&"d"), vec!["c"]);
    assert!(graph.outgoing_vertices_of(&"c").is_empty());
    assert!(graph.incoming_vertices_of(&"a").is_empty());
    assert_eq!(graph.incoming_vertices_of(&"d"), vec!["a"]);
    assert_eq!(graph.incoming_vertices_of(&"c"), vec!["a", "d"]);
    assert!(graph.outgoing_vertices_of(&"b").is_empty());
    assert!(graph.incoming_vertices_of(&"b").is_empty());
    assert!(!graph.contains_vertex(&"b"));
}

#[test]
fn test_replace_takes_original_position() {
    let mut graph = prepared_graph();
    graph.replace_vertex(&"b", step("d")).unwrap();
    assert_eq!(vertex_ids(&graph), vec!["a", "d", "c"]);
    assert_eq!(graph.size(), 3);
}

#[test]
fn test_replace_with_same_id_swaps_payload_only() {
    let mut graph = prepared_graph();
    let before_out: Vec<_> = ["a", "b", "c"]
        .iter()
        .map(|id| graph.outgoing_vertices_of(id))
        .collect();
    let before_in: Vec<_> = ["a", "b", "c"]
        .iter()
        .map(|id| graph.incoming_vertices_of(id))
        .collect();
    let before_edges = graph.edges();

    let b2 = Step {
        id: "b",
        revision: 2,
    };
    let original = graph.replace_vertex(&"b", b2.clone()).expect("replace");
    assert_eq!(original.revision, 0);
    assert_eq!(graph.vertex(&"b").unwrap(), &b2);

    let after_out: Vec<_> = ["a", "b", "c"]
        .iter()
        .map(|id| graph.outgoing_vertices_of(id))
        .collect();
    let after_in: Vec<_> = ["a", "b", "c"]
        .iter()
        .map(|id| graph.incoming_vertices_of(id))
        .collect();
    assert_eq!(before_out, after_out);
    assert_eq!(before_in, after_in);
    assert_eq!(before_edges, graph.edges());
    assert_eq!(graph.outgoing_vertices_of(&"a"), vec!["b", "c"]);
    assert_eq!(graph.incoming_vertices_of(&"c"), vec!["a", "b"]);
    assert_eq!(vertex_ids(&graph), vec!["a", "b", "c"]);
}

#[test]
fn test_replace_missing_vertex_fails_without_change() {
    let mut graph = prepared_graph();
    let err = graph.replace_vertex(&"x", step("y")).unwrap_err();
    assert!(matches!(err, CasGraphError::NotFound(_)));
    assert!(!graph.contains_vertex(&"y"));
    assert_eq!(graph.size(), 3);
}

#[test]
fn test_replace_onto_existing_id_is_rejected() {
    let mut graph = prepared_graph();
    let err = graph.replace_vertex(&"b", step("c")).unwrap_err();
    assert!(matches!(err, CasGraphError::DuplicateVertex(_)));
    assert_eq!(graph.outgoing_vertices_of(&"a"), vec!["b", "c"]);
    assert_eq!(graph.incoming_vertices_of(&"c"), vec!["a", "b"]);
    assert_eq!(vertex_ids(&graph), vec!["a", "b", "c"]);
}

#[test]
fn test_replace_then_remove_purges_renamed_edges() {
    let mut graph = prepared_graph();
    graph.replace_vertex(&"b", step("d")).unwrap();
    graph.remove_vertex(&"d");
    assert_eq!(graph.outgoing_vertices_of(&"a"), vec!["c"]);
    assert_eq!(graph.incoming_vertices_of(&"c"), vec!["a"]);
    assert_eq!(graph.edges(), vec![("a", "c")]);
}

#[test]
fn test_add_edge_is_idempotent() {
    let mut graph = prepared_graph();
    assert!(!graph.add_edge(&"a", &"b").expect("edge"));
    assert_eq!(graph.outgoing_vertices_of(&"a"), vec!["b", "c"]);
    assert_eq!(graph.incoming_vertices_of(&"b"), vec!["a"]);
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn test_add_edge_requires_both_endpoints() {
    let mut graph = prepared_graph();
    let err = graph.add_edge(&"a", &"missing").unwrap_err();
    assert!(matches!(err, CasGraphError::NotFound(_)));
    let err = graph.add_edge(&"missing", &"a").unwrap_err();
    assert!(matches!(err, CasGraphError::NotFound(_)));
    assert_eq!(graph.outgoing_vertices_of(&"a"), vec!["b", "c"]);
    assert!(graph.incoming_vertices_of(&"missing").is_empty());
}

#[test]
fn test_self_loop_rejected() {
    let mut graph = prepared_graph();
    let err = graph.add_edge(&"a", &"a").unwrap_err();
    assert!(matches!(err, CasGraphError::InvalidInput(_)));
}

#[test]
fn test_duplicate_vertex_rejected() {
    let mut graph = prepared_graph();
    let err = graph
        .add_vertex(Step {
            id: "a",
            revision: 9,
        })
        .unwrap_err();
    assert!(matches!(err, CasGraphError::DuplicateVertex(_)));
    assert_eq!(graph.size(), 3);
    assert_eq!(graph.vertex(&"a").unwrap().revision, 0);
}

#[test]
fn test_unknown_vertex_queries_are_empty() {
    let mut graph = prepared_graph();
    assert!(graph.outgoing_vertices_of(&"nope").is_empty());
    assert!(graph.incoming_vertices_of(&"nope").is_empty());
    graph.remove_vertex(&"c");
    assert!(graph.outgoing_vertices_of(&"c").is_empty());
    assert!(graph.incoming_vertices_of(&"c").is_empty());
}

#[test]
fn test_remove_edge_updates_both_sides() {
    let mut graph = prepared_graph();
    assert!(graph.remove_edge(&"a", &"c"));
    assert!(!graph.remove_edge(&"a", &"c"));
    assert_eq!(graph.outgoing_vertices_of(&"a"), vec!["b"]);
    assert_eq!(graph.incoming_vertices_of(&"c"), vec!["b"]);
    assert!(!graph.contains_edge(&"a", &"c"));
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn test_query_results_are_detached_copies() {
    let mut graph = prepared_graph();
    let outgoing = graph.outgoing_vertices_of(&"a");
    graph.replace_vertex(&"b", step("d")).unwrap();
    graph.remove_vertex(&"c");
    assert_eq!(outgoing, vec!["b", "c"]);
}

#[test]
fn test_edges_listed_in_insertion_order() {
    let mut graph = prepared_graph();
    graph.add_vertex(step("d")).unwrap();
    graph.add_edge(&"d", &"a").unwrap();
    assert_eq!(
        graph.edges(),
        vec![("a", "b"), ("a", "c"), ("b", "c"), ("d", "a")]
    );
}

#[test]
fn test_adjacency_mirrors_on_generated_history() {
    let dataset = generate_history(HistoryShape::Random { edges: 120 }, 40, 0x5EED);
    let mut graph = dataset.build().expect("graph");

    for idx in (0..40).step_by(7) {
        let id = format!("v{idx}");
        graph
            .replace_vertex(&id, casgraph::GeomVertex::geometry(format!("r{idx}")))
            .expect("replace");
    }
    for idx in (3..40).step_by(11) {
        graph.remove_vertex(&format!("v{idx}"));
    }

    let ids: Vec<String> = graph.vertices().map(|v| v.id.clone()).collect();
    for x in &ids {
        for y in &ids {
            let forward = graph.outgoing_vertices_of(x).contains(y);
            let backward = graph.incoming_vertices_of(y).contains(x);
            assert_eq!(forward, backward, "mirror broken for {x} -> {y}");
        }
    }
    assert!(!graph.safety_report().has_issues());
}

#[test]
fn test_config_capacity_and_checks() {
    let config = GraphConfig::new()
        .with_vertex_capacity(16)
        .with_invariant_checks(true);
    let mut graph: Graph<Step> = Graph::with_config(config.clone());
    graph.add_vertex(step("a")).unwrap();
    assert_eq!(graph.config(), &config);
    assert_eq!(graph.size(), 1);
}

#[test]
fn test_checked_fan_history_builds_in_bounded_time() {
    let dataset = generate_history(HistoryShape::Fan, 2_000, 0xFA4);
    let config = GraphConfig::new().with_invariant_checks(true);
    let mut graph = Graph::with_config(config);

    let started = Instant::now();
    dataset.load_into(&mut graph).expect("fan");
    let elapsed = started.elapsed();

    assert_eq!(graph.outgoing_vertices_of(&"v0".to_string()).len(), 1_999);
    assert!(
        elapsed < Duration::from_secs(20),
        "checked fan build took {elapsed:?}"
    );
}
