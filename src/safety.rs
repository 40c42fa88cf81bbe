use std::result;

use ahash::AHashSet;
use serde::Serialize;
use thiserror::Error;

use crate::{adjacency::EdgeIndex, store::VertexStore, vertex::Vertex};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SafetyReport {
    pub total_vertices: usize,
    pub total_edges: usize,
    /// Adjacency keys or entries naming a vertex that is not stored.
    pub dangling_edges: usize,
    /// Entries present in one direction without their mirror.
    pub asymmetric_edges: usize,
    /// Repeated identities inside a single adjacency list.
    pub duplicate_edges: usize,
    /// Store records whose key differs from the vertex's own identity.
    pub misindexed_vertices: usize,
    /// Edges in the sequence table that are missing from the lists, or the
    /// other way round.
    pub unsequenced_edges: usize,
}

impl SafetyReport {
    pub fn merge(&mut self, other: &SafetyReport) {
        self.total_vertices = self.total_vertices.max(other.total_vertices);
        self.total_edges = self.total_edges.max(other.total_edges);
        self.dangling_edges += other.dangling_edges;
        self.asymmetric_edges += other.asymmetric_edges;
        self.duplicate_edges += other.duplicate_edges;
        self.misindexed_vertices += other.misindexed_vertices;
        self.unsequenced_edges += other.unsequenced_edges;
    }

    pub fn has_issues(&self) -> bool {
        self.dangling_edges > 0
            || self.asymmetric_edges > 0
            || self.duplicate_edges > 0
            || self.misindexed_vertices > 0
            || self.unsequenced_edges > 0
    }
}

#[derive(Debug, Error)]
#[error("structural violations detected: {report:?}")]
pub struct SafetyError {
    pub report: SafetyReport,
}

pub fn validate_vertex_index<V: Vertex>(
    store: &VertexStore<V>,
    edges: &EdgeIndex<V::Id>,
) -> SafetyReport {
    let mut report = base_report(store, edges);
    report.misindexed_vertices = store
        .entries()
        .filter(|(key, vertex)| *key != vertex.id())
        .count();
    report
}

pub fn validate_referential_integrity<V: Vertex>(
    store: &VertexStore<V>,
    edges: &EdgeIndex<V::Id>,
) -> SafetyReport {
    let mut report = base_report(store, edges);
    for (key, list) in edges.outgoing_lists().chain(edges.incoming_lists()) {
        if !store.contains(key) {
            report.dangling_edges += 1;
        }
        report.dangling_edges += list.iter().filter(|id| !store.contains(id)).count();
    }
    report
}

pub fn validate_mirrored_adjacency<V: Vertex>(
    store: &VertexStore<V>,
    edges: &EdgeIndex<V::Id>,
) -> SafetyReport {
    let mut report = base_report(store, edges);
    let outgoing: AHashSet<(&V::Id, &V::Id)> = edges
        .outgoing_lists()
        .flat_map(|(source, targets)| targets.iter().map(move |target| (source, target)))
        .collect();
    let incoming: AHashSet<(&V::Id, &V::Id)> = edges
        .incoming_lists()
        .flat_map(|(target, sources)| sources.iter().map(move |source| (source, target)))
        .collect();
    let sequenced: AHashSet<(&V::Id, &V::Id)> =
        edges.sequenced_edges().map(|(a, b)| (a, b)).collect();

    report.asymmetric_edges = outgoing.symmetric_difference(&incoming).count();
    report.unsequenced_edges = outgoing.symmetric_difference(&sequenced).count();
    report
}

pub fn validate_no_duplicate_edges<V: Vertex>(
    store: &VertexStore<V>,
    edges: &EdgeIndex<V::Id>,
) -> SafetyReport {
    let mut report = base_report(store, edges);
    let mut seen: AHashSet<&V::Id> = AHashSet::new();
    for (_, list) in edges.outgoing_lists().chain(edges.incoming_lists()) {
        seen.clear();
        for id in list {
            if !seen.insert(id) {
                report.duplicate_edges += 1;
            }
        }
    }
    report
}

pub fn run_safety_checks<V: Vertex>(
    store: &VertexStore<V>,
    edges: &EdgeIndex<V::Id>,
) -> SafetyReport {
    let mut report = SafetyReport::default();
    report.merge(&validate_vertex_index(store, edges));
    report.merge(&validate_referential_integrity(store, edges));
    report.merge(&validate_mirrored_adjacency(store, edges));
    report.merge(&validate_no_duplicate_edges(store, edges));
    report
}

pub fn run_strict_safety_checks<V: Vertex>(
    store: &VertexStore<V>,
    edges: &EdgeIndex<V::Id>,
) -> result::Result<(), SafetyError> {
    let report = run_safety_checks(store, edges);
    if report.has_issues() {
        Err(SafetyError { report })
    } else {
        Ok(())
    }
}

fn base_report<V: Vertex>(store: &VertexStore<V>, edges: &EdgeIndex<V::Id>) -> SafetyReport {
    SafetyReport {
        total_vertices: store.size(),
        total_edges: edges.edge_count(),
        ..SafetyReport::default()
    }
}
