use ahash::{AHashMap, AHashSet};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde_json::json;

use crate::{errors::CasGraphError, event::ListenerMode, geometry::GeomVertex, graph::Graph};

#[derive(Clone, Debug)]
pub struct HistoryDataset {
    pub vertices: Vec<GeomVertex>,
    pub edges: Vec<(String, String)>,
}

impl HistoryDataset {
    pub fn vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn edges(&self) -> usize {
        self.edges.len()
    }

    /// In- plus out-degree per vertex, indexed like `self.vertices`. Edges
    /// naming an id that is not in `self.vertices` are not counted.
    pub fn degrees(&self) -> Vec<usize> {
        let positions: AHashMap<&str, usize> = self
            .vertices
            .iter()
            .enumerate()
            .map(|(idx, vertex)| (vertex.id.as_str(), idx))
            .collect();
        let mut counts = vec![0usize; self.vertices.len()];
        for (from, to) in &self.edges {
            for end in [from, to] {
                if let Some(&idx) = positions.get(end.as_str()) {
                    counts[idx] += 1;
                }
            }
        }
        counts
    }

    /// Position of the highest-degree vertex; the first one wins ties.
    pub fn hub_index(&self) -> usize {
        let mut best = (0usize, 0usize);
        for (idx, deg) in self.degrees().into_iter().enumerate() {
            if deg > best.0 {
                best = (deg, idx);
            }
        }
        best.1
    }

    pub fn hub_id(&self) -> Option<&str> {
        self.vertices
            .get(self.hub_index())
            .map(|vertex| vertex.id.as_str())
    }

    pub fn build(&self) -> Result<Graph<GeomVertex>, CasGraphError> {
        let mut graph = Graph::new();
        self.load_into(&mut graph)?;
        Ok(graph)
    }

    pub fn load_into<M: ListenerMode<GeomVertex>>(
        &self,
        graph: &mut Graph<GeomVertex, M>,
    ) -> Result<(), CasGraphError> {
        for vertex in &self.vertices {
            graph.add_vertex(vertex.clone())?;
        }
        for (from, to) in &self.edges {
            graph.add_edge(from, to)?;
        }
        Ok(())
    }
}

/// Shape of a generated construction history. Every edge points from an
/// earlier step to a later one, the way construction dependencies do.
#[derive(Clone, Debug)]
pub enum HistoryShape {
    /// Each step depends on the one before it.
    Chain,
    /// A single workplane that every other step depends on.
    Fan,
    /// `edges` dependencies chosen uniformly among earlier steps.
    Random { edges: usize },
}

pub fn vertex_id(idx: usize) -> String {
    format!("v{idx}")
}

pub fn generate_history(shape: HistoryShape, vertex_count: usize, seed: u64) -> HistoryDataset {
    assert!(vertex_count > 1, "vertex_count must exceed 1");
    let vertices = build_vertices(vertex_count);
    let edges = match shape {
        HistoryShape::Chain => (0..vertex_count - 1)
            .map(|idx| new_edge(idx, idx + 1))
            .collect(),
        HistoryShape::Fan => (1..vertex_count).map(|leaf| new_edge(0, leaf)).collect(),
        HistoryShape::Random { edges } => generate_random_edges(vertex_count, edges, seed),
    };
    HistoryDataset { vertices, edges }
}

fn build_vertices(count: usize) -> Vec<GeomVertex> {
    (0..count)
        .map(|idx| GeomVertex::geometry(vertex_id(idx)).with_parameters(json!({ "idx": idx })))
        .collect()
}

fn generate_random_edges(vertex_count: usize, edge_count: usize, seed: u64) -> Vec<(String, String)> {
    let total_pairs = vertex_count * (vertex_count - 1) / 2;
    assert!(edge_count <= total_pairs, "edge_count exceeds possible pairs");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut seen = AHashSet::with_capacity(edge_count);
    let mut edges = Vec::with_capacity(edge_count);
    while edges.len() < edge_count {
        let to = rng.gen_range(1..vertex_count);
        let from = rng.gen_range(0..to);
        if seen.insert((from, to)) {
            edges.push(new_edge(from, to));
        }
    }
    edges
}

fn new_edge(from: usize, to: usize) -> (String, String) {
    (vertex_id(from), vertex_id(to))
}
