//! Flat, serializable copy of a graph for replication layers.
//!
//! Vertices are listed in enumeration order and edges in the order they were
//! first recorded. Replaying that sequence through `add_vertex` and
//! `add_edge` reproduces the vertex order and both adjacency orders exactly.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::GraphConfig, errors::CasGraphError, event::ListenerMode, graph::Graph, vertex::Vertex,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot<V, I> {
    pub vertices: Vec<V>,
    pub edges: Vec<(I, I)>,
}

impl<V, I> GraphSnapshot<V, I> {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl<V: Vertex + Clone, M: ListenerMode<V>> Graph<V, M> {
    pub fn snapshot(&self) -> GraphSnapshot<V, V::Id> {
        GraphSnapshot {
            vertices: self.vertices().cloned().collect(),
            edges: self.edges(),
        }
    }
}

impl<V: Vertex> Graph<V> {
    pub fn from_snapshot(snapshot: GraphSnapshot<V, V::Id>) -> Result<Self, CasGraphError> {
        Self::from_snapshot_with_config(snapshot, GraphConfig::default())
    }

    pub fn from_snapshot_with_config(
        snapshot: GraphSnapshot<V, V::Id>,
        config: GraphConfig,
    ) -> Result<Self, CasGraphError> {
        let config = GraphConfig {
            reserve_vertex_capacity: config
                .reserve_vertex_capacity
                .or(Some(snapshot.vertices.len())),
            ..config
        };
        let mut graph = Graph::with_config(config);
        for vertex in snapshot.vertices {
            graph.add_vertex(vertex)?;
        }
        for (from, to) in &snapshot.edges {
            graph.add_edge(from, to)?;
        }
        debug!(
            vertices = graph.size(),
            edges = graph.edge_count(),
            "graph restored from snapshot"
        );
        Ok(graph)
    }
}
