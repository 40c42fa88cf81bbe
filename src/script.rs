//! Replayable operation scripts.
//!
//! A script is a JSON array of operations, each tagged with `op`:
//!
//! ```json
//! [
//!   {"op": "add_vertex", "vertex": {"id": "wp", "category": "geometry"}},
//!   {"op": "add_vertex", "vertex": {"id": "p1", "category": "geometry"}},
//!   {"op": "add_edge", "from": "wp", "to": "p1"},
//!   {"op": "replace_vertex", "id": "p1", "vertex": {"id": "p1", "category": "geometry", "editing": true}}
//! ]
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    errors::CasGraphError,
    event::ListenerMode,
    geometry::{EditTransition, GeomVertex, edit_transition},
    graph::Graph,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptOp {
    AddVertex { vertex: GeomVertex },
    RemoveVertex { id: String },
    AddEdge { from: String, to: String },
    RemoveEdge { from: String, to: String },
    ReplaceVertex { id: String, vertex: GeomVertex },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScriptStats {
    pub vertices_added: usize,
    pub vertices_removed: usize,
    pub vertices_replaced: usize,
    pub edges_added: usize,
    pub edges_removed: usize,
    /// Removals and edge operations that changed nothing.
    pub skipped: usize,
    /// Workplane transitions produced by each replacement, in order.
    pub transitions: Vec<EditTransition>,
}

pub fn parse_script(input: &str) -> Result<Vec<ScriptOp>, CasGraphError> {
    serde_json::from_str(input).map_err(|e| CasGraphError::script(e.to_string()))
}

/// Applies `ops` in order. Stops at the first failing operation; the error
/// names its position. Operations before it stay applied.
pub fn apply_script<M: ListenerMode<GeomVertex>>(
    graph: &mut Graph<GeomVertex, M>,
    ops: &[ScriptOp],
) -> Result<ScriptStats, CasGraphError> {
    let mut stats = ScriptStats::default();
    for (index, op) in ops.iter().enumerate() {
        apply_op(graph, op, &mut stats).map_err(|err| annotate(index, err))?;
    }
    debug!(operations = ops.len(), ?stats, "script applied");
    Ok(stats)
}

fn apply_op<M: ListenerMode<GeomVertex>>(
    graph: &mut Graph<GeomVertex, M>,
    op: &ScriptOp,
    stats: &mut ScriptStats,
) -> Result<(), CasGraphError> {
    match op {
        ScriptOp::AddVertex { vertex } => {
            graph.add_vertex(vertex.clone())?;
            stats.vertices_added += 1;
        }
        ScriptOp::RemoveVertex { id } => match graph.remove_vertex(id) {
            Some(_) => stats.vertices_removed += 1,
            None => stats.skipped += 1,
        },
        ScriptOp::AddEdge { from, to } => {
            if graph.add_edge(from, to)? {
                stats.edges_added += 1;
            } else {
                stats.skipped += 1;
            }
        }
        ScriptOp::RemoveEdge { from, to } => {
            if graph.remove_edge(from, to) {
                stats.edges_removed += 1;
            } else {
                stats.skipped += 1;
            }
        }
        ScriptOp::ReplaceVertex { id, vertex } => {
            let original = graph.replace_vertex(id, vertex.clone())?;
            stats.transitions.push(edit_transition(&original, vertex));
            stats.vertices_replaced += 1;
        }
    }
    Ok(())
}

fn annotate(index: usize, err: CasGraphError) -> CasGraphError {
    match err {
        CasGraphError::DuplicateVertex(msg) => {
            CasGraphError::duplicate_vertex(format!("operation {index}: {msg}"))
        }
        CasGraphError::NotFound(msg) => CasGraphError::not_found(format!("operation {index}: {msg}")),
        CasGraphError::InvalidInput(msg) => {
            CasGraphError::invalid_input(format!("operation {index}: {msg}"))
        }
        CasGraphError::ScriptError(msg) => CasGraphError::script(format!("operation {index}: {msg}")),
    }
}
