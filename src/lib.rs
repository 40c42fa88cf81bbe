//! Identity-keyed dependency graph for construction histories.
//! Run Criterion benchmarks with `cargo bench` to inspect reports under `target/criterion`.
//!
//! ```rust
//! use casgraph::{GeomVertex, Graph};
//!
//! let mut graph = Graph::new();
//! graph.add_vertex(GeomVertex::geometry("a")).unwrap();
//! graph.add_vertex(GeomVertex::geometry("b")).unwrap();
//! graph.add_edge(&"a".to_string(), &"b".to_string()).unwrap();
//!
//! graph.replace_vertex(&"b".to_string(), GeomVertex::geometry("c")).unwrap();
//! assert_eq!(graph.outgoing_vertices_of(&"a".to_string()), vec!["c".to_string()]);
//! ```

pub mod adjacency;
pub mod bench_utils;
pub mod cli;
pub mod config;
pub mod errors;
pub mod event;
pub mod geometry;
pub mod graph;
pub mod safety;
pub mod script;
pub mod shared;
pub mod snapshot;
pub mod store;
pub mod vertex;
pub mod view;

pub use crate::adjacency::EdgeIndex;
pub use crate::config::GraphConfig;
pub use crate::errors::CasGraphError;
pub use crate::event::{
    GraphEvent, Listener, ListenerId, ListenerMode, Local, SendListener, Threaded,
};
pub use crate::geometry::{EditTransition, GeomVertex, VertexCategory, edit_transition};
pub use crate::graph::Graph;
pub use crate::safety::{SafetyError, SafetyReport};
pub use crate::script::{ScriptOp, ScriptStats, apply_script, parse_script};
pub use crate::shared::SharedGraph;
pub use crate::snapshot::GraphSnapshot;
pub use crate::store::VertexStore;
pub use crate::vertex::Vertex;
pub use crate::view::GraphView;
