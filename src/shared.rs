//! Thread-safe handle around a [`Graph`].
//!
//! Each call takes the lock exactly once, so a multi-step mutation such as
//! [`SharedGraph::replace_vertex`] is observed by other handles either fully
//! applied or not at all. Query results are copied out before the lock is
//! released.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    config::GraphConfig,
    errors::CasGraphError,
    event::{GraphEvent, ListenerId, Threaded},
    graph::Graph,
    safety::SafetyReport,
    vertex::Vertex,
    view::GraphView,
};

pub struct SharedGraph<V: Vertex> {
    inner: Arc<RwLock<Graph<V, Threaded>>>,
}

impl<V: Vertex> Clone for SharedGraph<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Vertex> SharedGraph<V> {
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self::from_graph(Graph::threaded(config))
    }

    pub fn from_graph(graph: Graph<V, Threaded>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    pub fn add_vertex(&self, vertex: V) -> Result<(), CasGraphError> {
        self.inner.write().add_vertex(vertex)
    }

    pub fn remove_vertex(&self, id: &V::Id) -> Option<V> {
        self.inner.write().remove_vertex(id)
    }

    pub fn add_edge(&self, from: &V::Id, to: &V::Id) -> Result<bool, CasGraphError> {
        self.inner.write().add_edge(from, to)
    }

    pub fn remove_edge(&self, from: &V::Id, to: &V::Id) -> bool {
        self.inner.write().remove_edge(from, to)
    }

    pub fn replace_vertex(&self, old_id: &V::Id, replacement: V) -> Result<V, CasGraphError> {
        self.inner.write().replace_vertex(old_id, replacement)
    }

    pub fn outgoing_vertices_of(&self, id: &V::Id) -> Vec<V::Id> {
        self.inner.read().outgoing_vertices_of(id)
    }

    pub fn incoming_vertices_of(&self, id: &V::Id) -> Vec<V::Id> {
        self.inner.read().incoming_vertices_of(id)
    }

    pub fn size(&self) -> usize {
        self.inner.read().size()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.read().edge_count()
    }

    pub fn contains_vertex(&self, id: &V::Id) -> bool {
        self.inner.read().contains_vertex(id)
    }

    pub fn safety_report(&self) -> SafetyReport {
        self.inner.read().safety_report()
    }

    /// Runs `f` against the graph under a read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Graph<V, Threaded>) -> R) -> R {
        f(&self.inner.read())
    }

    /// Listeners run while the write lock is held. They receive a
    /// [`GraphView`] and must not call back into this handle.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: FnMut(&GraphView<'_, V>, &GraphEvent<'_, V>) + Send + 'static,
    {
        self.inner.write().subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.inner.write().unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.read().listener_count()
    }
}

impl<V: Vertex + Clone> SharedGraph<V> {
    pub fn vertices(&self) -> Vec<V> {
        self.inner.read().vertices().cloned().collect()
    }

    pub fn vertex(&self, id: &V::Id) -> Result<V, CasGraphError> {
        self.inner.read().vertex(id).cloned()
    }
}

impl<V: Vertex> Default for SharedGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}
