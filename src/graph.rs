use parking_lot::Mutex;
use tracing::debug;

use crate::{
    adjacency::EdgeIndex,
    config::GraphConfig,
    errors::CasGraphError,
    event::{
        GraphEvent, Listener, ListenerId, ListenerMode, ListenerRegistry, Local, SendListener,
        Threaded,
    },
    safety::{self, SafetyReport},
    store::VertexStore,
    vertex::Vertex,
    view::GraphView,
};

/// Directed dependency graph over identity-keyed vertices.
///
/// The graph is the only owner of its vertex store and edge index and keeps
/// them consistent across every call: a failed mutation changes nothing, and
/// a successful one leaves no edge pointing at a missing vertex. Queries hand
/// out owned id lists or borrow-checked views, so later mutation can never
/// change a result the caller already holds.
///
/// `M` decides which listeners may subscribe. The default, [`Local`], takes
/// any closure; [`Threaded`] takes only `Send` closures and is what
/// [`crate::SharedGraph`] wraps.
pub struct Graph<V: Vertex, M: ListenerMode<V> = Local> {
    store: VertexStore<V>,
    edges: EdgeIndex<V::Id>,
    listeners: ListenerRegistry<V, M>,
    config: GraphConfig,
}

impl<V: Vertex> Graph<V> {
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self::build(config)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&GraphView<'_, V>, &GraphEvent<'_, V>) + 'static,
    {
        let slot: Listener<V> = Box::new(listener);
        self.listeners.add(slot)
    }
}

impl<V: Vertex> Graph<V, Threaded> {
    pub fn threaded(config: GraphConfig) -> Self {
        Self::build(config)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&GraphView<'_, V>, &GraphEvent<'_, V>) + Send + 'static,
    {
        let listener: SendListener<V> = Box::new(listener);
        self.listeners.add(Mutex::new(listener))
    }
}

impl<V: Vertex, M: ListenerMode<V>> Graph<V, M> {
    fn build(config: GraphConfig) -> Self {
        let mut store = VertexStore::new();
        let mut edges = EdgeIndex::new();
        if let Some(capacity) = config.reserve_vertex_capacity {
            store.reserve(capacity);
            edges.reserve(capacity);
        }
        Self {
            store,
            edges,
            listeners: ListenerRegistry::new(),
            config,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Appends `vertex`. An identity that is already present is rejected with
    /// [`CasGraphError::DuplicateVertex`].
    pub fn add_vertex(&mut self, vertex: V) -> Result<(), CasGraphError> {
        let id = vertex.id().clone();
        self.store.add(vertex)?;
        debug!(vertex = ?id, size = self.store.size(), "vertex added");
        self.verify("add_vertex");

        let (view, listeners) = self.split();
        if let Ok(vertex) = view.vertex(&id) {
            listeners.dispatch(&view, &GraphEvent::VertexAdded(vertex));
        }
        Ok(())
    }

    /// Deletes the vertex and every edge touching it. Removing an id that is
    /// not present is a no-op and returns `None`.
    pub fn remove_vertex(&mut self, id: &V::Id) -> Option<V> {
        let removed = self.store.remove(id)?;
        self.edges.purge(id);
        debug!(vertex = ?id, size = self.store.size(), "vertex removed");
        self.verify("remove_vertex");

        let (view, listeners) = self.split();
        listeners.dispatch(&view, &GraphEvent::VertexRemoved(&removed));
        Some(removed)
    }

    /// Records `from -> to`. Returns `Ok(false)` if the edge already existed.
    ///
    /// Both endpoints must be present, and an edge from a vertex to itself is
    /// rejected.
    pub fn add_edge(&mut self, from: &V::Id, to: &V::Id) -> Result<bool, CasGraphError> {
        self.require(from)?;
        self.require(to)?;
        if from == to {
            return Err(CasGraphError::invalid_input(format!(
                "self loops are not supported: {from:?}"
            )));
        }
        let inserted = self.edges.add_edge(from, to);
        if inserted {
            debug!(from = ?from, to = ?to, "edge added");
            self.verify("add_edge");
        }
        Ok(inserted)
    }

    /// Drops `from -> to`. Returns `false` if there was no such edge.
    pub fn remove_edge(&mut self, from: &V::Id, to: &V::Id) -> bool {
        let removed = self.edges.remove_edge(from, to);
        if removed {
            debug!(from = ?from, to = ?to, "edge removed");
            self.verify("remove_edge");
        }
        removed
    }

    /// Swaps the vertex stored under `old_id` for `replacement` while keeping
    /// every edge attached.
    ///
    /// When `replacement` carries a different identity, every adjacency entry
    /// that named `old_id` is renamed in place, so edge order is unchanged.
    /// With the same identity this is a pure payload swap. The replacement
    /// also takes over the original's position in [`Graph::vertices`].
    ///
    /// Returns the original vertex. Fails with [`CasGraphError::NotFound`] if
    /// `old_id` is absent, or [`CasGraphError::DuplicateVertex`] if the new
    /// identity already belongs to another vertex. A failed call changes
    /// nothing.
    pub fn replace_vertex(&mut self, old_id: &V::Id, replacement: V) -> Result<V, CasGraphError> {
        self.require(old_id)?;
        let new_id = replacement.id().clone();
        if &new_id != old_id && self.store.contains(&new_id) {
            return Err(CasGraphError::duplicate_vertex(format!("{new_id:?}")));
        }

        self.edges.rekey(old_id, &new_id)?;
        let original = self.store.replace(old_id, replacement)?;
        debug!(from = ?old_id, to = ?new_id, "vertex replaced");
        self.verify("replace_vertex");

        let (view, listeners) = self.split();
        if let Ok(replacement) = view.vertex(&new_id) {
            let event = GraphEvent::VertexReplaced {
                original: &original,
                replacement,
            };
            listeners.dispatch(&view, &event);
        }
        Ok(original)
    }

    /// Ids reachable by one edge from `id`, in edge insertion order. Unknown
    /// ids yield an empty list.
    pub fn outgoing_vertices_of(&self, id: &V::Id) -> Vec<V::Id> {
        self.edges.outgoing(id).to_vec()
    }

    /// Ids with an edge into `id`, in edge insertion order. Unknown ids yield
    /// an empty list.
    pub fn incoming_vertices_of(&self, id: &V::Id) -> Vec<V::Id> {
        self.edges.incoming(id).to_vec()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.store.all()
    }

    pub fn vertex(&self, id: &V::Id) -> Result<&V, CasGraphError> {
        self.store.get(id)
    }

    pub fn contains_vertex(&self, id: &V::Id) -> bool {
        self.store.contains(id)
    }

    pub fn contains_edge(&self, from: &V::Id, to: &V::Id) -> bool {
        self.edges.contains_edge(from, to)
    }

    pub fn size(&self) -> usize {
        self.store.size()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.edge_count()
    }

    /// Every edge in the order it was first recorded.
    pub fn edges(&self) -> Vec<(V::Id, V::Id)> {
        self.edges.edges()
    }

    pub fn view(&self) -> GraphView<'_, V> {
        GraphView::new(&self.store, &self.edges)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn safety_report(&self) -> SafetyReport {
        safety::run_safety_checks(&self.store, &self.edges)
    }

    fn require(&self, id: &V::Id) -> Result<(), CasGraphError> {
        if self.store.contains(id) {
            Ok(())
        } else {
            Err(CasGraphError::not_found(format!("{id:?}")))
        }
    }

    fn verify(&self, operation: &str) {
        if self.config.verify_invariants {
            let report = self.safety_report();
            assert!(
                !report.has_issues(),
                "structural violation after {operation}: {report:?}"
            );
        }
    }

    /// Borrows the store and edge index for listeners while the registry
    /// stays in place.
    fn split(&mut self) -> (GraphView<'_, V>, &mut ListenerRegistry<V, M>) {
        (GraphView::new(&self.store, &self.edges), &mut self.listeners)
    }
}

impl<V: Vertex> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}
