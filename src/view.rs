use crate::{adjacency::EdgeIndex, errors::CasGraphError, store::VertexStore, vertex::Vertex};

/// Read-only view of a graph handed to listeners during event dispatch.
///
/// Borrows the vertex store and edge index only, so it cannot reach the
/// listener registry or mutate anything.
pub struct GraphView<'a, V: Vertex> {
    store: &'a VertexStore<V>,
    edges: &'a EdgeIndex<V::Id>,
}

impl<'a, V: Vertex> GraphView<'a, V> {
    pub(crate) fn new(store: &'a VertexStore<V>, edges: &'a EdgeIndex<V::Id>) -> Self {
        Self { store, edges }
    }

    pub fn outgoing_vertices_of(&self, id: &V::Id) -> Vec<V::Id> {
        self.edges.outgoing(id).to_vec()
    }

    pub fn incoming_vertices_of(&self, id: &V::Id) -> Vec<V::Id> {
        self.edges.incoming(id).to_vec()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &'a V> + use<'a, V> {
        self.store.all()
    }

    pub fn vertex(&self, id: &V::Id) -> Result<&'a V, CasGraphError> {
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

    pub fn edge_count(&self) -> usize {
        self.edges.edge_count()
    }
}
