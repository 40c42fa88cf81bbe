use ahash::RandomState;
use indexmap::IndexMap;

use crate::{errors::CasGraphError, vertex::Vertex};

/// Live vertices keyed by identity, enumerated in insertion order.
pub struct VertexStore<V: Vertex> {
    vertices: IndexMap<V::Id, V, RandomState>,
}

impl<V: Vertex> VertexStore<V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: IndexMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Inserts `vertex` at the end of the enumeration order. An identity that
    /// is already stored is rejected and the store is left untouched.
    pub fn add(&mut self, vertex: V) -> Result<(), CasGraphError> {
        if self.vertices.contains_key(vertex.id()) {
            return Err(CasGraphError::duplicate_vertex(format!(
                "{:?}",
                vertex.id()
            )));
        }
        self.vertices.insert(vertex.id().clone(), vertex);
        Ok(())
    }

    pub fn remove(&mut self, id: &V::Id) -> Option<V> {
        self.vertices.shift_remove(id)
    }

    pub fn get(&self, id: &V::Id) -> Result<&V, CasGraphError> {
        self.vertices
            .get(id)
            .ok_or_else(|| CasGraphError::not_found(format!("{id:?}")))
    }

    pub fn contains(&self, id: &V::Id) -> bool {
        self.vertices.contains_key(id)
    }

    /// Swaps the record stored under `old_id` for `vertex`, keeping its
    /// position in the enumeration order. Returns the previous record.
    pub fn replace(&mut self, old_id: &V::Id, vertex: V) -> Result<V, CasGraphError> {
        let Some(index) = self.vertices.get_index_of(old_id) else {
            return Err(CasGraphError::not_found(format!("{old_id:?}")));
        };
        if vertex.id() == old_id {
            let slot = &mut self.vertices[index];
            return Ok(std::mem::replace(slot, vertex));
        }
        if self.vertices.contains_key(vertex.id()) {
            return Err(CasGraphError::duplicate_vertex(format!(
                "{:?}",
                vertex.id()
            )));
        }
        let (_, previous) = self
            .vertices
            .shift_remove_index(index)
            .ok_or_else(|| CasGraphError::not_found(format!("{old_id:?}")))?;
        self.vertices.shift_insert(index, vertex.id().clone(), vertex);
        Ok(previous)
    }

    pub fn all(&self) -> impl Iterator<Item = &V> {
        self.vertices.values()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&V::Id, &V)> {
        self.vertices.iter()
    }

    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.vertices.reserve(additional);
    }
}

impl<V: Vertex> Default for VertexStore<V> {
    fn default() -> Self {
        Self::new()
    }
}
