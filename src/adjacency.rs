//! Mirrored outgoing/incoming adjacency lists.
//!
//! Every list is kept in edge insertion order and never holds the same
//! identity twice. Lists that become empty are dropped from their map, so a
//! key present in either map always has at least one neighbour.

use std::hash::Hash;

use ahash::AHashMap;

use crate::errors::CasGraphError;

pub struct EdgeIndex<I> {
    outgoing: AHashMap<I, Vec<I>>,
    incoming: AHashMap<I, Vec<I>>,
    sequence: AHashMap<(I, I), u64>,
    next_sequence: u64,
}

impl<I> EdgeIndex<I>
where
    I: Clone + Eq + Hash + std::fmt::Debug,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outgoing: AHashMap::with_capacity(capacity),
            incoming: AHashMap::with_capacity(capacity),
            sequence: AHashMap::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    /// Records `from -> to`. Returns `false` when the edge was already present.
    pub fn add_edge(&mut self, from: &I, to: &I) -> bool {
        let key = (from.clone(), to.clone());
        if self.sequence.contains_key(&key) {
            return false;
        }
        self.sequence.insert(key, self.next_sequence);
        self.next_sequence += 1;
        self.outgoing
            .entry(from.clone())
            .or_default()
            .push(to.clone());
        self.incoming
            .entry(to.clone())
            .or_default()
            .push(from.clone());
        true
    }

    /// Drops `from -> to`. Returns `false` when there was no such edge.
    pub fn remove_edge(&mut self, from: &I, to: &I) -> bool {
        if self.sequence.remove(&(from.clone(), to.clone())).is_none() {
            return false;
        }
        detach(&mut self.outgoing, from, to);
        detach(&mut self.incoming, to, from);
        true
    }

    pub fn outgoing(&self, id: &I) -> &[I] {
        self.outgoing.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn incoming(&self, id: &I) -> &[I] {
        self.incoming.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn contains(&self, id: &I) -> bool {
        self.outgoing.contains_key(id) || self.incoming.contains_key(id)
    }

    pub fn contains_edge(&self, from: &I, to: &I) -> bool {
        self.sequence.contains_key(&(from.clone(), to.clone()))
    }

    /// Removes every edge touching `id`, in either direction.
    pub fn purge(&mut self, id: &I) {
        for target in self.outgoing.remove(id).unwrap_or_default() {
            detach(&mut self.incoming, &target, id);
            self.sequence.remove(&(id.clone(), target));
        }
        for source in self.incoming.remove(id).unwrap_or_default() {
            detach(&mut self.outgoing, &source, id);
            self.sequence.remove(&(source, id.clone()));
        }
    }

    /// Renames `old` to `new` in every list and key, keeping each entry at its
    /// position. Renaming to the same identity changes nothing. `new` must not
    /// already have edges of its own.
    pub fn rekey(&mut self, old: &I, new: &I) -> Result<(), CasGraphError> {
        if old == new {
            return Ok(());
        }
        if self.contains(new) {
            return Err(CasGraphError::duplicate_vertex(format!(
                "{new:?} already has edges"
            )));
        }

        let targets = self.outgoing.remove(old).unwrap_or_default();
        let sources = self.incoming.remove(old).unwrap_or_default();

        let rename = |id: &I| if id == old { new.clone() } else { id.clone() };
        for pair in targets
            .iter()
            .map(|t| (old.clone(), t.clone()))
            .chain(sources.iter().map(|s| (s.clone(), old.clone())))
        {
            if let Some(seq) = self.sequence.remove(&pair) {
                self.sequence.insert((rename(&pair.0), rename(&pair.1)), seq);
            }
        }

        for neighbour in targets.iter().chain(sources.iter()) {
            if let Some(list) = self.outgoing.get_mut(neighbour) {
                rename_in(list, old, new);
            }
            if let Some(list) = self.incoming.get_mut(neighbour) {
                rename_in(list, old, new);
            }
        }

        if !targets.is_empty() {
            self.outgoing
                .insert(new.clone(), targets.iter().map(rename).collect());
        }
        if !sources.is_empty() {
            self.incoming
                .insert(new.clone(), sources.iter().map(rename).collect());
        }
        Ok(())
    }

    pub fn edge_count(&self) -> usize {
        self.sequence.len()
    }

    /// All edges in the order they were first recorded.
    pub fn edges(&self) -> Vec<(I, I)> {
        let mut ordered: Vec<(&(I, I), &u64)> = self.sequence.iter().collect();
        ordered.sort_by_key(|(_, seq)| **seq);
        ordered.into_iter().map(|(pair, _)| pair.clone()).collect()
    }

    pub(crate) fn outgoing_lists(&self) -> impl Iterator<Item = (&I, &Vec<I>)> {
        self.outgoing.iter()
    }

    pub(crate) fn incoming_lists(&self) -> impl Iterator<Item = (&I, &Vec<I>)> {
        self.incoming.iter()
    }

    pub(crate) fn sequenced_edges(&self) -> impl Iterator<Item = &(I, I)> {
        self.sequence.keys()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.outgoing.reserve(additional);
        self.incoming.reserve(additional);
    }
}

impl<I> Default for EdgeIndex<I>
where
    I: Clone + Eq + Hash + std::fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

fn detach<I: Eq + Hash>(map: &mut AHashMap<I, Vec<I>>, key: &I, neighbour: &I) {
    if let Some(list) = map.get_mut(key) {
        list.retain(|id| id != neighbour);
        if list.is_empty() {
            map.remove(key);
        }
    }
}

fn rename_in<I: Clone + Eq>(list: &mut [I], old: &I, new: &I) {
    for id in list.iter_mut() {
        if id == old {
            *id = new.clone();
        }
    }
}
