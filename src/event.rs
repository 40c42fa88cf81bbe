//! Change notifications emitted by [`crate::Graph`] after a successful mutation.
//!
//! Listeners are invoked synchronously, in subscription order, with a
//! [`GraphView`] so they can run any query while handling the event. The
//! registry stays inside the graph during dispatch; a listener that panics
//! unwinds out of the mutating call but does not unsubscribe anyone.

use std::fmt;

use parking_lot::Mutex;
use tracing::debug;

use crate::{vertex::Vertex, view::GraphView};

#[derive(Debug)]
pub enum GraphEvent<'a, V> {
    VertexAdded(&'a V),
    VertexRemoved(&'a V),
    VertexReplaced { original: &'a V, replacement: &'a V },
}

impl<V> GraphEvent<'_, V> {
    pub fn kind(&self) -> &'static str {
        match self {
            GraphEvent::VertexAdded(_) => "vertex_added",
            GraphEvent::VertexRemoved(_) => "vertex_removed",
            GraphEvent::VertexReplaced { .. } => "vertex_replaced",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Listener accepted by a single-threaded graph.
pub type Listener<V> = Box<dyn FnMut(&GraphView<'_, V>, &GraphEvent<'_, V>)>;

/// Listener accepted by a graph that can move between threads.
pub type SendListener<V> = Box<dyn FnMut(&GraphView<'_, V>, &GraphEvent<'_, V>) + Send>;

/// Storage policy for the listeners of a [`crate::Graph`].
pub trait ListenerMode<V: Vertex> {
    type Slot;

    fn notify(slot: &mut Self::Slot, view: &GraphView<'_, V>, event: &GraphEvent<'_, V>);
}

/// Any `FnMut` may subscribe. The graph is then neither `Send` nor `Sync`.
pub struct Local;

/// Only `Send` listeners may subscribe, which keeps the graph `Send + Sync`
/// so it can sit behind [`crate::SharedGraph`].
pub struct Threaded;

impl<V: Vertex> ListenerMode<V> for Local {
    type Slot = Listener<V>;

    fn notify(slot: &mut Self::Slot, view: &GraphView<'_, V>, event: &GraphEvent<'_, V>) {
        slot(view, event);
    }
}

impl<V: Vertex> ListenerMode<V> for Threaded {
    // The mutex is never locked; `get_mut` reaches the listener through
    // `&mut`. It only lends `Sync` to a `Send` closure.
    type Slot = Mutex<SendListener<V>>;

    fn notify(slot: &mut Self::Slot, view: &GraphView<'_, V>, event: &GraphEvent<'_, V>) {
        let listener = slot.get_mut();
        listener(view, event);
    }
}

pub(crate) struct ListenerRegistry<V: Vertex, M: ListenerMode<V>> {
    listeners: Vec<(ListenerId, M::Slot)>,
    next_id: u64,
}

impl<V: Vertex, M: ListenerMode<V>> ListenerRegistry<V, M> {
    pub(crate) fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub(crate) fn add(&mut self, slot: M::Slot) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, slot));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn dispatch(&mut self, view: &GraphView<'_, V>, event: &GraphEvent<'_, V>) {
        for (id, slot) in self.listeners.iter_mut() {
            debug!(listener = %id, event = event.kind(), "dispatching graph event");
            M::notify(slot, view, event);
        }
    }
}
