use std::{fmt::Debug, hash::Hash};

/// Identity extraction for graph payloads.
///
/// Two values whose `id()` compare equal occupy the same graph position, even
/// when the rest of their payload differs. The graph never inspects anything
/// beyond the identity.
pub trait Vertex {
    type Id: Clone + Eq + Hash + Debug;

    fn id(&self) -> &Self::Id;
}
