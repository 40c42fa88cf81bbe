//! Construction options for [`crate::Graph`].

/// Options applied when a graph is created.
///
/// ```rust
/// use casgraph::GraphConfig;
///
/// let config = GraphConfig::default().with_vertex_capacity(128);
/// assert_eq!(config.reserve_vertex_capacity, Some(128));
/// assert_eq!(config.verify_invariants, cfg!(debug_assertions));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphConfig {
    /// Vertex slots (and adjacency slots) to allocate up front.
    pub reserve_vertex_capacity: Option<usize>,

    /// Run the full safety report after every mutation and panic on any
    /// structural violation. Costs a pass over every vertex and edge per
    /// call, so it defaults to on only in debug builds.
    pub verify_invariants: bool,
}

impl GraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vertex_capacity(mut self, capacity: usize) -> Self {
        self.reserve_vertex_capacity = Some(capacity);
        self
    }

    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.verify_invariants = enabled;
        self
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            reserve_vertex_capacity: None,
            verify_invariants: cfg!(debug_assertions),
        }
    }
}
