//! Clustering configuration

/// Configuration for [`GreedyClusterer`](crate::GreedyClusterer)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClusterOptions {
    /// When set, a cluster only grows through faces that share a vertex
    /// with it. When clear, a cluster with no adjacent candidate is filled
    /// with the next unassigned face, so disconnected pieces can share a
    /// vertex buffer.
    pub use_local_clusters: bool,
}

impl ClusterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that keep every cluster connected
    pub fn local() -> Self {
        Self {
            use_local_clusters: true,
        }
    }

    pub fn with_local_clusters(mut self, enabled: bool) -> Self {
        self.use_local_clusters = enabled;
        self
    }
}
