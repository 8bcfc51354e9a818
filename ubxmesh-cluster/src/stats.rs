//! Summary numbers for a clustered mesh

use ubxmesh_core::{ClusteredMesh, MAX_CLUSTER_VERTICES};

/// What one clustering pass produced and dropped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClusterStats {
    pub cluster_count: usize,
    pub triangle_count: usize,
    /// Vertices written across all clusters; a vertex shared by two
    /// clusters counts twice.
    pub emitted_vertex_count: usize,
    /// Distinct vertex identities in the source mesh
    pub unique_vertex_count: usize,
    pub duplicate_faces: usize,
    pub degenerate_faces: usize,
}

impl ClusterStats {
    pub fn from_mesh(mesh: &ClusteredMesh, unique_vertex_count: usize) -> Self {
        Self {
            cluster_count: mesh.cluster_count(),
            triangle_count: mesh.triangle_count(),
            emitted_vertex_count: mesh.vertex_count(),
            unique_vertex_count,
            ..Self::default()
        }
    }

    /// Emitted vertices per distinct source vertex; 1.0 means no vertex was
    /// repeated across cluster boundaries.
    pub fn duplication_ratio(&self) -> f32 {
        if self.unique_vertex_count == 0 {
            return 0.0;
        }
        self.emitted_vertex_count as f32 / self.unique_vertex_count as f32
    }

    /// Average share of the vertex buffer the clusters fill
    pub fn average_fill(&self) -> f32 {
        if self.cluster_count == 0 {
            return 0.0;
        }
        self.emitted_vertex_count as f32 / (self.cluster_count * MAX_CLUSTER_VERTICES) as f32
    }
}
