//! Vertex-budgeted triangle clustering
//!
//! This crate splits a triangulated mesh into clusters whose unique vertex
//! count fits the hardware vertex buffer ([`MAX_CLUSTER_VERTICES`]):
//! - Greedy adjacency-first partitioning with exact vertex identity
//! - Cluster-local index assignment and vertex transforms
//! - Parallel clustering of independent meshes
//!
//! [`MAX_CLUSTER_VERTICES`]: ubxmesh_core::MAX_CLUSTER_VERTICES

pub mod options;
pub mod context;
pub mod builder;
pub mod greedy;
pub mod stats;
pub mod parallel;

pub use options::*;
pub use context::*;
pub use builder::*;
pub use greedy::*;
pub use stats::*;
pub use parallel::*;

use ubxmesh_core::{ClusteredMesh, Result, SourceMesh};

/// Split a mesh into vertex-budgeted clusters
pub trait MeshClusterer {
    /// Cluster every non-duplicate face of `mesh`; fails if the mesh has no faces
    fn cluster(&self, mesh: &SourceMesh) -> Result<ClusteredMesh>;
}
