//! Greedy adjacency-first clustering
//!
//! Clusters are grown one face at a time. Each step scans every unassigned
//! face and adds the one sharing the most vertices with the cluster so far,
//! which keeps vertices shared across cluster boundaries to a minimum. A
//! cluster is closed before the face that would push it past
//! [`MAX_CLUSTER_VERTICES`] is added, never after.
//!
//! Each step rescans the whole open set against the whole cluster, so a
//! pass is quadratic in the face count. Large meshes should be split before
//! clustering.

use crate::builder::ClusterBuilder;
use crate::context::ClusteringContext;
use crate::options::ClusterOptions;
use crate::stats::ClusterStats;
use crate::MeshClusterer;
use ubxmesh_core::{ClusteredMesh, Error, Result, SourceMesh, MAX_CLUSTER_VERTICES};

/// Greedy clusterer honoring the hardware vertex budget
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyClusterer {
    pub options: ClusterOptions,
}

impl GreedyClusterer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ClusterOptions) -> Self {
        Self { options }
    }

    /// Split the open faces of `ctx` into clusters, returning the face
    /// indices of each cluster in creation order. Duplicate faces are left
    /// out and recorded in the context.
    pub fn partition(&self, ctx: &mut ClusteringContext) -> Vec<Vec<usize>> {
        let mut clusters = Vec::new();

        while ctx.has_open_faces() {
            if ctx.is_cluster_empty() {
                ctx.seed();
                continue;
            }

            let mut chosen = ctx.find_best_candidate();
            if chosen.is_none() && !self.options.use_local_clusters {
                chosen = ctx.first_open_face();
            }

            match chosen {
                Some(face) => {
                    if ctx.unique_vertex_count() + ctx.new_vertex_count(face) > MAX_CLUSTER_VERTICES {
                        Self::flush(ctx, &mut clusters);
                    }
                    ctx.close_face(face);
                }
                None => Self::flush(ctx, &mut clusters),
            }
        }

        if !ctx.is_cluster_empty() {
            Self::flush(ctx, &mut clusters);
        }

        clusters
    }

    fn flush(ctx: &mut ClusteringContext, clusters: &mut Vec<Vec<usize>>) {
        let vertices = ctx.unique_vertex_count();
        let faces = ctx.take_cluster();
        log::debug!(
            "closing cluster {} with {} triangles and {} vertices",
            clusters.len(),
            faces.len(),
            vertices
        );
        clusters.push(faces);
    }

    /// Cluster `mesh` and report what the pass produced
    pub fn cluster_with_stats(&self, mesh: &SourceMesh) -> Result<(ClusteredMesh, ClusterStats)> {
        if mesh.is_empty() {
            return Err(Error::EmptyMesh {
                name: mesh.name.clone(),
            });
        }

        let mut ctx = ClusteringContext::new(mesh);
        let degenerate_faces = ctx.faces().iter().filter(|f| f.is_degenerate()).count();
        if degenerate_faces > 0 {
            log::warn!(
                "mesh '{}' has {} degenerate faces",
                mesh.name,
                degenerate_faces
            );
        }

        let partition = self.partition(&mut ctx);

        let builder = ClusterBuilder::new(ctx.faces(), ctx.pool(), &mesh.transform);
        let mut clustered = ClusteredMesh::new(mesh.name.clone());
        for faces in &partition {
            clustered.add_cluster(builder.build(faces));
        }

        assert!(
            clustered.is_valid(),
            "mesh '{}' has {} faces but produced no clusters",
            mesh.name,
            mesh.face_count()
        );

        let stats = ClusterStats {
            duplicate_faces: ctx.duplicate_faces().len(),
            degenerate_faces,
            ..ClusterStats::from_mesh(&clustered, ctx.pool().len())
        };

        log::info!(
            "clustered mesh '{}': {} triangles into {} clusters ({} vertices, {:.2}x duplication, {} duplicate faces dropped)",
            clustered.name,
            stats.triangle_count,
            stats.cluster_count,
            stats.emitted_vertex_count,
            stats.duplication_ratio(),
            stats.duplicate_faces
        );

        Ok((clustered, stats))
    }
}

impl MeshClusterer for GreedyClusterer {
    fn cluster(&self, mesh: &SourceMesh) -> Result<ClusteredMesh> {
        self.cluster_with_stats(mesh).map(|(clustered, _)| clustered)
    }
}
