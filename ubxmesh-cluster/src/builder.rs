//! Turning a set of faces into a finished cluster

use itertools::Itertools;
use std::collections::HashMap;
use ubxmesh_core::{Cluster, Face, MeshTransform, VertexId, VertexPool};

/// Assigns cluster-local vertex indices and transforms cluster vertices.
///
/// Faces are emitted in ascending face index. Within a face the corners
/// are ordered by squared distance from the origin (ties broken by vertex
/// key), so a vertex shared by several faces is reached in the same order
/// whatever the winding of the face it came from. Every vertex is
/// transformed exactly once, after all faces have been indexed, so the
/// pool keeps the untransformed identities.
pub struct ClusterBuilder<'a> {
    faces: &'a [Face],
    pool: &'a VertexPool,
    transform: &'a MeshTransform,
}

impl<'a> ClusterBuilder<'a> {
    pub fn new(faces: &'a [Face], pool: &'a VertexPool, transform: &'a MeshTransform) -> Self {
        Self {
            faces,
            pool,
            transform,
        }
    }

    /// Corners of `face` in emission order
    fn sorted_corners(&self, face: &Face) -> impl Iterator<Item = VertexId> + '_ {
        face.corners().iter().copied().sorted_by(|&a, &b| {
            let va = self.pool.get(a);
            let vb = self.pool.get(b);
            va.squared_distance_from_origin()
                .total_cmp(&vb.squared_distance_from_origin())
                .then_with(|| va.key().cmp(&vb.key()))
        })
    }

    pub fn build(&self, face_indices: &[usize]) -> Cluster {
        let mut local: HashMap<VertexId, u32> = HashMap::new();
        let mut order: Vec<VertexId> = Vec::new();
        let mut indices = Vec::with_capacity(face_indices.len() * 3);

        let face_indices: Vec<usize> = face_indices.iter().copied().sorted_unstable().collect();

        for &fi in &face_indices {
            for id in self.sorted_corners(&self.faces[fi]) {
                let index = *local.entry(id).or_insert_with(|| {
                    order.push(id);
                    (order.len() - 1) as u32
                });
                indices.push(index);
            }
        }

        let vertices = order
            .into_iter()
            .map(|id| self.pool.get(id).transformed(self.transform))
            .collect();

        Cluster {
            vertices,
            indices,
            face_indices,
        }
    }
}
