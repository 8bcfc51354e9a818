//! Faces as sets of vertex identities

use crate::vertex::{Vertex, VertexId, VertexPool};

/// One input triangle, reduced to the set of distinct vertex identities it
/// touches.
///
/// `corners` keeps the three original corners so a degenerate face (two
/// corners with the same identity) still emits three indices. `vertices()`
/// is the de-duplicated set, sorted by id, that adjacency is measured on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    index: usize,
    corners: [VertexId; 3],
    distinct: [VertexId; 3],
    distinct_len: usize,
}

impl Face {
    pub fn new(index: usize, corners: [VertexId; 3]) -> Self {
        let mut distinct = corners;
        distinct.sort_unstable();

        let mut distinct_len = 1;
        for i in 1..3 {
            if distinct[i] != distinct[distinct_len - 1] {
                distinct[distinct_len] = distinct[i];
                distinct_len += 1;
            }
        }

        Self {
            index,
            corners,
            distinct,
            distinct_len,
        }
    }

    /// Intern the triangle's vertices into `pool` and build the face
    pub fn from_triangle(index: usize, triangle: &[Vertex; 3], pool: &mut VertexPool) -> Self {
        let corners = [
            pool.intern(triangle[0]),
            pool.intern(triangle[1]),
            pool.intern(triangle[2]),
        ];
        Self::new(index, corners)
    }

    /// Position of this face in the input triangle list
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn corners(&self) -> &[VertexId; 3] {
        &self.corners
    }

    /// Distinct vertex identities of the face, in ascending id order
    pub fn vertices(&self) -> &[VertexId] {
        &self.distinct[..self.distinct_len]
    }

    /// True if two or more corners share one identity
    pub fn is_degenerate(&self) -> bool {
        self.distinct_len < 3
    }

    /// Number of vertex identities present in both faces
    pub fn shared_vertex_count(&self, other: &Face) -> usize {
        self.vertices()
            .iter()
            .filter(|v| other.vertices().contains(v))
            .count()
    }

    /// True if `other` touches exactly the same three vertex identities
    pub fn is_duplicate_of(&self, other: &Face) -> bool {
        self.shared_vertex_count(other) == 3
    }
}
