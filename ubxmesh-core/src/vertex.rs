//! Vertex types and exact vertex identity

use nalgebra::{Point3, Vector2, Vector3, Vector4};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::transform::MeshTransform;

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 2D vector, used for texture coordinates
pub type Vector2f = Vector2<f32>;

/// A 4D vector, used for RGBA colors
pub type Vector4f = Vector4<f32>;

/// A mesh vertex carrying every attribute a cluster vertex buffer holds.
///
/// Equality and hashing go through [`VertexKey`], so two vertices are the
/// same only when all twelve components have identical bit patterns. There
/// is no epsilon: `0.0` and `-0.0` are different vertices, and a NaN only
/// matches a NaN with the same payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3f,
    pub normal: Vector3f,
    pub tex_coord: Vector2f,
    pub color: Vector4f,
}

/// Raw bit patterns of every vertex component, in attribute order
/// (position, normal, texture coordinate, color).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexKey([u32; 12]);

impl VertexKey {
    pub fn from_vertex(vertex: &Vertex) -> Self {
        let p = &vertex.position;
        let n = &vertex.normal;
        let t = &vertex.tex_coord;
        let c = &vertex.color;

        Self([
            p.x.to_bits(),
            p.y.to_bits(),
            p.z.to_bits(),
            n.x.to_bits(),
            n.y.to_bits(),
            n.z.to_bits(),
            t.x.to_bits(),
            t.y.to_bits(),
            c.x.to_bits(),
            c.y.to_bits(),
            c.z.to_bits(),
            c.w.to_bits(),
        ])
    }

    /// The key's components as bit patterns
    pub fn bits(&self) -> &[u32; 12] {
        &self.0
    }
}

impl Vertex {
    /// Create a vertex from all of its attributes
    pub fn new(position: Point3f, normal: Vector3f, tex_coord: Vector2f, color: Vector4f) -> Self {
        Self {
            position,
            normal,
            tex_coord,
            color,
        }
    }

    /// Create a vertex at `position` with default normal, texture coordinate and color
    pub fn from_position(position: Point3f) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Replace the normal
    pub fn with_normal(mut self, normal: Vector3f) -> Self {
        self.normal = normal;
        self
    }

    /// Replace the texture coordinate
    pub fn with_tex_coord(mut self, tex_coord: Vector2f) -> Self {
        self.tex_coord = tex_coord;
        self
    }

    /// Replace the color
    pub fn with_color(mut self, color: Vector4f) -> Self {
        self.color = color;
        self
    }

    /// Identity key of this vertex
    pub fn key(&self) -> VertexKey {
        VertexKey::from_vertex(self)
    }

    /// `x² + y² + z²` of the position, the ordering key used when emitting
    /// a face's vertices into a cluster.
    pub fn squared_distance_from_origin(&self) -> f32 {
        let p = &self.position;
        (p.x * p.x) + (p.y * p.y) + (p.z * p.z)
    }

    /// A new vertex with the position moved by the world matrix and the
    /// normal by the rotation matrix. Texture coordinate and color are kept.
    pub fn transformed(&self, transform: &MeshTransform) -> Self {
        Self {
            position: transform.transform_point(&self.position),
            normal: transform.transform_normal(&self.normal),
            tex_coord: self.tex_coord,
            color: self.color,
        }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: Point3f::origin(),
            normal: Vector3f::new(0.0, 0.0, 1.0),
            tex_coord: Vector2f::zeros(),
            color: Vector4f::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Handle to a vertex identity interned in a [`VertexPool`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(u32);

impl VertexId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Interned vertex identities of one mesh.
///
/// Every distinct [`VertexKey`] is stored once and handed out as a
/// [`VertexId`]; ids are assigned in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct VertexPool {
    vertices: Vec<Vertex>,
    lookup: HashMap<VertexKey, VertexId>,
}

impl VertexPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of `vertex`, interning it if it has not been seen yet
    pub fn intern(&mut self, vertex: Vertex) -> VertexId {
        let next = VertexId(self.vertices.len() as u32);
        let id = *self.lookup.entry(vertex.key()).or_insert(next);
        if id == next {
            self.vertices.push(vertex);
        }
        id
    }

    /// Look up the id of an already interned vertex
    pub fn find(&self, vertex: &Vertex) -> Option<VertexId> {
        self.lookup.get(&vertex.key()).copied()
    }

    pub fn get(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    /// Number of distinct vertex identities
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId(i as u32), v))
    }
}
