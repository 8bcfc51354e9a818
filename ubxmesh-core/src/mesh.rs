//! Mesh data structures: clustering input and clustered output

use crate::error::{Error, Result};
use crate::transform::MeshTransform;
use crate::vertex::*;
use serde::{Deserialize, Serialize};

/// A triangle given as three full vertex attribute tuples
pub type Triangle = [Vertex; 3];

/// An indexed triangle mesh with optional per-vertex attributes.
///
/// This is the usual shape of mesh data coming out of a loader or a scene;
/// [`IndexedMesh::to_triangles`] expands it into the attribute tuples that
/// clustering works on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub normals: Option<Vec<Vector3f>>,
    pub tex_coords: Option<Vec<Vector2f>>,
    pub colors: Option<Vec<Vector4f>>,
}

impl IndexedMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            normals: None,
            tex_coords: None,
            colors: None,
        }
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            ..Self::new()
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Set vertex normals; ignored unless there is one per vertex
    pub fn set_normals(&mut self, normals: Vec<Vector3f>) {
        if normals.len() == self.vertices.len() {
            self.normals = Some(normals);
        }
    }

    /// Set texture coordinates; ignored unless there is one per vertex
    pub fn set_tex_coords(&mut self, tex_coords: Vec<Vector2f>) {
        if tex_coords.len() == self.vertices.len() {
            self.tex_coords = Some(tex_coords);
        }
    }

    /// Set vertex colors; ignored unless there is one per vertex
    pub fn set_colors(&mut self, colors: Vec<Vector4f>) {
        if colors.len() == self.vertices.len() {
            self.colors = Some(colors);
        }
    }

    /// Area-weighted vertex normals: the sum of incident face cross
    /// products, normalized. Vertices with no usable face get +Z.
    pub fn calculate_vertex_normals(&self) -> Vec<Vector3f> {
        let mut sums = vec![Vector3f::zeros(); self.vertices.len()];

        for face in &self.faces {
            if face.iter().any(|&i| i >= self.vertices.len()) {
                continue;
            }
            let v0 = self.vertices[face[0]];
            let v1 = self.vertices[face[1]];
            let v2 = self.vertices[face[2]];

            let cross = (v1 - v0).cross(&(v2 - v0));
            for &i in face {
                sums[i] += cross;
            }
        }

        sums.into_iter()
            .map(|n| n.try_normalize(1e-12).unwrap_or_else(Vector3f::z))
            .collect()
    }

    /// Expand every face into a [`Triangle`] of full vertex attributes.
    ///
    /// Missing texture coordinates become `(0, 0)`, missing colors opaque
    /// white and missing normals are computed from the faces.
    pub fn to_triangles(&self) -> Result<Vec<Triangle>> {
        if let Some((fi, face)) = self
            .faces
            .iter()
            .enumerate()
            .find(|(_, face)| face.iter().any(|&i| i >= self.vertices.len()))
        {
            return Err(Error::InvalidData(format!(
                "Face {} references vertex {:?} but the mesh has {} vertices",
                fi,
                face,
                self.vertices.len()
            )));
        }

        let computed;
        let normals = match &self.normals {
            Some(normals) => normals,
            None => {
                computed = self.calculate_vertex_normals();
                &computed
            }
        };
        let defaults = Vertex::default();

        let vertex = |i: usize| Vertex {
            position: self.vertices[i],
            normal: normals[i],
            tex_coord: self
                .tex_coords
                .as_ref()
                .map_or(defaults.tex_coord, |uvs| uvs[i]),
            color: self.colors.as_ref().map_or(defaults.color, |c| c[i]),
        };

        Ok(self
            .faces
            .iter()
            .map(|face| [vertex(face[0]), vertex(face[1]), vertex(face[2])])
            .collect())
    }
}

impl Default for IndexedMesh {
    fn default() -> Self {
        Self::new()
    }
}

/// A named, triangulated mesh ready to be clustered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMesh {
    pub name: String,
    pub triangles: Vec<Triangle>,
    pub transform: MeshTransform,
}

impl SourceMesh {
    pub fn new<S: Into<String>>(name: S, triangles: Vec<Triangle>, transform: MeshTransform) -> Self {
        Self {
            name: name.into(),
            triangles,
            transform,
        }
    }

    /// A mesh whose vertices are already in output space
    pub fn from_triangles<S: Into<String>>(name: S, triangles: Vec<Triangle>) -> Self {
        Self::new(name, triangles, MeshTransform::identity())
    }

    pub fn from_indexed<S: Into<String>>(
        name: S,
        mesh: &IndexedMesh,
        transform: MeshTransform,
    ) -> Result<Self> {
        Ok(Self::new(name, mesh.to_triangles()?, transform))
    }

    pub fn with_transform(mut self, transform: MeshTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn face_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// A group of triangles sharing one hardware vertex buffer.
///
/// `indices` holds three local indices per triangle, each pointing into
/// `vertices`. `face_indices` lists the source faces the triangles came
/// from, in emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub face_indices: Vec<usize>,
}

impl Cluster {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Local index triples, one per triangle
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }
}

/// The clusters produced for one source mesh, in creation order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteredMesh {
    pub name: String,
    pub clusters: Vec<Cluster>,
}

impl ClusteredMesh {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            clusters: Vec::new(),
        }
    }

    /// Append a cluster; empty clusters are ignored
    pub fn add_cluster(&mut self, cluster: Cluster) {
        if !cluster.is_empty() {
            self.clusters.push(cluster);
        }
    }

    /// A clustered mesh is valid once it holds at least one cluster
    pub fn is_valid(&self) -> bool {
        !self.clusters.is_empty()
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.clusters.iter().map(Cluster::triangle_count).sum()
    }

    /// Vertices emitted across all clusters, counting shared ones once per cluster
    pub fn vertex_count(&self) -> usize {
        self.clusters.iter().map(Cluster::vertex_count).sum()
    }

    /// Source face indices of every clustered triangle
    pub fn face_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.clusters
            .iter()
            .flat_map(|c| c.face_indices.iter().copied())
    }
}
