//! Open/closed face bookkeeping for one clustering pass

use std::collections::{BTreeSet, HashSet};
use ubxmesh_core::{Face, SourceMesh, VertexId, VertexPool};

/// All mutable state of one clustering pass over one mesh.
///
/// Faces live in an arena indexed by their original face index. The open
/// set holds faces that have not been assigned yet and is always walked in
/// ascending index order; the closed list is the cluster currently being
/// built, together with the set of unique vertices it references.
#[derive(Debug, Clone)]
pub struct ClusteringContext {
    faces: Vec<Face>,
    pool: VertexPool,
    open: BTreeSet<usize>,
    closed: Vec<usize>,
    unique_vertices: HashSet<VertexId>,
    duplicates: Vec<usize>,
}

impl ClusteringContext {
    /// Intern every triangle of `mesh` and open all of its faces
    pub fn new(mesh: &SourceMesh) -> Self {
        let mut pool = VertexPool::new();
        let faces = mesh
            .triangles
            .iter()
            .enumerate()
            .map(|(index, triangle)| Face::from_triangle(index, triangle, &mut pool))
            .collect();

        Self::from_faces(faces, pool)
    }

    /// Build a context from faces whose `index()` equals their arena position
    pub fn from_faces(faces: Vec<Face>, pool: VertexPool) -> Self {
        debug_assert!(faces.iter().enumerate().all(|(i, f)| f.index() == i));

        let open = (0..faces.len()).collect();
        Self {
            faces,
            pool,
            open,
            closed: Vec::new(),
            unique_vertices: HashSet::new(),
            duplicates: Vec::new(),
        }
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn pool(&self) -> &VertexPool {
        &self.pool
    }

    pub fn has_open_faces(&self) -> bool {
        !self.open.is_empty()
    }

    pub fn open_face_count(&self) -> usize {
        self.open.len()
    }

    /// True when no face has been added to the current cluster yet
    pub fn is_cluster_empty(&self) -> bool {
        self.closed.is_empty()
    }

    /// Faces of the current cluster, in the order they were added
    pub fn closed_faces(&self) -> &[usize] {
        &self.closed
    }

    /// Unique vertices referenced by the current cluster
    pub fn unique_vertex_count(&self) -> usize {
        self.unique_vertices.len()
    }

    /// Faces dropped as duplicates so far, in the order they were found
    pub fn duplicate_faces(&self) -> &[usize] {
        &self.duplicates
    }

    /// First open face in enumeration order
    pub fn first_open_face(&self) -> Option<usize> {
        self.open.first().copied()
    }

    /// Move the first open face into the current cluster
    pub fn seed(&mut self) -> Option<usize> {
        let face = self.first_open_face()?;
        self.close_face(face);
        Some(face)
    }

    /// Move `face` from the open set into the current cluster
    pub fn close_face(&mut self, face: usize) {
        let removed = self.open.remove(&face);
        debug_assert!(removed, "face {} is not open", face);

        self.unique_vertices
            .extend(self.faces[face].vertices().iter().copied());
        self.closed.push(face);
    }

    /// Vertices of `face` that the current cluster does not reference yet
    pub fn new_vertex_count(&self, face: usize) -> usize {
        self.faces[face]
            .vertices()
            .iter()
            .filter(|v| !self.unique_vertices.contains(v))
            .count()
    }

    /// Sum of vertices shared between `face` and each face of the current
    /// cluster, or `None` if some cluster face has the same three vertices.
    pub fn adjacency_score(&self, face: usize) -> Option<usize> {
        let candidate = &self.faces[face];
        let mut score = 0;

        for &closed in &self.closed {
            let shared = candidate.shared_vertex_count(&self.faces[closed]);
            if shared == 3 {
                return None;
            }
            score += shared;
        }

        Some(score)
    }

    /// Scan the open set for the face sharing the most vertices with the
    /// current cluster.
    ///
    /// Only a strictly higher score replaces the best candidate, so ties go
    /// to the lowest face index. Duplicates of a cluster face met during the
    /// scan are removed from the open set. Returns `None` when no open face
    /// shares any vertex with the cluster.
    pub fn find_best_candidate(&mut self) -> Option<usize> {
        let mut best = None;
        let mut best_score = 0;
        let mut found_duplicates = Vec::new();

        for &face in &self.open {
            match self.adjacency_score(face) {
                None => found_duplicates.push(face),
                Some(score) if score > best_score => {
                    best = Some(face);
                    best_score = score;
                }
                Some(_) => {}
            }
        }

        for face in found_duplicates {
            log::trace!("dropping face {} as a duplicate", face);
            self.open.remove(&face);
            self.duplicates.push(face);
        }

        best
    }

    /// Finish the current cluster: return its faces and start an empty one
    pub fn take_cluster(&mut self) -> Vec<usize> {
        self.unique_vertices.clear();
        std::mem::take(&mut self.closed)
    }
}
