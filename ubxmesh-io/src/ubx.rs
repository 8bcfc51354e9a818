//! The UBX document: clustered meshes as structured text
//!
//! A document is a JSON object `{"meshes": [...], "precision_scale": s}`.
//! Each mesh is `{"clusters": [...], "name": ...}` and each cluster is
//! `{"indices": [...], "vertices": [...]}` with vertices written as
//! `{a, b, g, nx, ny, nz, r, u, v, x, y, z}`. Output is indented by four
//! spaces with keys in sorted order; the field declaration order below is
//! what keeps the keys sorted.
//!
//! Floats are written as the `f64` value of the `f32` component, so every
//! written number reads back to the identical `f32`.

use crate::error::{IoError, IoResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use ubxmesh_core::{Cluster, ClusteredMesh, Point3f, Vector2f, Vector3f, Vector4f, Vertex};

/// File extension of UBX documents
pub const UBX_EXTENSION: &str = "ubx";

/// One vertex as written to a UBX document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UbxVertex {
    pub a: f64,
    pub b: f64,
    pub g: f64,
    pub nx: f64,
    pub ny: f64,
    pub nz: f64,
    pub r: f64,
    pub u: f64,
    pub v: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<&Vertex> for UbxVertex {
    fn from(vertex: &Vertex) -> Self {
        let p = &vertex.position;
        let n = &vertex.normal;
        let t = &vertex.tex_coord;
        let c = &vertex.color;

        Self {
            a: c.w as f64,
            b: c.z as f64,
            g: c.y as f64,
            nx: n.x as f64,
            ny: n.y as f64,
            nz: n.z as f64,
            r: c.x as f64,
            u: t.x as f64,
            v: t.y as f64,
            x: p.x as f64,
            y: p.y as f64,
            z: p.z as f64,
        }
    }
}

impl UbxVertex {
    pub fn to_vertex(&self) -> Vertex {
        Vertex::new(
            Point3f::new(self.x as f32, self.y as f32, self.z as f32),
            Vector3f::new(self.nx as f32, self.ny as f32, self.nz as f32),
            Vector2f::new(self.u as f32, self.v as f32),
            Vector4f::new(self.r as f32, self.g as f32, self.b as f32, self.a as f32),
        )
    }
}

/// One cluster as written to a UBX document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UbxCluster {
    pub indices: Vec<u32>,
    pub vertices: Vec<UbxVertex>,
}

impl From<&Cluster> for UbxCluster {
    fn from(cluster: &Cluster) -> Self {
        Self {
            indices: cluster.indices.clone(),
            vertices: cluster.vertices.iter().map(UbxVertex::from).collect(),
        }
    }
}

/// One mesh as written to a UBX document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UbxMesh {
    pub clusters: Vec<UbxCluster>,
    pub name: String,
}

impl From<&ClusteredMesh> for UbxMesh {
    fn from(mesh: &ClusteredMesh) -> Self {
        Self {
            clusters: mesh.clusters.iter().map(UbxCluster::from).collect(),
            name: mesh.name.clone(),
        }
    }
}

/// A complete UBX document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UbxDocument {
    pub meshes: Vec<UbxMesh>,
    /// Scale the runtime applies to vertex data to gain precision
    pub precision_scale: f64,
}

impl UbxDocument {
    pub fn new(precision_scale: f32) -> Self {
        Self {
            meshes: Vec::new(),
            precision_scale: precision_scale as f64,
        }
    }

    pub fn from_meshes(precision_scale: f32, meshes: &[ClusteredMesh]) -> Self {
        Self {
            meshes: meshes.iter().map(UbxMesh::from).collect(),
            precision_scale: precision_scale as f64,
        }
    }

    pub fn push_mesh(&mut self, mesh: &ClusteredMesh) {
        self.meshes.push(UbxMesh::from(mesh));
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn find_mesh(&self, name: &str) -> Option<&UbxMesh> {
        self.meshes.iter().find(|m| m.name == name)
    }

    /// Write the document as indented, key-sorted JSON
    pub fn write_to<W: Write>(&self, writer: W) -> IoResult<()> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut serializer)?;
        Ok(())
    }

    pub fn to_json_string(&self) -> IoResult<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        // serde_json only ever emits UTF-8
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Write the document to `path`, replacing any existing file
    pub fn write<P: AsRef<Path>>(&self, path: P) -> IoResult<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn from_reader<R: Read>(reader: R) -> IoResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(json: &str) -> IoResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        Self::from_reader(std::io::BufReader::new(File::open(path)?))
    }
}
