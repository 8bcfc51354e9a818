//! Core data structures for ubxmesh
//!
//! This crate provides the types shared by the clustering and export crates:
//! vertices with exact bit-pattern identity, faces as sets of vertex
//! identities, the source meshes clustering consumes, the clusters it
//! produces, and the transforms applied to cluster vertices.

pub mod vertex;
pub mod face;
pub mod mesh;
pub mod transform;
pub mod error;

pub use vertex::*;
pub use face::*;
pub use mesh::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix3, Matrix4, UnitQuaternion};

/// Largest number of unique vertices one cluster may reference; the size of
/// the hardware vertex buffer.
pub const MAX_CLUSTER_VERTICES: usize = 32;
