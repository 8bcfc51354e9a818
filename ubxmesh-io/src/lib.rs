//! UBX export for clustered meshes
//!
//! This crate turns scene objects into a UBX document: every object is
//! clustered into triangle groups of at most 32 vertices, and the groups
//! are written as key-sorted, indented JSON that can be read back.

pub mod error;
pub mod ubx;
pub mod export;

pub use error::*;
pub use ubx::{UbxCluster, UbxDocument, UbxMesh, UbxVertex, UBX_EXTENSION};
pub use export::{ExportOptions, Exporter, SceneObject, PRECISION_SCALE_RANGE};

use std::path::Path;

/// Export `objects` to `path` with the given options
pub fn export_ubx<P: AsRef<Path>>(
    objects: &[SceneObject],
    path: P,
    options: ExportOptions,
) -> IoResult<UbxDocument> {
    Exporter::new(options)?.export_to_file(objects, path)
}

/// Read a UBX document from `path`
pub fn read_ubx<P: AsRef<Path>>(path: P) -> IoResult<UbxDocument> {
    UbxDocument::read(path)
}

#[cfg(test)]
mod tests;
