//! Exporting scene objects as a UBX document
//!
//! An export composes each object's placement with the axis conversion,
//! clusters every object's mesh and gathers the results into one
//! [`UbxDocument`].

use crate::error::{IoError, IoResult};
use crate::ubx::UbxDocument;
use std::path::Path;
use ubxmesh_cluster::{cluster_meshes, ClusterOptions, GreedyClusterer, ParallelConfig};
use ubxmesh_core::{
    axis_conversion, Axis, Error, IndexedMesh, Matrix4, MeshTransform, SourceMesh, Triangle,
    UnitQuaternion,
};

/// Smallest and largest accepted precision scale
pub const PRECISION_SCALE_RANGE: std::ops::RangeInclusive<f32> = 1.0..=1000.0;

/// Configuration for an export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Upscale applied by the runtime to increase vertex precision
    pub precision_scale: f32,
    /// Do not allow non-adjacent triangles in one cluster
    pub use_local_clusters: bool,
    /// Axis the source forward direction (+Y) maps to
    pub forward_axis: Axis,
    /// Axis the source up direction (+Z) maps to
    pub up_axis: Axis,
    pub parallel: ParallelConfig,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            precision_scale: 100.0,
            use_local_clusters: false,
            forward_axis: Axis::Y,
            up_axis: Axis::Z,
            parallel: ParallelConfig::default(),
        }
    }
}

impl ExportOptions {
    pub fn with_precision_scale(mut self, precision_scale: f32) -> Self {
        self.precision_scale = precision_scale;
        self
    }

    pub fn with_local_clusters(mut self, enabled: bool) -> Self {
        self.use_local_clusters = enabled;
        self
    }

    pub fn with_axes(mut self, forward: Axis, up: Axis) -> Self {
        self.forward_axis = forward;
        self.up_axis = up;
        self
    }

    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// The axis conversion matrix, failing if the axes are unusable
    pub fn global_matrix(&self) -> IoResult<Matrix4<f32>> {
        Ok(axis_conversion(self.forward_axis, self.up_axis)?)
    }

    pub fn validate(&self) -> IoResult<()> {
        if !PRECISION_SCALE_RANGE.contains(&self.precision_scale) {
            return Err(Error::InvalidOption(format!(
                "Precision scale {} is outside {:?}",
                self.precision_scale, PRECISION_SCALE_RANGE
            ))
            .into());
        }
        self.global_matrix()?;
        Ok(())
    }
}

/// A mesh placed in the scene
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub triangles: Vec<Triangle>,
    pub world: Matrix4<f32>,
    pub rotation: UnitQuaternion<f32>,
}

impl SceneObject {
    /// An object at the origin with no rotation
    pub fn new<S: Into<String>>(name: S, triangles: Vec<Triangle>) -> Self {
        Self {
            name: name.into(),
            triangles,
            world: Matrix4::identity(),
            rotation: UnitQuaternion::identity(),
        }
    }

    pub fn from_indexed<S: Into<String>>(name: S, mesh: &IndexedMesh) -> IoResult<Self> {
        Ok(Self::new(name, mesh.to_triangles()?))
    }

    pub fn with_world(mut self, world: Matrix4<f32>) -> Self {
        self.world = world;
        self
    }

    pub fn with_rotation(mut self, rotation: UnitQuaternion<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    fn to_source_mesh(&self, global: &Matrix4<f32>) -> SourceMesh {
        SourceMesh::new(
            self.name.clone(),
            self.triangles.clone(),
            MeshTransform::from_object(global, &self.world, &self.rotation),
        )
    }
}

/// Clusters scene objects and builds UBX documents
#[derive(Debug, Clone)]
pub struct Exporter {
    options: ExportOptions,
}

impl Exporter {
    pub fn new(options: ExportOptions) -> IoResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Source meshes for `objects`, with the axis conversion folded into
    /// each object's transform
    pub fn prepare(&self, objects: &[SceneObject]) -> IoResult<Vec<SourceMesh>> {
        let global = self.options.global_matrix()?;
        Ok(objects.iter().map(|o| o.to_source_mesh(&global)).collect())
    }

    pub fn export(&self, objects: &[SceneObject]) -> IoResult<UbxDocument> {
        if objects.is_empty() {
            return Err(IoError::NoMeshes);
        }

        let meshes = self.prepare(objects)?;
        let clusterer = GreedyClusterer::with_options(
            ClusterOptions::new().with_local_clusters(self.options.use_local_clusters),
        );
        let clustered = cluster_meshes(&clusterer, &meshes, &self.options.parallel)?;

        log::info!(
            "exported {} meshes with {} clusters",
            clustered.len(),
            clustered.iter().map(|m| m.cluster_count()).sum::<usize>()
        );

        Ok(UbxDocument::from_meshes(self.options.precision_scale, &clustered))
    }

    /// Export `objects` and write the document to `path`
    pub fn export_to_file<P: AsRef<Path>>(
        &self,
        objects: &[SceneObject],
        path: P,
    ) -> IoResult<UbxDocument> {
        let document = self.export(objects)?;
        document.write(path.as_ref())?;
        log::info!("wrote {}", path.as_ref().display());
        Ok(document)
    }
}
