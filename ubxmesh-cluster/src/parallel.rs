//! Clustering many meshes at once
//!
//! Meshes share no state, so each one is clustered on its own rayon task.
//! A single mesh is never split across threads.

use crate::MeshClusterer;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use ubxmesh_core::{ClusteredMesh, Error, Result, SourceMesh};

/// Thread pool configuration for multi-mesh clustering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Enable parallel processing (can be disabled for debugging)
    pub enabled: bool,
    /// Number of threads to use (None = rayon's global pool)
    pub num_threads: Option<usize>,
    /// Thread name prefix for a dedicated pool
    pub thread_name_prefix: String,
}

impl ParallelConfig {
    /// Run every mesh on the calling thread
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Set number of threads
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Enable or disable parallel processing
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            num_threads: None,
            thread_name_prefix: "ubxmesh-cluster".to_string(),
        }
    }
}

/// Cluster every mesh, returning the results in input order.
///
/// Fails with the first error in input order if any mesh fails.
pub fn cluster_meshes<C>(
    clusterer: &C,
    meshes: &[SourceMesh],
    config: &ParallelConfig,
) -> Result<Vec<ClusteredMesh>>
where
    C: MeshClusterer + Sync,
{
    if !config.enabled || meshes.len() < 2 {
        return meshes.iter().map(|mesh| clusterer.cluster(mesh)).collect();
    }

    let run = || {
        meshes
            .par_iter()
            .map(|mesh| clusterer.cluster(mesh))
            .collect::<Vec<_>>()
            .into_iter()
            .collect::<Result<Vec<_>>>()
    };

    match config.num_threads {
        None => run(),
        Some(num_threads) => {
            let prefix = config.thread_name_prefix.clone();
            let pool = ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .thread_name(move |index| format!("{}-{}", prefix, index))
                .build()
                .map_err(|e| Error::Algorithm(format!("Failed to create thread pool: {}", e)))?;
            pool.install(run)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GreedyClusterer;
    use ubxmesh_core::{Point3f, Vertex};

    fn meshes(count: usize) -> Vec<SourceMesh> {
        (0..count)
            .map(|m| {
                let triangles = (0..m + 1)
                    .map(|i| {
                        let x = i as f32;
                        [
                            Vertex::from_position(Point3f::new(x, 0.0, 0.0)),
                            Vertex::from_position(Point3f::new(x + 1.0, 0.0, 0.0)),
                            Vertex::from_position(Point3f::new(x, 1.0, 0.0)),
                        ]
                    })
                    .collect();
                SourceMesh::from_triangles(format!("mesh{}", m), triangles)
            })
            .collect()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let meshes = meshes(8);
        let clusterer = GreedyClusterer::new();

        let sequential = cluster_meshes(&clusterer, &meshes, &ParallelConfig::sequential()).unwrap();
        let parallel = cluster_meshes(&clusterer, &meshes, &ParallelConfig::default()).unwrap();
        let pooled =
            cluster_meshes(&clusterer, &meshes, &ParallelConfig::default().with_threads(2)).unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(sequential, pooled);
        let names: Vec<_> = parallel.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["mesh0", "mesh1", "mesh2", "mesh3", "mesh4", "mesh5", "mesh6", "mesh7"]);
    }

    #[test]
    fn test_error_is_reported() {
        let mut meshes = meshes(3);
        meshes.push(SourceMesh::from_triangles("empty", Vec::new()));

        let result = cluster_meshes(&GreedyClusterer::new(), &meshes, &ParallelConfig::default());
        assert!(matches!(result, Err(Error::EmptyMesh { .. })));
    }
}
