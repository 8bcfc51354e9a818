//! Integration tests for ubxmesh-cluster
//!
//! These tests cluster whole meshes and check the properties every result
//! must have: the vertex budget, index consistency, face coverage and
//! determinism, plus the expected outcome for a few hand-built meshes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use ubxmesh_cluster::*;
use ubxmesh_core::*;

fn vertex(x: f32, y: f32, z: f32) -> Vertex {
    Vertex::from_position(Point3f::new(x, y, z))
}

fn cluster(mesh: &SourceMesh, local: bool) -> ClusteredMesh {
    GreedyClusterer::with_options(ClusterOptions::new().with_local_clusters(local))
        .cluster(mesh)
        .unwrap()
}

/// A strip of `count` triangles in the plane z = `z`
fn strip(count: usize, z: f32) -> Vec<Triangle> {
    (0..count)
        .map(|i| {
            let x = (i / 2) as f32;
            if i % 2 == 0 {
                [vertex(x, 0.0, z), vertex(x + 1.0, 0.0, z), vertex(x, 1.0, z)]
            } else {
                [vertex(x + 1.0, 0.0, z), vertex(x + 1.0, 1.0, z), vertex(x, 1.0, z)]
            }
        })
        .collect()
}

/// `count` triangles that share no vertex with each other
fn disjoint(count: usize) -> Vec<Triangle> {
    (0..count)
        .map(|i| {
            let x = i as f32 * 3.0;
            [vertex(x, 0.0, 0.0), vertex(x + 1.0, 0.0, 0.0), vertex(x, 1.0, 0.0)]
        })
        .collect()
}

/// A triangle soup over a small vertex palette, so faces share vertices,
/// repeat each other and occasionally collapse.
fn random_soup(seed: u64, faces: usize) -> Vec<Triangle> {
    let mut rng = StdRng::seed_from_u64(seed);
    let palette: Vec<Vertex> = (0..48)
        .map(|i| vertex((i % 8) as f32, (i / 8) as f32, 0.0))
        .collect();

    (0..faces)
        .map(|_| {
            let base = rng.gen_range(0..palette.len());
            let pick = |rng: &mut StdRng| palette[(base + rng.gen_range(0..10)) % palette.len()];
            [pick(&mut rng), pick(&mut rng), pick(&mut rng)]
        })
        .collect()
}

fn identity_set(triangle: &Triangle) -> Vec<VertexKey> {
    let mut keys: Vec<VertexKey> = triangle.iter().map(Vertex::key).collect();
    keys.sort();
    keys.dedup();
    keys
}

/// Budget, index and coverage checks shared by every test mesh
fn assert_valid_clustering(source: &SourceMesh, clustered: &ClusteredMesh) {
    assert!(clustered.is_valid());

    for cluster in &clustered.clusters {
        assert!(cluster.vertex_count() <= MAX_CLUSTER_VERTICES);
        assert_eq!(cluster.indices.len(), 3 * cluster.face_indices.len());
        assert!(cluster
            .indices
            .iter()
            .all(|&i| (i as usize) < cluster.vertex_count()));
    }

    // every face appears at most once
    let mut seen = vec![0usize; source.face_count()];
    for face in clustered.face_indices() {
        seen[face] += 1;
    }
    assert!(seen.iter().all(|&n| n <= 1));

    // faces with three distinct identities group by their identity set;
    // exactly one face of each group survives, every other face survives
    let mut groups: HashMap<Vec<VertexKey>, Vec<usize>> = HashMap::new();
    for (i, triangle) in source.triangles.iter().enumerate() {
        let keys = identity_set(triangle);
        if keys.len() == 3 {
            groups.entry(keys).or_default().push(i);
        } else {
            assert_eq!(seen[i], 1, "degenerate face {} was dropped", i);
        }
    }
    for faces in groups.values() {
        let kept: usize = faces.iter().map(|&f| seen[f]).sum();
        assert_eq!(kept, 1, "faces {:?} should keep exactly one", faces);
    }
}

#[test]
fn test_shared_edge_quad() {
    let mesh = SourceMesh::from_triangles("quad", strip(2, 0.0));
    let clustered = cluster(&mesh, false);

    assert_eq!(clustered.cluster_count(), 1);
    assert_eq!(clustered.clusters[0].vertex_count(), 4);
    assert_eq!(clustered.clusters[0].indices.len(), 6);
    assert_valid_clustering(&mesh, &clustered);
}

#[test]
fn test_budget_overflow() {
    let mesh = SourceMesh::from_triangles("disjoint", disjoint(33));
    let clustered = cluster(&mesh, false);

    let triangles: Vec<usize> = clustered.clusters.iter().map(Cluster::triangle_count).collect();
    let vertices: Vec<usize> = clustered.clusters.iter().map(Cluster::vertex_count).collect();
    assert_eq!(triangles, vec![10, 10, 10, 3]);
    assert_eq!(vertices, vec![30, 30, 30, 9]);
    assert_valid_clustering(&mesh, &clustered);
}

#[test]
fn test_local_clusters_keep_islands_apart() {
    let island_a = strip(6, 0.0);
    let island_b = strip(6, 100.0);
    let split = island_a.len();
    let triangles: Vec<Triangle> = island_a.into_iter().chain(island_b).collect();
    let mesh = SourceMesh::from_triangles("islands", triangles);

    let local = cluster(&mesh, true);
    assert!(local.cluster_count() >= 2);
    for cluster in &local.clusters {
        let in_a = cluster.face_indices.iter().filter(|&&f| f < split).count();
        assert!(in_a == 0 || in_a == cluster.face_indices.len());
    }
    assert_valid_clustering(&mesh, &local);

    // 16 vertices in total, so filling merges both islands
    let filled = cluster(&mesh, false);
    assert_eq!(filled.cluster_count(), 1);
    assert_valid_clustering(&mesh, &filled);
}

#[test]
fn test_duplicate_face_removed() {
    let triangle = disjoint(1)[0];
    let rotated = [triangle[1], triangle[2], triangle[0]];
    let mesh = SourceMesh::from_triangles("dup", vec![triangle, rotated]);
    let clustered = cluster(&mesh, false);

    assert_eq!(clustered.triangle_count(), 1);
    assert_eq!(clustered.face_indices().collect::<Vec<_>>(), vec![0]);
    assert_valid_clustering(&mesh, &clustered);
}

#[test]
fn test_identity_strictness() {
    let mut triangles = strip(2, 0.0);
    // nudge the normal of one shared corner by a single ulp
    let shared = &mut triangles[1][0];
    shared.normal.z = f32::from_bits(shared.normal.z.to_bits() - 1);

    let mesh = SourceMesh::from_triangles("ulp", triangles);
    let clustered = cluster(&mesh, false);

    assert_eq!(clustered.cluster_count(), 1);
    assert_eq!(clustered.clusters[0].vertex_count(), 5);
    assert_eq!(clustered.clusters[0].indices.len(), 6);
}

#[test]
fn test_grid_respects_budget() {
    let size = 12;
    let mut mesh = IndexedMesh::new();
    for y in 0..size {
        for x in 0..size {
            mesh.add_vertex(Point3f::new(x as f32, y as f32, 0.0));
        }
    }
    for y in 0..size - 1 {
        for x in 0..size - 1 {
            let tl = y * size + x;
            let bl = tl + size;
            mesh.add_face([tl, bl, tl + 1]);
            mesh.add_face([tl + 1, bl, bl + 1]);
        }
    }
    let source = SourceMesh::from_indexed("grid", &mesh, MeshTransform::identity()).unwrap();

    for local in [false, true] {
        let clustered = cluster(&source, local);
        assert_eq!(clustered.triangle_count(), source.face_count());
        assert_valid_clustering(&source, &clustered);
    }
}

#[test]
fn test_random_soups() {
    for seed in 0..8 {
        let mesh = SourceMesh::from_triangles(format!("soup{}", seed), random_soup(seed, 150));
        for local in [false, true] {
            let clustered = cluster(&mesh, local);
            assert_valid_clustering(&mesh, &clustered);
        }
    }
}

#[test]
fn test_determinism() {
    let mesh = SourceMesh::from_triangles("soup", random_soup(42, 200))
        .with_transform(MeshTransform::translation(Vector3f::new(0.5, -2.0, 3.0)));

    let first = cluster(&mesh, false);
    let second = cluster(&mesh, false);
    assert_eq!(first, second);

    let keys = |m: &ClusteredMesh| -> Vec<VertexKey> {
        m.clusters
            .iter()
            .flat_map(|c| c.vertices.iter().map(Vertex::key))
            .collect()
    };
    assert_eq!(keys(&first), keys(&second));
}

#[test]
fn test_transform_applied_to_output_only() {
    let triangles = strip(4, 0.0);
    let transform = MeshTransform::translation(Vector3f::new(0.0, 0.0, 7.0));
    let moved = SourceMesh::new("moved", triangles.clone(), transform);
    let still = SourceMesh::from_triangles("still", triangles);

    let a = cluster(&moved, false);
    let b = cluster(&still, false);

    // transform does not change which faces go where
    assert_eq!(
        a.face_indices().collect::<Vec<_>>(),
        b.face_indices().collect::<Vec<_>>()
    );
    assert_eq!(a.clusters[0].indices, b.clusters[0].indices);
    for (va, vb) in a.clusters[0].vertices.iter().zip(&b.clusters[0].vertices) {
        assert_eq!(va.position.z, vb.position.z + 7.0);
    }
}

#[test]
fn test_parallel_many_meshes() {
    let meshes: Vec<SourceMesh> = (0..6)
        .map(|seed| SourceMesh::from_triangles(format!("soup{}", seed), random_soup(seed, 80)))
        .collect();

    let results = cluster_meshes(&GreedyClusterer::new(), &meshes, &ParallelConfig::default()).unwrap();
    assert_eq!(results.len(), meshes.len());
    for (source, clustered) in meshes.iter().zip(&results) {
        assert_eq!(source.name, clustered.name);
        assert_valid_clustering(source, clustered);
    }
}
