//! Benchmarks for greedy clustering with and without local clusters

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ubxmesh_cluster::{ClusterOptions, GreedyClusterer, MeshClusterer};
use ubxmesh_core::{IndexedMesh, MeshTransform, Point3f, SourceMesh};

fn generate_grid_mesh(size: usize) -> SourceMesh {
    let mut vertices = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let fx = x as f32 / (size - 1) as f32 * std::f32::consts::PI;
            let fy = y as f32 / (size - 1) as f32 * std::f32::consts::PI;
            vertices.push(Point3f::new(
                x as f32,
                y as f32,
                (fx.sin() * fy.sin()) * 2.0,
            ));
        }
    }
    let mut faces = Vec::with_capacity((size - 1) * (size - 1) * 2);
    for y in 0..(size - 1) {
        for x in 0..(size - 1) {
            let tl = y * size + x;
            let tr = tl + 1;
            let bl = (y + 1) * size + x;
            let br = bl + 1;
            faces.push([tl, bl, tr]);
            faces.push([tr, bl, br]);
        }
    }
    let mesh = IndexedMesh::from_vertices_and_faces(vertices, faces);
    SourceMesh::from_indexed("grid", &mesh, MeshTransform::identity()).unwrap()
}

fn bench_clustering(c: &mut Criterion) {
    let sizes = [8, 16, 24];

    let mut group = c.benchmark_group("clustering");

    for &size in &sizes {
        let mesh = generate_grid_mesh(size);
        let face_count = mesh.face_count();

        for local in [false, true] {
            let name = if local { "local" } else { "fill" };
            group.bench_with_input(
                BenchmarkId::new(name, format!("{}f", face_count)),
                &mesh,
                |b, mesh| {
                    let clusterer = GreedyClusterer::with_options(
                        ClusterOptions::new().with_local_clusters(local),
                    );
                    b.iter(|| {
                        let result = clusterer.cluster(black_box(mesh)).unwrap();
                        black_box(result);
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_clustering);
criterion_main!(benches);
