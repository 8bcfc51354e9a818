//! Clustering demo for ubxmesh
//!
//! Generates procedural meshes, clusters them into 32-vertex groups and
//! writes the result as a UBX document. Set `RUST_LOG=debug` to watch
//! every cluster flush.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use ubxmesh_cluster::{ClusterOptions, GreedyClusterer, ParallelConfig};
use ubxmesh_core::{Axis, IndexedMesh, Matrix4, Point3f, Triangle, Vector4f, Vertex};
use ubxmesh_io::{ExportOptions, Exporter, SceneObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Shape {
    /// A rippled heightfield grid
    Grid,
    /// Several grids far apart from each other
    Islands,
    /// Random triangles over a small vertex palette
    Soup,
}

/// Cluster procedural meshes and export them as UBX
#[derive(Parser, Debug)]
#[command(name = "cluster_demo")]
#[command(about = "Cluster procedural meshes into 32-vertex groups", long_about = None)]
struct Args {
    /// Mesh to generate
    #[arg(long, value_enum, default_value = "grid")]
    shape: Shape,

    /// Grid side length in vertices
    #[arg(long, default_value_t = 16)]
    size: usize,

    /// Number of objects in the scene
    #[arg(long, default_value_t = 1)]
    objects: usize,

    /// Only group adjacent triangles into one cluster
    #[arg(long)]
    local_clusters: bool,

    /// Upscale applied by the runtime to increase vertex precision
    #[arg(long, default_value_t = 100.0)]
    precision_scale: f32,

    /// Forward axis of the exported space (X, Y, Z, -X, -Y, -Z)
    #[arg(long, default_value = "Y", allow_hyphen_values = true)]
    forward: Axis,

    /// Up axis of the exported space (X, Y, Z, -X, -Y, -Z)
    #[arg(long, default_value = "Z", allow_hyphen_values = true)]
    up: Axis,

    /// Worker threads for clustering several objects (0 = all cores)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Seed for the random soup
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Where to write the document
    #[arg(long, short, default_value = "scene.ubx")]
    output: PathBuf,
}

fn grid(size: usize, offset: f32) -> Result<Vec<Triangle>> {
    let mut mesh = IndexedMesh::new();
    let step = std::f32::consts::PI / (size - 1) as f32;
    for y in 0..size {
        for x in 0..size {
            let height = (x as f32 * step).sin() * (y as f32 * step).sin();
            mesh.add_vertex(Point3f::new(x as f32 + offset, y as f32, height));
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
    Ok(mesh.to_triangles()?)
}

fn islands(size: usize) -> Result<Vec<Triangle>> {
    let spacing = size as f32 * 2.0;
    let mut triangles = Vec::new();
    for i in 0..4 {
        triangles.extend(grid(size.min(6), i as f32 * spacing)?);
    }
    Ok(triangles)
}

fn soup(seed: u64, count: usize) -> Vec<Triangle> {
    let mut rng = StdRng::seed_from_u64(seed);
    let palette: Vec<Vertex> = (0..64)
        .map(|i| {
            Vertex::from_position(Point3f::new((i % 8) as f32, (i / 8) as f32, 0.0))
                .with_color(Vector4f::new(rng.gen(), rng.gen(), rng.gen(), 1.0))
        })
        .collect();

    (0..count)
        .map(|_| {
            let base = rng.gen_range(0..palette.len());
            [0, 1, 2].map(|_| palette[(base + rng.gen_range(0..9)) % palette.len()])
        })
        .collect()
}

fn build_scene(args: &Args) -> Result<Vec<SceneObject>> {
    anyhow::ensure!(args.size >= 2, "grid size must be at least 2");

    (0..args.objects)
        .map(|i| {
            let triangles = match args.shape {
                Shape::Grid => grid(args.size, 0.0)?,
                Shape::Islands => islands(args.size)?,
                Shape::Soup => soup(args.seed + i as u64, args.size * args.size),
            };
            let placement = Matrix4::new_translation(&Vector3::new(0.0, 0.0, i as f32 * 10.0));
            Ok(SceneObject::new(format!("{:?}{}", args.shape, i).to_lowercase(), triangles)
                .with_world(placement))
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let parallel = match args.threads {
        0 => ParallelConfig::default(),
        n => ParallelConfig::default().with_threads(n),
    };
    let options = ExportOptions::default()
        .with_precision_scale(args.precision_scale)
        .with_local_clusters(args.local_clusters)
        .with_axes(args.forward, args.up)
        .with_parallel(parallel);
    let exporter = Exporter::new(options).context("invalid export options")?;

    let objects = build_scene(&args)?;
    log::info!("generated {} objects", objects.len());

    let clusterer = GreedyClusterer::with_options(
        ClusterOptions::new().with_local_clusters(args.local_clusters),
    );
    for mesh in exporter.prepare(&objects)? {
        let (_, stats) = clusterer.cluster_with_stats(&mesh)?;
        println!(
            "{}: {} faces -> {} clusters, {} vertices ({:.2}x duplication, {:.0}% fill), {} duplicate faces dropped",
            mesh.name,
            mesh.face_count(),
            stats.cluster_count,
            stats.emitted_vertex_count,
            stats.duplication_ratio(),
            stats.average_fill() * 100.0,
            stats.duplicate_faces,
        );
    }

    let document = exporter
        .export_to_file(&objects, &args.output)
        .with_context(|| format!("failed to export {}", args.output.display()))?;
    println!(
        "Wrote {} meshes to {}",
        document.mesh_count(),
        args.output.display()
    );

    Ok(())
}
