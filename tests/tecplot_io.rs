use planar_mesh::delaunay::{TriangulatorConfig, triangulate};
use planar_mesh::geometry::point::Point2;
use planar_mesh::io::tecplot::{TecplotPointReader, TecplotWriter};
use planar_mesh::io::{MeshWriter, PointReader, read_from_path, write_to_path};
use planar_mesh::mesh_error::MeshError;
use planar_mesh::structured::curves::SineBump;
use planar_mesh::structured::{GridConfig, generate_grid};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("planar-mesh-{}-{name}", std::process::id()))
}

fn cloud(seed: u64, n: usize) -> Vec<Point2> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point2::new(rng.gen_range(0.0..5.0), rng.gen_range(0.0..5.0)))
        .collect()
}

#[test]
fn triangulation_export_reads_back_as_the_same_points() {
    let pts = cloud(11, 50);
    let mesh = triangulate(&pts, TriangulatorConfig::default()).unwrap();

    let mut buf = Vec::new();
    TecplotWriter.write(&mut buf, &mesh).unwrap();
    let text = String::from_utf8(buf.clone()).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("TITLE = \"Delaunay Triangulation\""));
    assert_eq!(lines.next(), Some("VARIABLES = \"X\", \"Y\""));
    assert_eq!(
        lines.next(),
        Some(
            format!(
                "ZONE NODES=50, ELEMENTS={}, DATAPACKING=POINT, ZONETYPE=FETRIANGLE",
                mesh.triangles.len()
            )
            .as_str()
        )
    );
    // Connectivity lines are 1-based.
    let last = text.lines().last().unwrap();
    let ids: Vec<usize> = last
        .split_whitespace()
        .map(|s| s.parse().unwrap())
        .collect();
    let expected = mesh.triangles.last().unwrap().vertices.map(|v| v + 1);
    assert_eq!(ids, expected);

    let back = TecplotPointReader.read(buf.as_slice()).unwrap();
    assert_eq!(back, mesh.points);
}

#[test]
fn grid_export_declares_its_dimensions() {
    let grid = generate_grid(
        &GridConfig::reference(9, 4),
        &SineBump::reference_south(),
        &SineBump::reference_north(),
    )
    .unwrap();
    let mut buf = Vec::new();
    TecplotWriter.write(&mut buf, &grid).unwrap();
    let text = String::from_utf8(buf.clone()).unwrap();
    assert!(text.starts_with(
        "TITLE = \"2D Mesh Data\"\nVARIABLES = \"X\", \"Y\"\nZONE T=\"2D Mesh\", I=9, J=4, DATAPACKING=POINT\n"
    ));
    assert_eq!(text.lines().count(), 3 + 36);

    let back = TecplotPointReader.read(buf.as_slice()).unwrap();
    assert_eq!(back, grid.points);
}

#[test]
fn files_round_trip_through_the_filesystem() {
    let path = scratch_file("roundtrip.dat");
    let mesh = triangulate(&cloud(5, 20), TriangulatorConfig::default()).unwrap();
    write_to_path(&TecplotWriter, &mesh, &path).unwrap();
    let back = read_from_path(&TecplotPointReader, &path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(back, mesh.points);

    // A read cloud triangulates to the same mesh.
    let again = triangulate(&back, TriangulatorConfig::default()).unwrap();
    assert_eq!(again.triangles, mesh.triangles);
}

#[test]
fn export_failure_leaves_the_mesh_usable() {
    let mesh = triangulate(&cloud(8, 10), TriangulatorConfig::default()).unwrap();
    let path = scratch_file("missing-dir").join("mesh.dat");
    let err = write_to_path(&TecplotWriter, &mesh, &path).unwrap_err();
    assert!(matches!(err, MeshError::Io(_)));
    assert_eq!(mesh.points.len(), 10);

    let err = read_from_path(&TecplotPointReader, &path).unwrap_err();
    assert!(matches!(err, MeshError::Io(_)));
}

#[test]
fn triangulation_serializes_to_json() {
    let mesh = triangulate(&cloud(2, 12), TriangulatorConfig::default()).unwrap();
    let json = serde_json::to_string(&mesh).unwrap();
    let back: planar_mesh::delaunay::Triangulation = serde_json::from_str(&json).unwrap();
    assert_eq!(back.triangles, mesh.triangles);
    assert_eq!(back.points, mesh.points);
}
