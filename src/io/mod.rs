//! Mesh I/O: trait-based point readers and mesh writers, plus the ingestion
//! seam used to hand finished meshes to a renderer.
//!
//! Readers and writers work on any [`std::io::Read`] / [`std::io::Write`];
//! [`write_to_path`] and [`read_from_path`] are thin file wrappers. An I/O
//! failure never touches the in-memory mesh.

pub mod tecplot;

use crate::geometry::point::Point2;
use crate::mesh_error::MeshError;
use crate::topology::polygon::{Quad, Triangle};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Readers that produce a point cloud.
pub trait PointReader {
    /// Parse points from a reader.
    fn read<R: Read>(&self, reader: R) -> Result<Vec<Point2>, MeshError>;
}

/// Writers that serialize a mesh of type `M`.
pub trait MeshWriter<M: ?Sized> {
    /// Write `mesh` to a writer.
    fn write<W: Write>(&self, writer: W, mesh: &M) -> Result<(), MeshError>;
}

/// Write `mesh` to a new file at `path`, replacing any existing file.
pub fn write_to_path<M, F>(format: &F, mesh: &M, path: impl AsRef<Path>) -> Result<(), MeshError>
where
    M: ?Sized,
    F: MeshWriter<M>,
{
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    format.write(&mut out, mesh)?;
    out.flush()?;
    log::debug!("wrote mesh to {}", path.display());
    Ok(())
}

/// Read a point cloud from the file at `path`.
pub fn read_from_path<F: PointReader>(
    format: &F,
    path: impl AsRef<Path>,
) -> Result<Vec<Point2>, MeshError> {
    let path = path.as_ref();
    let points = format.read(BufReader::new(File::open(path)?))?;
    log::debug!("read {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Consumer of finished meshes, such as a renderer.
///
/// Generators never call a sink themselves; the caller passes one to
/// `Triangulation::feed` or `StructuredGrid::feed`.
pub trait MeshSink {
    fn set_points(&mut self, points: &[Point2]);

    fn set_triangles(&mut self, _triangles: &[Triangle]) {}

    fn set_quads(&mut self, _quads: &[Quad]) {}
}

/// Flat vertex and index buffers ready for upload to a GPU.
///
/// Triangles contribute three indices each, quads four.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderBuffers {
    /// Interleaved `x, y` coordinates.
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    /// Vertices per primitive in `indices` (0 until connectivity arrives).
    pub stride: usize,
}

impl RenderBuffers {
    fn set_indices(&mut self, stride: usize, cells: impl Iterator<Item = usize>) {
        self.stride = stride;
        self.indices.clear();
        self.indices.extend(cells.map(|v| v as u32));
    }
}

impl MeshSink for RenderBuffers {
    fn set_points(&mut self, points: &[Point2]) {
        self.vertices.clear();
        self.vertices.extend_from_slice(Point2::as_flat(points));
    }

    fn set_triangles(&mut self, triangles: &[Triangle]) {
        self.set_indices(3, triangles.iter().flat_map(|t| t.vertices));
    }

    fn set_quads(&mut self, quads: &[Quad]) {
        self.set_indices(4, quads.iter().flat_map(|q| q.vertices));
    }
}
