//! # planar-mesh
//!
//! planar-mesh generates 2D computational meshes for numerical solvers. It provides two
//! independent generators that share one set of primitive types:
//!
//! ## Features
//! - Incremental Delaunay triangulation of arbitrary point clouds ([`delaunay`]), with
//!   serpentine spatial ordering, walking point location and stack-driven edge legalization
//! - Boundary-fitted structured quadrilateral grids ([`structured`]), seeded by transfinite
//!   interpolation and relaxed by Gauss-Seidel sweeps of the Winslow equations
//! - Index-based connectivity ([`topology`]) with symmetric adjacency, checked by
//!   [`DebugInvariants`] in debug builds and under the `check-invariants` feature
//! - Tecplot ASCII export and point-list import ([`io::tecplot`]), plus a [`io::MeshSink`]
//!   seam for handing finished meshes to a renderer
//!
//! ## Determinism
//!
//! Both generators are single-threaded and deterministic: the same input and configuration
//! produce bit-identical output. Tests that use random clouds fix their `SmallRng` seeds.
//!
//! ## Usage
//!
//! ```rust
//! use planar_mesh::prelude::*;
//!
//! let cloud = [
//!     Point2::new(0.0, 0.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(1.0, 1.5),
//!     Point2::new(1.0, 0.5),
//! ];
//! let mesh = triangulate(&cloud, TriangulatorConfig::default())?;
//! assert_eq!(mesh.triangles.len(), 3);
//!
//! let grid = generate_grid(
//!     &GridConfig::reference(5, 5),
//!     &SineBump::reference_south(),
//!     &SineBump::reference_north(),
//! )?;
//! assert_eq!(grid.points.len(), 25);
//! # Ok::<(), MeshError>(())
//! ```
//!
//! Logging goes through the [`log`] facade; install any logger to see run summaries.

pub mod debug_invariants;
pub mod delaunay;
pub mod geometry;
pub mod io;
pub mod mesh_error;
pub mod structured;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::delaunay::{Triangulation, TriangulatorConfig, triangulate};
    pub use crate::geometry::point::Point2;
    pub use crate::io::tecplot::{TecplotPointReader, TecplotWriter};
    pub use crate::io::{MeshSink, MeshWriter, PointReader, read_from_path, write_to_path};
    pub use crate::mesh_error::{InputError, MeshError};
    pub use crate::structured::curves::{BoundaryCurve, Flat, SineBump};
    pub use crate::structured::{Convergence, GridConfig, StructuredGrid, generate_grid};
    pub use crate::topology::cell_type::CellType;
    pub use crate::topology::polygon::{Cell, Quad, Triangle};
}
