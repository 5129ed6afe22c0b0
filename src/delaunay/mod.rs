//! Incremental Delaunay triangulation of a planar point cloud.
//!
//! The pipeline is:
//! 1. validate the input (at least three distinct, finite, non-collinear points),
//! 2. normalize into the unit square and order points by serpentine bins,
//! 3. bootstrap with one enclosing triangle and insert points one at a time,
//!    legalizing edges through a LIFO work stack,
//! 4. drop every triangle touching a bootstrap vertex and renumber,
//! 5. map points back to the caller's frame and input order.
//!
//! # Example
//! ```rust
//! use planar_mesh::delaunay::{triangulate, TriangulatorConfig};
//! use planar_mesh::geometry::Point2;
//!
//! let square = [
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ];
//! let mesh = triangulate(&square, TriangulatorConfig::default())?;
//! assert_eq!(mesh.triangles.len(), 2);
//! # Ok::<(), planar_mesh::mesh_error::MeshError>(())
//! ```

pub mod insertion;
pub mod normalize;
pub mod predicates;

use crate::debug_invariants::DebugInvariants;
use crate::geometry::point::Point2;
use crate::io::MeshSink;
use crate::mesh_error::{InputError, MeshError};
use crate::topology::index_width;
use crate::topology::polygon::Triangle;
use crate::topology::validation::{
    ConnectivityValidationOptions, InvertedCellHandling, validate_connectivity,
};
use hashbrown::HashMap;
use insertion::Insertion;
use normalize::{Normalization, spatial_order};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tunable constants of the triangulator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriangulatorConfig {
    /// Half-size of the bootstrap triangle around the unit square. Only
    /// point location sees these coordinates; legalization treats the
    /// bootstrap vertices as infinitely far away.
    pub super_triangle_extent: f32,
    /// Side value below which a point counts as on or inside an edge.
    pub edge_tolerance: f32,
    /// Sine of the largest angle still treated as collinear when screening input.
    pub collinear_tolerance: f64,
}

impl Default for TriangulatorConfig {
    fn default() -> Self {
        Self {
            super_triangle_extent: 100.0,
            edge_tolerance: 1e-10,
            collinear_tolerance: 1e-6,
        }
    }
}

impl TriangulatorConfig {
    /// Reject parameters the algorithm cannot work with.
    pub fn validate(&self) -> Result<(), InputError> {
        if !(self.super_triangle_extent.is_finite() && self.super_triangle_extent > 1.0) {
            return Err(InputError::InvalidConfig(format!(
                "super_triangle_extent must be finite and > 1, got {}",
                self.super_triangle_extent
            )));
        }
        if !(self.edge_tolerance.is_finite() && self.edge_tolerance >= 0.0) {
            return Err(InputError::InvalidConfig(format!(
                "edge_tolerance must be finite and >= 0, got {}",
                self.edge_tolerance
            )));
        }
        if !(self.collinear_tolerance.is_finite() && self.collinear_tolerance >= 0.0) {
            return Err(InputError::InvalidConfig(format!(
                "collinear_tolerance must be finite and >= 0, got {}",
                self.collinear_tolerance
            )));
        }
        Ok(())
    }
}

/// Counters from one triangulation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriangulationStats {
    /// Diagonal swaps performed during legalization.
    pub flips: usize,
    /// Triangle-to-triangle steps taken by point location.
    pub walk_steps: usize,
}

/// A finished triangulation.
///
/// `points` are the caller's points in the caller's order; triangle vertex
/// indices refer to them. Triangles are counter-clockwise and neighbor slot
/// `k` is across the edge opposite vertex `k`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Triangulation {
    pub points: Vec<Point2>,
    pub triangles: Vec<Triangle>,
    /// Transform used internally; `apply` maps `points` into the unit square.
    pub normalization: Normalization,
    pub stats: TriangulationStats,
}

/// Triangulate `points`.
///
/// Fails with [`InputError`] for fewer than three points, non-finite or
/// coincident points, or an entirely collinear cloud, before any
/// triangulation work starts.
pub fn triangulate(
    points: &[Point2],
    config: TriangulatorConfig,
) -> Result<Triangulation, MeshError> {
    config.validate()?;
    let normalization = screen_input(points, &config)?;
    let n = points.len();

    let normalized: Vec<Point2> = points.iter().map(|&p| normalization.apply(p)).collect();
    let order = spatial_order(&normalized);
    let sorted = order.iter().map(|&i| normalized[i]).collect();

    let mut insertion = Insertion::new(
        sorted,
        config.super_triangle_extent,
        config.edge_tolerance,
    );
    for i in 0..insertion.real_points() {
        insertion.insert(i)?;
    }

    let triangles = remove_super_triangle(&insertion.triangles, &order);

    let mut out_points = vec![Point2::ORIGIN; n];
    for (sorted_idx, &input_idx) in order.iter().enumerate() {
        out_points[input_idx] = normalization.invert(insertion.points[sorted_idx]);
    }

    let stats = TriangulationStats {
        flips: insertion.flips,
        walk_steps: insertion.walk_steps,
    };
    log::debug!(
        "triangulated {n} points into {} triangles ({} flips, {} walk steps)",
        triangles.len(),
        stats.flips,
        stats.walk_steps
    );

    let mesh = Triangulation {
        points: out_points,
        triangles,
        normalization,
        stats,
    };
    mesh.debug_assert_invariants();
    Ok(mesh)
}

/// Input checks; returns the normalization on success.
fn screen_input(points: &[Point2], config: &TriangulatorConfig) -> Result<Normalization, InputError> {
    if points.len() < 3 {
        return Err(InputError::TooFewPoints {
            found: points.len(),
        });
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(InputError::NonFinitePoint { index });
    }
    let normalization =
        Normalization::fit(points).ok_or(InputError::DuplicatePoint { first: 0, second: 1 })?;

    // Coincidence is judged in the normalized frame the algorithm works in.
    let mut seen: HashMap<(u32, u32), usize> = HashMap::with_capacity(points.len());
    for (index, &p) in points.iter().enumerate() {
        let q = normalization.apply(p);
        // `+ 0.0` folds -0.0 into 0.0 before comparing bit patterns.
        let key = ((q.x + 0.0).to_bits(), (q.y + 0.0).to_bits());
        if let Some(&first) = seen.get(&key) {
            return Err(InputError::DuplicatePoint {
                first,
                second: index,
            });
        }
        seen.insert(key, index);
    }

    if all_collinear(points, config.collinear_tolerance) {
        return Err(InputError::CollinearPoints);
    }
    Ok(normalization)
}

/// Every point within `tolerance` (as a sine) of the line through point 0
/// and the point farthest from it. Evaluated in `f64`.
fn all_collinear(points: &[Point2], tolerance: f64) -> bool {
    let to_f64 = |p: Point2| (p.x as f64, p.y as f64);
    let (ax, ay) = to_f64(points[0]);
    let rel = |p: Point2| {
        let (x, y) = to_f64(p);
        (x - ax, y - ay)
    };
    let Some((bx, by)) = points
        .iter()
        .map(|&p| rel(p))
        .max_by(|u, v| (u.0.hypot(u.1)).total_cmp(&v.0.hypot(v.1)))
    else {
        return true;
    };
    let base = bx.hypot(by);
    points.iter().all(|&p| {
        let (px, py) = rel(p);
        let cross = bx * py - by * px;
        cross.abs() <= tolerance * base * px.hypot(py)
    })
}

/// Drop triangles that use a bootstrap vertex, renumber the survivors
/// contiguously and map vertex indices from insertion order to input order.
///
/// `order[k]` is the input index of the `k`-th inserted point; any vertex
/// index `>= order.len()` is a bootstrap vertex.
fn remove_super_triangle(triangles: &[Triangle], order: &[usize]) -> Vec<Triangle> {
    let n = order.len();
    let mut renumber: Vec<Option<usize>> = Vec::with_capacity(triangles.len());
    let mut kept = 0usize;
    for tri in triangles {
        if tri.vertices.iter().all(|&v| v < n) {
            renumber.push(Some(kept));
            kept += 1;
        } else {
            renumber.push(None);
        }
    }

    triangles
        .iter()
        .zip(&renumber)
        .filter(|(_, new_idx)| new_idx.is_some())
        .map(|(tri, _)| {
            // A link to a removed triangle becomes a hull edge.
            let neighbors = tri.neighbors.map(|nb| match nb {
                Some(old) => renumber[old],
                None => None,
            });
            Triangle::with_neighbors(tri.vertices.map(|v| order[v]), neighbors)
        })
        .collect()
}

impl Triangulation {
    /// Number of hull edges (neighbor slots without a triangle).
    pub fn hull_edges(&self) -> usize {
        self.triangles.iter().map(Triangle::boundary_edges).sum()
    }

    /// Hand points and triangles to a consumer such as a renderer.
    pub fn feed<S: MeshSink + ?Sized>(&self, sink: &mut S) {
        sink.set_points(&self.points);
        sink.set_triangles(&self.triangles);
    }
}

impl DebugInvariants for Triangulation {
    fn validate_invariants(&self) -> Result<(), MeshError> {
        let options = ConnectivityValidationOptions {
            inverted_cells: InvertedCellHandling::Warn,
            ..ConnectivityValidationOptions::all()
        };
        validate_connectivity(&self.points, &self.triangles, options)
    }
}

impl fmt::Display for Triangulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = index_width((self.triangles.len() * 3).max(self.points.len()));

        writeln!(f, "Triangle Vertices:")?;
        for (i, tri) in self.triangles.iter().enumerate() {
            let [a, b, c] = tri.vertices;
            writeln!(f, "{i:>w$} | {a:>w$} {b:>w$} {c:>w$}")?;
        }
        writeln!(f)?;

        writeln!(f, "Triangle Adjacencies:")?;
        for (i, tri) in self.triangles.iter().enumerate() {
            let [a, b, c] = tri.raw_neighbors();
            writeln!(f, "{i:>w$} | {a:>w$} {b:>w$} {c:>w$}")?;
        }
        writeln!(f)?;

        writeln!(f, "Points:")?;
        for (i, p) in self.points.iter().enumerate() {
            writeln!(f, "{i:>w$} | {:>8} {:>8}", p.x, p.y)?;
        }
        Ok(())
    }
}
