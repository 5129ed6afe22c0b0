//! Boundary-fitted structured quadrilateral grids.
//!
//! A channel between two curves `y = south(x)` and `y = north(x)` on
//! `[x_west, x_east]` is seeded by transfinite interpolation and then
//! relaxed towards a smooth, near-orthogonal mapping with Gauss-Seidel
//! sweeps of the Winslow equations (see [`relax`]). The boundary rows slide
//! along their curves while the interior relaxes.
//!
//! ```rust
//! use planar_mesh::structured::{generate_grid, GridConfig};
//! use planar_mesh::structured::curves::SineBump;
//!
//! let config = GridConfig::reference(5, 5);
//! let grid = generate_grid(
//!     &config,
//!     &SineBump::reference_south(),
//!     &SineBump::reference_north(),
//! )?;
//! assert!(grid.convergence.converged);
//! assert_eq!(grid.quads.len(), 16);
//! # Ok::<(), planar_mesh::mesh_error::MeshError>(())
//! ```

pub mod curves;
pub mod relax;

use crate::debug_invariants::DebugInvariants;
use crate::geometry::point::Point2;
use crate::io::MeshSink;
use crate::mesh_error::{InputError, MeshError};
use crate::topology::index_width;
use crate::topology::polygon::Quad;
use crate::topology::validation::{
    ConnectivityValidationOptions, InvertedCellHandling, validate_connectivity,
};
use curves::BoundaryCurve;
use relax::Relaxation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dimensions, domain and stopping rule of a grid run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Points per row (west to east).
    pub i_max: usize,
    /// Points per column (south to north).
    pub j_max: usize,
    pub x_west: f32,
    pub x_east: f32,
    /// Start of the curved part of the boundaries.
    pub bump_start: f32,
    /// End of the curved part of the boundaries.
    pub bump_end: f32,
    /// Hard cap on relaxation sweeps.
    pub max_iterations: usize,
    /// Stop once a sweep moves no coordinate by this much.
    pub tolerance: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::reference(26, 6)
    }
}

impl GridConfig {
    /// The reference channel `[0, 5]` with a feature on `[2, 3]`.
    pub fn reference(i_max: usize, j_max: usize) -> Self {
        Self {
            i_max,
            j_max,
            x_west: 0.0,
            x_east: 5.0,
            bump_start: 2.0,
            bump_end: 3.0,
            max_iterations: 15_000,
            tolerance: 9e-7,
        }
    }

    /// Reject dimensions or parameters the generator cannot work with.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.i_max < 3 || self.j_max < 3 {
            return Err(InputError::GridTooSmall {
                i_max: self.i_max,
                j_max: self.j_max,
            });
        }
        if !(self.x_west.is_finite() && self.x_east.is_finite() && self.x_west < self.x_east) {
            return Err(InputError::InvalidConfig(format!(
                "domain [{}, {}] is empty or not finite",
                self.x_west, self.x_east
            )));
        }
        if !(self.bump_start.is_finite()
            && self.bump_end.is_finite()
            && self.bump_start <= self.bump_end)
        {
            return Err(InputError::InvalidConfig(format!(
                "curved region [{}, {}] is not a finite interval",
                self.bump_start, self.bump_end
            )));
        }
        if self.max_iterations == 0 {
            return Err(InputError::InvalidConfig(
                "max_iterations must be at least 1".into(),
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(InputError::InvalidConfig(format!(
                "tolerance must be finite and > 0, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// How the relaxation ended. Hitting the cap is not an error.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Convergence {
    /// Sweeps performed.
    pub iterations: usize,
    /// Largest interior coordinate change in the last sweep.
    pub max_change: f32,
    /// `max_change < tolerance`.
    pub converged: bool,
}

/// A finished structured grid.
///
/// Point `(i, j)` is `points[j * i_max + i]`. Cell `(row, col)` is
/// `quads[row * (i_max - 1) + col]` with vertices `(row, col)`,
/// `(row + 1, col)`, `(row + 1, col + 1)`, `(row, col + 1)` and neighbors
/// west, north, east, south.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StructuredGrid {
    pub i_max: usize,
    pub j_max: usize,
    pub points: Vec<Point2>,
    pub quads: Vec<Quad>,
    pub convergence: Convergence,
}

/// Generate a grid between `south` and `north`.
///
/// Running out of sweeps is not an error; check
/// [`StructuredGrid::convergence`]. Grids with a single interior row
/// (`j_max == 3`) fit each curved boundary row from the opposite wall, so
/// their interior boundary points collapse onto the bump crest and the
/// iteration ends at the cap.
pub fn generate_grid<S, N>(
    config: &GridConfig,
    south: &S,
    north: &N,
) -> Result<StructuredGrid, MeshError>
where
    S: BoundaryCurve + ?Sized,
    N: BoundaryCurve + ?Sized,
{
    config.validate()?;
    let mut relaxation = Relaxation::seed(config, south, north);

    let mut iterations = 0;
    let mut max_change = f32::INFINITY;
    while iterations < config.max_iterations {
        max_change = relaxation.sweep();
        iterations += 1;
        if iterations % 5 == 0 {
            log::trace!("sweep {iterations}: max change {max_change:e}");
        }
        if max_change < config.tolerance {
            break;
        }
    }

    let convergence = Convergence {
        iterations,
        max_change,
        converged: max_change < config.tolerance,
    };
    if convergence.converged {
        log::debug!(
            "{}x{} grid converged after {iterations} sweeps (max change {max_change:e})",
            config.i_max,
            config.j_max
        );
    } else {
        log::warn!(
            "{}x{} grid stopped at the {iterations}-sweep cap (max change {max_change:e})",
            config.i_max,
            config.j_max
        );
    }

    let grid = StructuredGrid {
        i_max: config.i_max,
        j_max: config.j_max,
        points: relaxation.points,
        quads: build_quads(config.i_max, config.j_max),
        convergence,
    };
    grid.debug_assert_invariants();
    Ok(grid)
}

/// Quad connectivity for an `i_max x j_max` point lattice.
pub fn build_quads(i_max: usize, j_max: usize) -> Vec<Quad> {
    let cols = i_max.saturating_sub(1);
    let rows = j_max.saturating_sub(1);
    let cell = |r: usize, c: usize| r * cols + c;
    let mut quads = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let p = r * i_max + c;
            quads.push(Quad::with_neighbors(
                [p, p + i_max, p + i_max + 1, p + 1],
                [
                    (c > 0).then(|| cell(r, c - 1)),
                    (r + 1 < rows).then(|| cell(r + 1, c)),
                    (c + 1 < cols).then(|| cell(r, c + 1)),
                    (r > 0).then(|| cell(r - 1, c)),
                ],
            ));
        }
    }
    quads
}

impl StructuredGrid {
    /// Point at column `i`, row `j`.
    #[inline]
    pub fn point(&self, i: usize, j: usize) -> Point2 {
        self.points[j * self.i_max + i]
    }

    /// Hand points and quads to a consumer such as a renderer.
    pub fn feed<S: MeshSink + ?Sized>(&self, sink: &mut S) {
        sink.set_points(&self.points);
        sink.set_quads(&self.quads);
    }
}

impl DebugInvariants for StructuredGrid {
    fn validate_invariants(&self) -> Result<(), MeshError> {
        if self.points.len() != self.i_max * self.j_max {
            return Err(MeshError::VertexOutOfRange {
                cell: 0,
                vertex: self.i_max * self.j_max,
                num_points: self.points.len(),
            });
        }
        let options = ConnectivityValidationOptions {
            inverted_cells: InvertedCellHandling::Warn,
            ..ConnectivityValidationOptions::all()
        };
        validate_connectivity(&self.points, &self.quads, options)
    }
}

impl fmt::Display for StructuredGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = index_width((self.quads.len() * 4).max(self.points.len()));

        writeln!(f, "Quad Vertices:")?;
        for (i, q) in self.quads.iter().enumerate() {
            let [a, b, c, d] = q.vertices;
            writeln!(f, "{i:>w$} | {a:>w$} {b:>w$} {c:>w$} {d:>w$}")?;
        }
        writeln!(f)?;

        writeln!(f, "Quad Adjacencies:")?;
        for (i, q) in self.quads.iter().enumerate() {
            let [a, b, c, d] = q.raw_neighbors();
            writeln!(f, "{i:>w$} | {a:>w$} {b:>w$} {c:>w$} {d:>w$}")?;
        }
        writeln!(f)?;

        writeln!(f, "Points:")?;
        for (i, p) in self.points.iter().enumerate() {
            writeln!(f, "{i:>w$} | {:>8} {:>8}", p.x, p.y)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curves::SineBump;

    fn reference(i_max: usize, j_max: usize) -> Result<StructuredGrid, MeshError> {
        generate_grid(
            &GridConfig::reference(i_max, j_max),
            &SineBump::reference_south(),
            &SineBump::reference_north(),
        )
    }

    #[test]
    fn rejects_small_grids() {
        let err = reference(2, 5).unwrap_err();
        assert!(matches!(
            err,
            MeshError::Input(InputError::GridTooSmall { i_max: 2, j_max: 5 })
        ));
        assert!(reference(5, 2).is_err());
    }

    #[test]
    fn rejects_bad_parameters() {
        let cfg = GridConfig {
            max_iterations: 0,
            ..GridConfig::reference(5, 5)
        };
        assert!(matches!(cfg.validate(), Err(InputError::InvalidConfig(_))));
        let cfg = GridConfig {
            x_east: -1.0,
            ..GridConfig::reference(5, 5)
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn three_by_three_has_a_single_interior_point() {
        let grid = reference(3, 3).unwrap();
        assert_eq!(grid.points.len(), 9);
        assert_eq!(grid.quads.len(), 4);
        assert!(grid.convergence.converged);
    }

    #[test]
    fn iteration_cap_is_reported_not_raised() {
        let cfg = GridConfig {
            max_iterations: 1,
            ..GridConfig::reference(5, 5)
        };
        let grid = generate_grid(
            &cfg,
            &SineBump::reference_south(),
            &SineBump::reference_north(),
        )
        .unwrap();
        assert_eq!(grid.convergence.iterations, 1);
        assert!(!grid.convergence.converged);
        assert!(grid.convergence.max_change >= cfg.tolerance);
    }

    #[test]
    fn quad_layout_and_neighbors() {
        let quads = build_quads(4, 3);
        assert_eq!(quads.len(), 6);
        assert_eq!(quads[0].vertices, [0, 4, 5, 1]);
        assert_eq!(quads[0].neighbors, [None, Some(3), Some(1), None]);
        assert_eq!(quads[4].vertices, [5, 9, 10, 6]);
        assert_eq!(quads[4].neighbors, [Some(3), None, Some(5), Some(1)]);
    }

    #[test]
    fn display_prints_minus_one_at_borders() {
        let grid = reference(3, 3).unwrap();
        let text = grid.to_string();
        assert!(text.contains("Quad Adjacencies:\n 0 | -1  2  1 -1\n"));
    }
}
