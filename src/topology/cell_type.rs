//! Cell type metadata for generated meshes.

use serde::{Deserialize, Serialize};

/// Cell shapes produced by the generators.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CellType {
    /// 2D simplex from the Delaunay triangulator.
    Triangle,
    /// 2D tensor-product cell from the structured grid generator.
    Quadrilateral,
}

impl CellType {
    /// Number of vertices (and neighbor slots) per cell.
    pub const fn vertex_count(self) -> usize {
        match self {
            CellType::Triangle => 3,
            CellType::Quadrilateral => 4,
        }
    }

    /// Tecplot finite-element zone type keyword.
    pub const fn tecplot_zone_type(self) -> &'static str {
        match self {
            CellType::Triangle => "FETRIANGLE",
            CellType::Quadrilateral => "FEQUADRILATERAL",
        }
    }

    /// Sign of the shoelace area for a well-formed cell of this type.
    ///
    /// Triangles are wound counter-clockwise. Quads follow the grid order
    /// `(row, col), (row+1, col), (row+1, col+1), (row, col+1)`, which is
    /// clockwise in the `x`-`y` plane.
    pub const fn area_sign(self) -> f32 {
        match self {
            CellType::Triangle => 1.0,
            CellType::Quadrilateral => -1.0,
        }
    }
}
