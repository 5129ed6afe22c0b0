//! Connectivity validation shared by the triangulator and the grid generator.
//!
//! Checks, in order: vertex indices in range, neighbor indices in range,
//! adjacency symmetry (each link mirrored exactly once, across the same
//! edge) and, optionally, cell winding.

use crate::geometry::metrics::polygon_signed_area;
use crate::geometry::point::Point2;
use crate::mesh_error::MeshError;
use crate::topology::polygon::Cell;
use itertools::Itertools;

/// Optional validation toggles for connectivity checks.
#[derive(Debug, Clone, Copy)]
pub struct ConnectivityValidationOptions {
    /// Ensure each vertex index is within the point set.
    pub check_vertex_range: bool,
    /// Ensure each neighbor index is within the cell list.
    pub check_neighbor_range: bool,
    /// Ensure every link is mirrored across the shared edge.
    pub check_symmetry: bool,
    /// How to handle cells with zero area or the wrong winding.
    pub inverted_cells: InvertedCellHandling,
}

impl ConnectivityValidationOptions {
    /// Enable all connectivity checks, erroring on inverted cells.
    pub fn all() -> Self {
        Self {
            check_vertex_range: true,
            check_neighbor_range: true,
            check_symmetry: true,
            inverted_cells: InvertedCellHandling::Error,
        }
    }
}

impl Default for ConnectivityValidationOptions {
    fn default() -> Self {
        Self {
            inverted_cells: InvertedCellHandling::Ignore,
            ..Self::all()
        }
    }
}

/// Behavior for inverted or degenerate cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvertedCellHandling {
    /// Skip the area check.
    Ignore,
    /// Log a warning for each offending cell.
    Warn,
    /// Return an error on the first offending cell.
    Error,
}

/// Validate cell connectivity against a point set.
pub fn validate_connectivity<C: Cell>(
    points: &[Point2],
    cells: &[C],
    options: ConnectivityValidationOptions,
) -> Result<(), MeshError> {
    let num_points = points.len();
    let num_cells = cells.len();

    for (idx, cell) in cells.iter().enumerate() {
        if options.check_vertex_range {
            if let Some(&vertex) = cell.vertices().iter().find(|&&v| v >= num_points) {
                return Err(MeshError::VertexOutOfRange {
                    cell: idx,
                    vertex,
                    num_points,
                });
            }
        }
        if options.check_neighbor_range {
            if let Some(neighbor) = cell.neighbors().iter().flatten().find(|&&n| n >= num_cells) {
                return Err(MeshError::NeighborOutOfRange {
                    cell: idx,
                    neighbor: *neighbor,
                    num_cells,
                });
            }
        }
    }

    if options.check_symmetry {
        for (idx, cell) in cells.iter().enumerate() {
            for (slot, neighbor) in cell.neighbors().iter().enumerate() {
                let Some(neighbor) = *neighbor else { continue };
                let other = cells.get(neighbor).ok_or(MeshError::NeighborOutOfRange {
                    cell: idx,
                    neighbor,
                    num_cells,
                })?;
                let back_slots = other
                    .neighbors()
                    .iter()
                    .positions(|&n| n == Some(idx))
                    .collect_vec();
                let mirrored = match back_slots.as_slice() {
                    [back] => other.edge_key(*back) == cell.edge_key(slot),
                    _ => false,
                };
                if !mirrored {
                    return Err(MeshError::AsymmetricAdjacency {
                        cell: idx,
                        neighbor,
                        slot,
                    });
                }
            }
        }
    }

    if options.inverted_cells != InvertedCellHandling::Ignore {
        let expected_sign = C::CELL_TYPE.area_sign();
        for (idx, cell) in cells.iter().enumerate() {
            let loop_points = cell
                .vertices()
                .iter()
                .filter_map(|&v| points.get(v).copied())
                .collect_vec();
            let area = polygon_signed_area(&loop_points);
            if area * expected_sign > 0.0 {
                continue;
            }
            match options.inverted_cells {
                InvertedCellHandling::Warn => {
                    log::warn!("Inverted or degenerate cell detected: cell={idx} area={area}");
                }
                InvertedCellHandling::Error => {
                    return Err(MeshError::InvertedCell { cell: idx, area });
                }
                InvertedCellHandling::Ignore => {}
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::polygon::{Quad, Triangle};

    fn square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    fn two_triangles() -> Vec<Triangle> {
        // Diagonal 0-2: (0,1,2) and (0,2,3); the shared edge is opposite
        // vertex 1 in the first and vertex 3 in the second.
        vec![
            Triangle::with_neighbors([0, 1, 2], [None, Some(1), None]),
            Triangle::with_neighbors([0, 2, 3], [None, None, Some(0)]),
        ]
    }

    #[test]
    fn accepts_consistent_pair() {
        validate_connectivity(&square(), &two_triangles(), ConnectivityValidationOptions::all())
            .unwrap();
    }

    #[test]
    fn rejects_one_sided_link() {
        let mut tris = two_triangles();
        tris[1].neighbors[2] = None;
        let err = validate_connectivity(&square(), &tris, ConnectivityValidationOptions::all())
            .unwrap_err();
        assert!(matches!(
            err,
            MeshError::AsymmetricAdjacency {
                cell: 0,
                neighbor: 1,
                slot: 1
            }
        ));
    }

    #[test]
    fn rejects_link_across_wrong_edge() {
        let mut tris = two_triangles();
        tris[1].neighbors = [Some(0), None, None];
        let err = validate_connectivity(&square(), &tris, ConnectivityValidationOptions::all())
            .unwrap_err();
        assert!(matches!(err, MeshError::AsymmetricAdjacency { .. }));
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let mut tris = two_triangles();
        tris[0].vertices[2] = 9;
        let err = validate_connectivity(&square(), &tris, ConnectivityValidationOptions::all())
            .unwrap_err();
        assert!(matches!(err, MeshError::VertexOutOfRange { vertex: 9, .. }));

        let mut tris = two_triangles();
        tris[0].neighbors[0] = Some(5);
        let err = validate_connectivity(&square(), &tris, ConnectivityValidationOptions::all())
            .unwrap_err();
        assert!(matches!(err, MeshError::NeighborOutOfRange { neighbor: 5, .. }));
    }

    #[test]
    fn inverted_handling_respects_option() {
        let tris = vec![Triangle::new([0, 2, 1])];
        let err = validate_connectivity(&square(), &tris, ConnectivityValidationOptions::all())
            .unwrap_err();
        assert!(matches!(err, MeshError::InvertedCell { cell: 0, .. }));

        let lenient = ConnectivityValidationOptions {
            inverted_cells: InvertedCellHandling::Warn,
            ..ConnectivityValidationOptions::all()
        };
        validate_connectivity(&square(), &tris, lenient).unwrap();
    }

    #[test]
    fn grid_order_quad_is_well_wound() {
        // (row, col) order: (0,0), (1,0), (1,1), (0,1) on a 2x2 point grid.
        let quads = vec![Quad::new([0, 3, 2, 1])];
        validate_connectivity(&square(), &quads, ConnectivityValidationOptions::all()).unwrap();
    }
}
