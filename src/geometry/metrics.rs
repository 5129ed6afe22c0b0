//! Signed area measures for generated cells.
//!
//! The vertex orderings match the connectivity records:
//! - Triangle: `[v0, v1, v2]`, counter-clockwise gives a positive area.
//! - Quadrilateral: `[v0, v1, v2, v3]`, evaluated as the shoelace sum, so the
//!   sign follows the winding of the vertex loop.

use crate::geometry::point::Point2;

/// Signed area of triangle `(a, b, c)`; positive when counter-clockwise.
#[inline]
pub fn triangle_signed_area(a: Point2, b: Point2, c: Point2) -> f32 {
    0.5 * (b - a).cross(c - a)
}

/// Signed area of a simple polygon given as a closed vertex loop.
pub fn polygon_signed_area(vertices: &[Point2]) -> f32 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0f32;
    for (i, &p) in vertices.iter().enumerate() {
        let q = vertices[(i + 1) % vertices.len()];
        twice_area += p.cross(q);
    }
    0.5 * twice_area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_triangle_area_has_orientation_sign() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(0.0, 1.0);
        assert_eq!(triangle_signed_area(a, b, c), 0.5);
        assert_eq!(triangle_signed_area(a, c, b), -0.5);
    }

    #[test]
    fn square_area_matches_shoelace() {
        let sq = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        assert_eq!(polygon_signed_area(&sq), 4.0);
        let mut cw = sq;
        cw.reverse();
        assert_eq!(polygon_signed_area(&cw), -4.0);
        assert_eq!(polygon_signed_area(&sq[..2]), 0.0);
    }
}
