//! Unit-square normalization and serpentine bin ordering.
//!
//! Insertion works in a normalized frame so that the tolerances and the
//! bootstrap triangle extent do not depend on the caller's units. Points are
//! then visited bin by bin in a serpentine sweep, which keeps consecutive
//! insertions close together and the point-location walks short.

use crate::geometry::point::Point2;
use serde::{Deserialize, Serialize};

/// Uniform scale-and-translate map into `[0, 1] x [0, 1]`.
///
/// The larger extent of the bounding box maps to 1, so aspect ratio is
/// preserved and the shorter side ends up in `[0, h]` with `h <= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Normalization {
    pub x_min: f32,
    pub y_min: f32,
    pub scale: f32,
}

impl Normalization {
    /// Fit the transform to a point cloud. Returns `None` for an empty cloud
    /// or one whose bounding box has zero extent in both directions.
    pub fn fit(points: &[Point2]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(lo, hi), p| {
                (
                    Point2::new(lo.x.min(p.x), lo.y.min(p.y)),
                    Point2::new(hi.x.max(p.x), hi.y.max(p.y)),
                )
            });
        let scale = (max.x - min.x).max(max.y - min.y);
        (scale > 0.0).then_some(Self {
            x_min: min.x,
            y_min: min.y,
            scale,
        })
    }

    /// Map a point into the unit square.
    #[inline]
    pub fn apply(&self, p: Point2) -> Point2 {
        Point2::new((p.x - self.x_min) / self.scale, (p.y - self.y_min) / self.scale)
    }

    /// Map a normalized point back to the caller's frame.
    #[inline]
    pub fn invert(&self, p: Point2) -> Point2 {
        Point2::new(p.x * self.scale + self.x_min, p.y * self.scale + self.y_min)
    }
}

/// Number of bin rows (and columns) for `n` points: `ceil(n^(1/4))`.
pub fn bin_rows(n: usize) -> usize {
    ((n as f64).powf(0.25).ceil() as usize).max(1)
}

/// Serpentine bin index of a normalized point.
///
/// Even rows count left to right, odd rows right to left, so bins that are
/// adjacent in index are adjacent in space. Indices start at 1.
pub fn bin_index(p: Point2, rows: usize) -> usize {
    // 0.999 keeps points on the far edge (coordinate 1.0) in the last bin.
    let scaled = rows as f32 * 0.999;
    let row = (p.y * scaled).max(0.0) as usize;
    let col = (p.x * scaled).max(0.0) as usize;
    if row % 2 == 1 {
        (row + 1) * rows - col
    } else {
        row * rows + col + 1
    }
}

/// Insertion order for normalized points: a stable sort by serpentine bin.
///
/// Returns a permutation; `order[k]` is the input index inserted `k`-th.
pub fn spatial_order(normalized: &[Point2]) -> Vec<usize> {
    let rows = bin_rows(normalized.len());
    let mut order: Vec<usize> = (0..normalized.len()).collect();
    order.sort_by_key(|&i| bin_index(normalized[i], rows));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fit_preserves_aspect_ratio() {
        let pts = [Point2::new(2.0, 1.0), Point2::new(6.0, 3.0)];
        let n = Normalization::fit(&pts).unwrap();
        assert_eq!(n.scale, 4.0);
        assert_eq!(n.apply(pts[0]), Point2::new(0.0, 0.0));
        assert_eq!(n.apply(pts[1]), Point2::new(1.0, 0.5));
    }

    #[test]
    fn fit_rejects_degenerate_clouds() {
        assert!(Normalization::fit(&[]).is_none());
        assert!(Normalization::fit(&[Point2::new(1.0, 1.0); 3]).is_none());
    }

    #[test]
    fn serpentine_bins_reverse_on_odd_rows() {
        assert_eq!(bin_rows(1), 1);
        assert_eq!(bin_rows(10), 2);
        assert_eq!(bin_rows(17), 3);
        assert_eq!(bin_index(Point2::new(0.1, 0.1), 2), 1);
        assert_eq!(bin_index(Point2::new(0.9, 0.1), 2), 2);
        assert_eq!(bin_index(Point2::new(0.9, 0.9), 2), 3);
        assert_eq!(bin_index(Point2::new(0.1, 0.9), 2), 4);
        assert_eq!(bin_index(Point2::new(1.0, 1.0), 2), 3);
    }

    #[test]
    fn spatial_order_is_stable_within_a_bin() {
        let pts = [
            Point2::new(0.9, 0.9),
            Point2::new(0.1, 0.1),
            Point2::new(0.2, 0.2),
            Point2::new(0.9, 0.1),
        ];
        assert_eq!(spatial_order(&pts), vec![1, 2, 3, 0]);
    }

    proptest! {
        #[test]
        fn normalize_round_trip(
            coords in prop::collection::vec((-1e3f32..1e3, -1e3f32..1e3), 2..64)
        ) {
            let pts: Vec<Point2> = coords.into_iter().map(Point2::from).collect();
            prop_assume!(Normalization::fit(&pts).is_some());
            let n = Normalization::fit(&pts).unwrap();
            for &p in &pts {
                let q = n.apply(p);
                prop_assert!((-1e-6..=1.0 + 1e-6).contains(&q.x));
                prop_assert!((-1e-6..=1.0 + 1e-6).contains(&q.y));
                let back = n.invert(q);
                // A few ulps of the bounding-box scale.
                let tol = 4.0 * f32::EPSILON * (n.scale + p.x.abs().max(p.y.abs()));
                prop_assert!((back.x - p.x).abs() <= tol, "{:?} -> {:?}", p, back);
                prop_assert!((back.y - p.y).abs() <= tol, "{:?} -> {:?}", p, back);
            }
        }
    }
}
