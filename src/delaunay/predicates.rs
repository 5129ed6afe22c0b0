//! Pure geometric predicates used during insertion.
//!
//! Both predicates run in single precision. [`should_flip`] is the
//! angle-sum test (cosines first, sines only when the cosines disagree),
//! not an exact in-circle determinant; near-cocircular quadrilaterals may be
//! classified either way, and callers must not rely on a particular outcome
//! for them.

use crate::geometry::point::Point2;

/// Signed distances (scaled by edge length) of `p` from the three edges of
/// the counter-clockwise triangle `v`.
///
/// Entry `k` belongs to the edge opposite `v[k]`, running from `v[k+1]` to
/// `v[k+2]`. It is positive when `p` lies outside that edge.
#[inline]
pub fn edge_sides(v: [Point2; 3], p: Point2) -> [f32; 3] {
    std::array::from_fn(|k| {
        let a = v[(k + 1) % 3];
        let b = v[(k + 2) % 3];
        (p - a).dot((b - a).right_normal())
    })
}

/// Edge slot to walk across next, or `None` if `p` is inside (or on the
/// boundary of) the triangle within `tolerance`.
///
/// The most positive side wins; ties go to the lowest slot.
#[inline]
pub fn exit_slot(sides: [f32; 3], tolerance: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (k, &s) in sides.iter().enumerate() {
        if s > tolerance && best.is_none_or(|(_, b)| s > b) {
            best = Some((k, s));
        }
    }
    best.map(|(k, _)| k)
}

/// Whether the diagonal `v1`-`v2` separating the inserted point `p` from the
/// far vertex `v3` must be swapped for `p`-`v3`.
///
/// Let `a` be the angle at `v3` and `b` the angle at `p`, both subtending
/// `v1`-`v2`. The quadrilateral is legal when `a + b <= pi`. Both cosines
/// non-negative means both angles are at most a right angle: legal. Both
/// negative: illegal. Otherwise `sin(a + b) = sin a cos b + sin b cos a`
/// decides.
pub fn should_flip(p: Point2, v1: Point2, v2: Point2, v3: Point2) -> bool {
    let cos_a = (v1 - v3).dot(v2 - v3);
    let cos_b = (v2 - p).dot(v1 - p);
    if cos_a >= 0.0 && cos_b >= 0.0 {
        false
    } else if cos_a < 0.0 && cos_b < 0.0 {
        true
    } else {
        let sin_a = (v1 - v3).cross(v2 - v3);
        let sin_b = (v2 - p).cross(v1 - p);
        sin_a * cos_b + sin_b * cos_a < 0.0
    }
}

/// Whether `b` and `c` lie strictly on opposite sides of the line through
/// `p` and `d`, i.e. swapping diagonal `b`-`c` for `p`-`d` leaves two
/// counter-clockwise triangles.
#[inline]
pub fn separates(p: Point2, d: Point2, b: Point2, c: Point2) -> bool {
    let e = d - p;
    let sb = e.cross(b - p);
    let sc = e.cross(c - p);
    (sb > 0.0 && sc < 0.0) || (sb < 0.0 && sc > 0.0)
}
