//! Incremental insertion: point location, triangle split and stack-driven
//! legalization.
//!
//! Every triangle is kept counter-clockwise. Triangles created around the
//! point being inserted carry it as vertex 0, so the edge that may need
//! legalizing is always neighbor slot 0.
//!
//! The bootstrap vertices take part in the walk with their real coordinates
//! but are treated as infinitely far away when legalizing, so that hull
//! edges between real points are never traded for edges to the bootstrap
//! triangle.

use crate::delaunay::predicates::{edge_sides, exit_slot, separates, should_flip};
use crate::geometry::point::Point2;
use crate::mesh_error::MeshError;
use crate::topology::polygon::Triangle;

/// Working arrays for one triangulation run.
#[derive(Debug)]
pub(crate) struct Insertion {
    /// Normalized points, bootstrap vertices last.
    pub points: Vec<Point2>,
    pub triangles: Vec<Triangle>,
    /// LIFO of triangles whose slot-0 edge awaits the in-circle test.
    stack: Vec<usize>,
    edge_tolerance: f32,
    /// Diagonal swaps performed so far.
    pub flips: usize,
    /// Triangle-to-triangle steps taken by point location so far.
    pub walk_steps: usize,
}

impl Insertion {
    /// Bootstrap with `points` followed by the three vertices of a triangle
    /// enclosing the unit square by `extent` on every side.
    pub fn new(mut points: Vec<Point2>, extent: f32, edge_tolerance: f32) -> Self {
        let n = points.len();
        points.extend([
            Point2::new(-extent, -extent),
            Point2::new(extent, -extent),
            Point2::new(0.0, extent),
        ]);
        // Each insertion nets two triangles.
        let mut triangles = Vec::with_capacity(2 * n + 1);
        triangles.push(Triangle::new([n, n + 1, n + 2]));
        Self {
            points,
            triangles,
            stack: Vec::with_capacity(n.max(3)),
            edge_tolerance,
            flips: 0,
            walk_steps: 0,
        }
    }

    /// Number of real (non-bootstrap) points.
    pub fn real_points(&self) -> usize {
        self.points.len() - 3
    }

    /// Insert real point `i` and restore the Delaunay property around it.
    pub fn insert(&mut self, i: usize) -> Result<(), MeshError> {
        let start = self.triangles.len() - 1;
        let t = self.locate(i, start)?;
        self.split(t, i);
        self.legalize(i);
        Ok(())
    }

    fn corners(&self, t: usize) -> [Point2; 3] {
        self.triangles[t].vertices.map(|v| self.points[v])
    }

    /// Walk from triangle `start` towards point `i` until a triangle contains it.
    pub fn locate(&mut self, i: usize, start: usize) -> Result<usize, MeshError> {
        let target = self.points[i];
        let budget = 3 * self.triangles.len() + 16;
        let mut t = start;
        for step in 0..budget {
            let sides = edge_sides(self.corners(t), target);
            let Some(slot) = exit_slot(sides, self.edge_tolerance) else {
                self.walk_steps += step;
                return Ok(t);
            };
            t = self.triangles[t].neighbors[slot].ok_or(MeshError::PointLocation {
                point: i,
                steps: step + 1,
            })?;
        }
        Err(MeshError::PointLocation {
            point: i,
            steps: budget,
        })
    }

    /// Replace triangle `t = (a, b, c)` by `(p, b, c)`, `(p, c, a)` and
    /// `(p, a, b)`, reusing slot `t` for the first.
    pub fn split(&mut self, t: usize, p: usize) {
        let Triangle {
            vertices: [a, b, c],
            neighbors: [na, nb, nc],
        } = self.triangles[t];
        let t1 = self.triangles.len();
        let t2 = t1 + 1;

        self.triangles[t] = Triangle::with_neighbors([p, b, c], [na, Some(t1), Some(t2)]);
        self.triangles
            .push(Triangle::with_neighbors([p, c, a], [nb, Some(t2), Some(t)]));
        self.triangles
            .push(Triangle::with_neighbors([p, a, b], [nc, Some(t), Some(t1)]));

        // `na` still borders slot `t`; the other two outer neighbors moved.
        self.relink(nb, t, t1);
        self.relink(nc, t, t2);

        for tri in [t, t1, t2] {
            self.push_if_interior(tri);
        }
    }

    /// In `cell`, replace the neighbor link to `old` with `new`.
    fn relink(&mut self, cell: Option<usize>, old: usize, new: usize) {
        let Some(cell) = cell else { return };
        if let Some(slot) = self.triangles[cell].slot_of(old) {
            self.triangles[cell].neighbors[slot] = Some(new);
        }
    }

    fn push_if_interior(&mut self, t: usize) {
        if self.triangles[t].neighbors[0].is_some() {
            self.stack.push(t);
        }
    }

    /// Drain the work stack, flipping every illegal edge opposite `p`.
    fn legalize(&mut self, p: usize) {
        while let Some(l) = self.stack.pop() {
            let Some(r) = self.triangles[l].neighbors[0] else {
                continue;
            };
            let [_, b, c] = self.triangles[l].vertices;
            let Some(k) = self.triangles[r]
                .vertices
                .iter()
                .position(|&v| v != b && v != c)
            else {
                continue;
            };
            let far = self.triangles[r].vertices[k];
            if self.is_illegal(p, b, c, far) {
                self.flip(l, r, k);
                self.flips += 1;
                self.push_if_interior(l);
                self.push_if_interior(r);
            }
        }
    }

    /// Whether edge `b`-`c`, seen from the new point `p` and the far vertex
    /// `far`, must be swapped for `p`-`far`.
    ///
    /// Quadrilaterals of real points use the angle-sum test. Otherwise an
    /// edge between two bootstrap vertices is always kept, and of the two
    /// diagonals the one whose lower-ranked endpoint ranks lower wins, with
    /// bootstrap vertices ranked below every real point. A swap that would
    /// not leave two proper triangles is never made.
    fn is_illegal(&self, p: usize, b: usize, c: usize, far: usize) -> bool {
        let n = self.real_points();
        let pts = &self.points;
        if b >= n && c >= n {
            return false;
        }
        if b < n && c < n && far < n {
            return should_flip(pts[p], pts[c], pts[b], pts[far]);
        }
        let swappable = separates(pts[p], pts[far], pts[b], pts[c]);
        // `p` landed on `b`-`c` (within the edge tolerance).
        if (pts[b] - pts[p]).cross(pts[c] - pts[p]) <= 0.0 {
            return swappable;
        }
        let rank = |v: usize| if v < n { v as isize } else { n as isize - 1 - v as isize };
        swappable && rank(p).min(rank(far)) > rank(b).min(rank(c))
    }

    /// Swap the diagonal shared by `l = (p, b, c)` and `r = (d, c, b)`, where
    /// `d` sits at slot `k` of `r`, producing `l = (p, b, d)` and
    /// `r = (p, d, c)`.
    pub fn flip(&mut self, l: usize, r: usize, k: usize) {
        let Triangle {
            vertices: [p, b, c],
            neighbors: [_, l_b, l_c],
        } = self.triangles[l];
        let right = self.triangles[r];
        let d = right.vertices[k];
        let r_b = right.neighbors[(k + 1) % 3];
        let r_c = right.neighbors[(k + 2) % 3];

        self.triangles[l] = Triangle::with_neighbors([p, b, d], [r_b, Some(r), l_c]);
        self.triangles[r] = Triangle::with_neighbors([p, d, c], [r_c, l_b, Some(l)]);

        self.relink(r_b, r, l);
        self.relink(l_b, l, r);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    fn assert_symmetric(tris: &[Triangle]) {
        for (a, tri) in tris.iter().enumerate() {
            for b in tri.neighbors.iter().flatten() {
                assert!(
                    tris[*b].slot_of(a).is_some(),
                    "{a} -> {b} not mirrored: {tris:?}"
                );
            }
        }
    }

    #[test]
    fn first_insertion_fans_the_bootstrap_triangle() {
        let mut ins = Insertion::new(vec![Point2::new(0.5, 0.5)], 100.0, 1e-10);
        ins.insert(0).unwrap();
        assert_eq!(ins.triangles.len(), 3);
        assert!(ins.triangles.iter().all(|t| t.vertices[0] == 0));
        // Every outer edge is on the bootstrap hull.
        assert!(ins.triangles.iter().all(|t| t.neighbors[0].is_none()));
        assert_symmetric(&ins.triangles);
    }

    #[test]
    fn location_walks_to_the_containing_triangle() {
        let mut ins = Insertion::new(unit_square(), 100.0, 1e-10);
        ins.insert(0).unwrap();
        let found = ins.locate(2, 0).unwrap();
        let sides = edge_sides(ins.corners(found), ins.points[2]);
        assert!(sides.iter().all(|&s| s <= 1e-10));
    }

    #[test]
    fn flip_rewires_both_triangles_and_outer_links() {
        let mut ins = Insertion::new(unit_square(), 100.0, 1e-10);
        for i in 0..4 {
            ins.insert(i).unwrap();
            assert_symmetric(&ins.triangles);
        }
        assert_eq!(ins.triangles.len(), 9);
        // Every triangle stays counter-clockwise through splits and flips.
        for t in 0..ins.triangles.len() {
            let [a, b, c] = ins.corners(t);
            assert!((b - a).cross(c - a) > 0.0, "triangle {t} is not CCW");
        }
    }

    #[test]
    fn bootstrap_vertices_rank_below_real_points() {
        let ins = Insertion::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(0.2, -0.3),
                Point2::new(0.5, 0.5),
            ],
            100.0,
            1e-10,
        );
        // Edge between two bootstrap vertices.
        assert!(!ins.is_illegal(0, 3, 4, 1));
        // Real edge with a bootstrap vertex beyond it.
        assert!(!ins.is_illegal(2, 0, 1, 3));
        // Edge to a bootstrap vertex with a real point beyond it.
        assert!(ins.is_illegal(2, 0, 4, 1));
    }

    #[test]
    fn point_on_a_hull_edge_is_flipped_out_of_the_flat_triangle() {
        let ins = Insertion::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(0.5, 0.0),
            ],
            100.0,
            1e-10,
        );
        assert!(ins.is_illegal(2, 0, 1, 3));
    }

    #[test]
    fn walking_off_the_hull_is_reported() {
        let mut ins = Insertion::new(vec![Point2::new(0.5, 0.5)], 100.0, 1e-10);
        ins.points.push(Point2::new(500.0, 500.0));
        let err = ins.locate(4, 0).unwrap_err();
        assert!(matches!(err, MeshError::PointLocation { point: 4, .. }));
    }
}
