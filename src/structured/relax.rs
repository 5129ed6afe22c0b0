//! Transfinite seeding and Gauss-Seidel relaxation of a boundary-fitted grid.
//!
//! Grid point `(i, j)` (column `i`, row `j`) lives at index `j * i_max + i`.
//! Row 0 is the south boundary, row `j_max - 1` the north boundary, column 0
//! the west boundary and column `i_max - 1` the east boundary.
//!
//! One sweep is: boundary rows, then the east/west columns, then the four
//! singular points at the ends of the curved region, then every interior
//! point in row-major order. Interior updates are visible to the points
//! after them in the same sweep.

use crate::geometry::point::Point2;
use crate::structured::GridConfig;
use crate::structured::curves::BoundaryCurve;

/// Winslow metric coefficients at one interior point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StencilMetrics {
    /// `x_eta^2 + y_eta^2`
    pub alpha: f32,
    /// `x_xi x_eta + y_xi y_eta`
    pub beta: f32,
    /// `x_xi^2 + y_xi^2`
    pub gamma: f32,
}

/// Working state for one grid generation run.
pub(crate) struct Relaxation<'c, S: ?Sized, N: ?Sized> {
    pub points: Vec<Point2>,
    i_max: usize,
    j_max: usize,
    d_xi: f32,
    d_eta: f32,
    bump_start: f32,
    bump_end: f32,
    south: &'c S,
    north: &'c N,
}

impl<'c, S, N> Relaxation<'c, S, N>
where
    S: BoundaryCurve + ?Sized,
    N: BoundaryCurve + ?Sized,
{
    /// Seed by transfinite interpolation between the two curves.
    pub fn seed(config: &GridConfig, south: &'c S, north: &'c N) -> Self {
        let (i_max, j_max) = (config.i_max, config.j_max);
        let width = config.x_east - config.x_west;
        let mut points = Vec::with_capacity(i_max * j_max);
        for j in 0..j_max {
            let eta = j as f32 / (j_max - 1) as f32;
            for i in 0..i_max {
                let xi = i as f32 / (i_max - 1) as f32;
                let x = config.x_west + xi * width;
                let (lo, hi) = (south.y(x), north.y(x));
                points.push(Point2::new(x, lo + eta * (hi - lo)));
            }
        }
        Self {
            points,
            i_max,
            j_max,
            d_xi: 1.0 / (i_max - 1) as f32,
            d_eta: 1.0 / (j_max - 1) as f32,
            bump_start: config.bump_start,
            bump_end: config.bump_end,
            south,
            north,
        }
    }

    #[inline]
    fn idx(&self, i: usize, j: usize) -> usize {
        j * self.i_max + i
    }

    /// One full sweep; returns the largest interior coordinate change.
    pub fn sweep(&mut self) -> f32 {
        self.enforce_boundaries();
        self.relax_interior()
    }

    pub fn enforce_boundaries(&mut self) {
        let top = self.j_max - 1;
        let south = self.south;
        let north = self.north;

        self.fit_boundary_row(0, 1, 2, 1.0, south);
        self.fit_boundary_row(top, top - 1, top.saturating_sub(2), -1.0, north);

        // Zero normal gradient in y on the east and west walls.
        for j in 1..top {
            let west = self.idx(0, j);
            let east = self.idx(self.i_max - 1, j);
            self.points[west].y = self.points[west + 1].y;
            self.points[east].y = self.points[east - 1].y;
        }

        self.snap_singular_points(0, south);
        self.snap_singular_points(top, north);
    }

    /// Slide a boundary row along its curve.
    ///
    /// Outside the curved region `x` follows row `adjacent`. Inside, `x` is
    /// taken from row `second` and pushed by `sign * 2 * d_eta * slope(x)`.
    /// `y` is then put back on the curve.
    fn fit_boundary_row<C: BoundaryCurve + ?Sized>(
        &mut self,
        row: usize,
        adjacent: usize,
        second: usize,
        sign: f32,
        curve: &C,
    ) {
        for i in 0..self.i_max {
            let k = self.idx(i, row);
            let x = self.points[k].x;
            let new_x = if x < self.bump_start || x > self.bump_end {
                self.points[self.idx(i, adjacent)].x
            } else {
                self.points[self.idx(i, second)].x + sign * 2.0 * curve.slope(x) * self.d_eta
            };
            self.points[k] = Point2::new(new_x, curve.y(new_x));
        }
    }

    /// Pin the last point before and the first point after the curved region
    /// to the exact ends of the feature. Rows with no crossing are left alone.
    fn snap_singular_points<C: BoundaryCurve + ?Sized>(&mut self, row: usize, curve: &C) {
        let x = |i: usize| self.points[self.idx(i, row)].x;
        let inner = 1..self.i_max - 1;
        let leading = inner
            .clone()
            .filter(|&i| x(i) < self.bump_start)
            .last()
            .filter(|&i| x(i + 1) >= self.bump_start);
        let trailing = inner
            .clone()
            .find(|&i| x(i) > self.bump_end)
            .filter(|&i| x(i - 1) <= self.bump_end);

        if let Some(i) = leading {
            let k = self.idx(i, row);
            self.points[k] = Point2::new(self.bump_start, curve.y(self.bump_start));
        }
        if let Some(i) = trailing {
            let k = self.idx(i, row);
            self.points[k] = Point2::new(self.bump_end, curve.y(self.bump_end));
        }
    }

    /// Central-difference metrics at interior index `k`.
    pub fn metrics(&self, k: usize) -> StencilMetrics {
        let p = &self.points;
        let w = self.i_max;
        let two_dxi = 2.0 * self.d_xi;
        let two_deta = 2.0 * self.d_eta;
        let x_xi = (p[k + 1].x - p[k - 1].x) / two_dxi;
        let x_eta = (p[k + w].x - p[k - w].x) / two_deta;
        let y_xi = (p[k + 1].y - p[k - 1].y) / two_dxi;
        let y_eta = (p[k + w].y - p[k - w].y) / two_deta;
        StencilMetrics {
            alpha: x_eta * x_eta + y_eta * y_eta,
            beta: x_xi * x_eta + y_xi * y_eta,
            gamma: x_xi * x_xi + y_xi * y_xi,
        }
    }

    /// Weights for the eight neighbors in the order given by [`Self::neighbors`],
    /// or `None` where the stencil degenerates.
    pub fn stencil(&self, m: StencilMetrics) -> Option<[f32; 8]> {
        let dxi2 = self.d_xi * self.d_xi;
        let deta2 = self.d_eta * self.d_eta;
        let mult = 1.0 / (2.0 * (m.alpha / dxi2) + 2.0 * (m.gamma / deta2));
        if !mult.is_finite() {
            return None;
        }
        let cross = (mult * m.beta) / (2.0 * (self.d_xi * self.d_eta));
        let along_xi = (mult * m.alpha) / dxi2;
        let along_eta = (mult * m.gamma) / deta2;
        Some([
            -cross, along_eta, cross, //
            along_xi, along_xi, //
            cross, along_eta, -cross,
        ])
    }

    /// Indices of the 3x3 block around `k`, centre excluded, row by row from the south.
    #[inline]
    fn neighbors(&self, k: usize) -> [usize; 8] {
        let w = self.i_max;
        [
            k - w - 1,
            k - w,
            k - w + 1,
            k - 1,
            k + 1,
            k + w - 1,
            k + w,
            k + w + 1,
        ]
    }

    /// Gauss-Seidel pass over the interior; returns the largest change.
    pub fn relax_interior(&mut self) -> f32 {
        let mut max_change = 0.0f32;
        for j in 1..self.j_max - 1 {
            for i in 1..self.i_max - 1 {
                let k = self.idx(i, j);
                let Some(weights) = self.stencil(self.metrics(k)) else {
                    continue;
                };
                let mut next = Point2::ORIGIN;
                for (w, n) in weights.iter().zip(self.neighbors(k)) {
                    next = next + self.points[n] * *w;
                }
                let old = self.points[k];
                max_change = max_change
                    .max((next.x - old.x).abs())
                    .max((next.y - old.y).abs());
                self.points[k] = next;
            }
        }
        max_change
    }
}
