//! Analytic south/north boundaries for the structured grid.
//!
//! A boundary is a graph `y = f(x)` over the domain's x-extent. The grid
//! generator needs the height and, inside the curved region, the slope.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// A boundary curve `y = f(x)`.
pub trait BoundaryCurve {
    /// Height of the boundary at `x`.
    fn y(&self, x: f32) -> f32;

    /// `dy/dx` at `x`. Defaults to a central difference.
    fn slope(&self, x: f32) -> f32 {
        const H: f32 = 1e-3;
        (self.y(x + H) - self.y(x - H)) / (2.0 * H)
    }
}

/// A horizontal line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flat {
    pub y: f32,
}

impl BoundaryCurve for Flat {
    fn y(&self, _x: f32) -> f32 {
        self.y
    }

    fn slope(&self, _x: f32) -> f32 {
        0.0
    }
}

/// A straight baseline with one half-period sine bump on `[start, end]`:
/// `baseline + amplitude * sin((x - start) * pi / (end - start))`.
///
/// A negative amplitude gives a dent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SineBump {
    pub baseline: f32,
    pub amplitude: f32,
    pub start: f32,
    pub end: f32,
}

impl SineBump {
    pub const fn new(baseline: f32, amplitude: f32, start: f32, end: f32) -> Self {
        Self {
            baseline,
            amplitude,
            start,
            end,
        }
    }

    /// Floor of the reference channel: `y = 0` with a bump of height `0.1` on `[2, 3]`.
    pub const fn reference_south() -> Self {
        Self::new(0.0, 0.1, 2.0, 3.0)
    }

    /// Ceiling of the reference channel: `y = 1` with a dent of depth `0.1` on `[2, 3]`.
    pub const fn reference_north() -> Self {
        Self::new(1.0, -0.1, 2.0, 3.0)
    }

    #[inline]
    fn contains(&self, x: f32) -> bool {
        (self.start..=self.end).contains(&x)
    }

    #[inline]
    fn phase(&self, x: f32) -> f32 {
        (x - self.start) * PI / (self.end - self.start)
    }
}

impl BoundaryCurve for SineBump {
    fn y(&self, x: f32) -> f32 {
        if self.contains(x) {
            self.baseline + self.amplitude * self.phase(x).sin()
        } else {
            self.baseline
        }
    }

    fn slope(&self, x: f32) -> f32 {
        if self.contains(x) {
            self.amplitude * PI / (self.end - self.start) * self.phase(x).cos()
        } else {
            0.0
        }
    }
}

/// Any `Fn(f32) -> f32` is a curve with a numerically estimated slope.
impl<F> BoundaryCurve for F
where
    F: Fn(f32) -> f32,
{
    fn y(&self, x: f32) -> f32 {
        self(x)
    }
}
