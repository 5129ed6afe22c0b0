//! `Point2`: the single-precision 2D point shared by both generators.
//!
//! Points double as free vectors: `a - b` is the vector from `b` to `a`,
//! [`Point2::dot`] and [`Point2::cross`] operate on those vectors.
//!
//! # Memory layout
//! `Point2` is `repr(C)` and `Pod`, with the same size as `[f32; 2]`, so a
//! point buffer can be reinterpreted as interleaved `x y` floats for a
//! renderer without copying (see [`Point2::as_flat`]).

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use static_assertions::assert_eq_size;
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A point (or vector) in the plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

assert_eq_size!(Point2, [f32; 2]);

impl Point2 {
    /// The origin.
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Dot product of the two vectors.
    #[inline]
    pub fn dot(self, other: Point2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Scalar 2D cross product, the z-component of the 3D cross product.
    ///
    /// Positive when `other` lies counter-clockwise of `self`.
    #[inline]
    pub fn cross(self, other: Point2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Right-hand normal `(y, -x)`; outward for an edge of a counter-clockwise polygon.
    #[inline]
    pub fn right_normal(self) -> Point2 {
        Point2::new(self.y, -self.x)
    }

    /// Squared Euclidean length.
    #[inline]
    pub fn norm_squared(self) -> f32 {
        self.dot(self)
    }

    /// Both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// View a point slice as interleaved `[x0, y0, x1, y1, ...]`.
    pub fn as_flat(points: &[Point2]) -> &[f32] {
        bytemuck::cast_slice(points)
    }
}

impl Add for Point2 {
    type Output = Point2;

    #[inline]
    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;

    #[inline]
    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point2 {
    type Output = Point2;

    #[inline]
    fn mul(self, rhs: f32) -> Point2 {
        Point2::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f32, f32)> for Point2 {
    fn from((x, y): (f32, f32)) -> Self {
        Point2::new(x, y)
    }
}

impl From<[f32; 2]> for Point2 {
    fn from([x, y]: [f32; 2]) -> Self {
        Point2::new(x, y)
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}
