//! Geometry primitives for planar-mesh.
//!
//! [`point::Point2`] is the only coordinate type; [`metrics`] holds the
//! handful of area measures used to check generated cells.

pub mod metrics;
pub mod point;

pub use point::Point2;
