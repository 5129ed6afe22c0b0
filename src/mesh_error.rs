//! MeshError: Unified error type for planar-mesh public APIs
//!
//! Input problems are separated into [`InputError`] so callers can tell a
//! rejected request apart from a failure inside a generator or during I/O.
//! Nothing in the library terminates the process; every fallible operation
//! returns one of these.

use thiserror::Error;

/// Rejections raised before a generator touches its working arrays.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    /// Triangulation needs at least three points.
    #[error("at least 3 points are required, found {found}")]
    TooFewPoints { found: usize },
    /// A coordinate is NaN or infinite.
    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },
    /// Two input points coincide (after normalization to the unit square).
    #[error("points {first} and {second} coincide")]
    DuplicatePoint { first: usize, second: usize },
    /// Every input point lies on one line; no triangle has positive area.
    #[error("all points are collinear")]
    CollinearPoints,
    /// Structured grids need at least three points in each direction.
    #[error("grid dimensions must be at least 3x3, got {i_max}x{j_max}")]
    GridTooSmall { i_max: usize, j_max: usize },
    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Unified error type for planar-mesh operations.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The request was rejected before generation started.
    #[error(transparent)]
    Input(#[from] InputError),
    /// The triangle walk for a point left the triangulation or ran out of steps.
    #[error("point location failed for point {point} after {steps} steps")]
    PointLocation { point: usize, steps: usize },
    /// A cell references a vertex outside the point set.
    #[error("cell {cell} references vertex {vertex}, but only {num_points} points exist")]
    VertexOutOfRange {
        cell: usize,
        vertex: usize,
        num_points: usize,
    },
    /// A cell references a neighbor outside the cell list.
    #[error("cell {cell} references neighbor {neighbor}, but only {num_cells} cells exist")]
    NeighborOutOfRange {
        cell: usize,
        neighbor: usize,
        num_cells: usize,
    },
    /// Cell `cell` lists `neighbor` across slot `slot`, but not the other way round.
    #[error("cell {cell} lists {neighbor} across slot {slot}, but the link is not mirrored")]
    AsymmetricAdjacency {
        cell: usize,
        neighbor: usize,
        slot: usize,
    },
    /// A cell has zero area or the wrong winding.
    #[error("cell {cell} is inverted or degenerate (signed area {area})")]
    InvertedCell { cell: usize, area: f32 },
    /// Underlying reader/writer failure.
    #[error("mesh I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed input text.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}
