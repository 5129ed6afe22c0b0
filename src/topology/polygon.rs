//! Index-based connectivity records shared by both generators.
//!
//! Cells live in one `Vec` and refer to points and to each other by
//! position. A missing neighbor (hull or grid boundary) is `None`; the
//! `-1` convention of flat file formats is available through
//! [`Polygon::raw_neighbors`].
//!
//! The meaning of neighbor slot `k` depends on the cell shape:
//! - [`Triangle`]: the cell across the edge **opposite** vertex `k`.
//! - [`Quad`]: the cell across the edge from vertex `k` to vertex `k + 1`.
//!
//! [`Cell::edge`] resolves a slot to its two vertex indices for either shape.

use crate::topology::cell_type::CellType;
use serde::{Deserialize, Serialize};

/// An `N`-gon: ordered vertex indices and one neighbor per edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Polygon<const N: usize> {
    #[serde(with = "serde_arrays")]
    pub vertices: [usize; N],
    #[serde(with = "serde_arrays")]
    pub neighbors: [Option<usize>; N],
}

/// Triangle from the Delaunay triangulator.
pub type Triangle = Polygon<3>;
/// Quadrilateral cell from the structured grid generator.
pub type Quad = Polygon<4>;

impl<const N: usize> Polygon<N> {
    /// A cell with the given vertices and no neighbors yet.
    pub const fn new(vertices: [usize; N]) -> Self {
        Self {
            vertices,
            neighbors: [None; N],
        }
    }

    /// A cell with vertices and neighbors fully specified.
    pub const fn with_neighbors(vertices: [usize; N], neighbors: [Option<usize>; N]) -> Self {
        Self {
            vertices,
            neighbors,
        }
    }

    /// Slot in which `other` appears as a neighbor, if any.
    #[inline]
    pub fn slot_of(&self, other: usize) -> Option<usize> {
        self.neighbors.iter().position(|&n| n == Some(other))
    }

    /// Slot holding vertex `v`, if the cell uses it.
    #[inline]
    pub fn vertex_slot(&self, v: usize) -> Option<usize> {
        self.vertices.iter().position(|&u| u == v)
    }

    /// Neighbors with `-1` for "no neighbor".
    pub fn raw_neighbors(&self) -> [i64; N] {
        self.neighbors.map(|n| n.map_or(-1, |i| i as i64))
    }

    /// Number of edges on the mesh boundary.
    pub fn boundary_edges(&self) -> usize {
        self.neighbors.iter().filter(|n| n.is_none()).count()
    }
}

/// Shape-specific view of a connectivity record.
pub trait Cell {
    /// The shape this record describes.
    const CELL_TYPE: CellType;

    fn vertices(&self) -> &[usize];
    fn neighbors(&self) -> &[Option<usize>];

    /// The two vertex indices of the edge behind neighbor slot `slot`.
    fn edge(&self, slot: usize) -> [usize; 2];

    /// Same edge regardless of direction.
    fn edge_key(&self, slot: usize) -> [usize; 2] {
        let [a, b] = self.edge(slot);
        if a <= b { [a, b] } else { [b, a] }
    }
}

impl Cell for Triangle {
    const CELL_TYPE: CellType = CellType::Triangle;

    fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    fn neighbors(&self) -> &[Option<usize>] {
        &self.neighbors
    }

    fn edge(&self, slot: usize) -> [usize; 2] {
        [self.vertices[(slot + 1) % 3], self.vertices[(slot + 2) % 3]]
    }
}

impl Cell for Quad {
    const CELL_TYPE: CellType = CellType::Quadrilateral;

    fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    fn neighbors(&self) -> &[Option<usize>] {
        &self.neighbors
    }

    fn edge(&self, slot: usize) -> [usize; 2] {
        [self.vertices[slot], self.vertices[(slot + 1) % 4]]
    }
}

// serde has no impls for `[T; N]` with a generic `N`; encode as a tuple.
mod serde_arrays {
    use serde::de::{Error, SeqAccess, Visitor};
    use serde::ser::SerializeTuple;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;
    use std::marker::PhantomData;

    pub fn serialize<S, T, const N: usize>(data: &[T; N], ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        let mut tup = ser.serialize_tuple(N)?;
        for item in data {
            tup.serialize_element(item)?;
        }
        tup.end()
    }

    struct ArrayVisitor<T, const N: usize>(PhantomData<T>);

    impl<'de, T, const N: usize> Visitor<'de> for ArrayVisitor<T, N>
    where
        T: Deserialize<'de>,
    {
        type Value = [T; N];

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "an array of length {N}")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<[T; N], A::Error> {
            let mut items = Vec::with_capacity(N);
            while let Some(item) = seq.next_element()? {
                items.push(item);
            }
            let found = items.len();
            items
                .try_into()
                .map_err(|_| A::Error::invalid_length(found, &self))
        }
    }

    pub fn deserialize<'de, D, T, const N: usize>(de: D) -> Result<[T; N], D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        de.deserialize_tuple(N, ArrayVisitor::<T, N>(PhantomData))
    }
}
