//! Topology module: connectivity records and their validation.
//!
//! Both generators store cells in a single growable array and link them by
//! index. This module provides:
//! - [`polygon::Polygon`] and its [`Triangle`](polygon::Triangle) /
//!   [`Quad`](polygon::Quad) aliases
//! - [`cell_type::CellType`] metadata used by exporters
//! - [`validation`] checks for index ranges, adjacency symmetry and winding

pub mod cell_type;
pub mod polygon;
pub mod validation;

/// Column width for index tables: digits of the largest index shown.
pub(crate) fn index_width(largest: usize) -> usize {
    largest.max(1).to_string().len()
}
