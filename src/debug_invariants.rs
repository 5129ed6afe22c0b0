//! Invariant checks for finished meshes.
//!
//! Generators run these on their output before returning it; the checks are
//! compiled in for debug builds and for the `check-invariants` /
//! `strict-invariants` features, and are free otherwise.

use crate::mesh_error::MeshError;

/// Mesh types that can verify their own connectivity.
pub trait DebugInvariants {
    /// Validate invariants and return the first violation found.
    fn validate_invariants(&self) -> Result<(), MeshError>;

    /// Panic on the first violation when invariant checking is compiled in.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "mesh connectivity");
    }
}

/// Run a fallible check and panic with context on error when invariant
/// checking is enabled. Expands to nothing in plain release builds.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
