//! Shared access trait for grid view types.

use crate::error::GridError;
use crate::value::CellValue;

/// Read access to one version of a grid.
///
/// Implemented by both view types over the version chain (the value-like
/// snapshot and the single-owner editor), which differ only in their
/// `set` semantics. This trait decouples consumers — the tracing and
/// export pipelines — from the chain implementation.
pub trait GridRead<V: CellValue> {
    /// Read the value at `(x, y)`.
    ///
    /// Returns the value from the nearest version that changed the cell,
    /// falling back to the grid's default fill value. Fails with
    /// [`GridError::OutOfRange`] for coordinates outside the grid.
    fn get(&self, x: i32, y: i32) -> Result<V, GridError>;

    /// Number of version-chain nodes from this view's head to the root,
    /// inclusive.
    ///
    /// After compaction this reflects remaining branch boundaries, not
    /// write history. Diagnostic only; never consulted by core logic.
    fn layer_count(&self) -> usize;

    /// Number of cells changed in this view's head node alone.
    ///
    /// Diagnostic only; never consulted by core logic.
    fn layer_size(&self) -> usize;

    /// Materialize a dense row-major copy of the whole grid.
    ///
    /// Cell `(x, y)` lands at index `y * width + x`. Intended for the
    /// persistence codec, which wants a flat buffer.
    fn to_dense(&self) -> Vec<V>;
}
