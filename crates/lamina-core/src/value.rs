//! Marker trait for grid cell value types.

/// Types that can be stored in a grid cell.
///
/// Blanket-implemented, so callers never implement it by hand. The
/// bounds come from the sharing model: snapshots of one grid are read
/// from arbitrary threads (`Send + Sync`), writes compare against the
/// currently observable value (`PartialEq`), and chain walks hand out
/// owned values (`Clone`).
pub trait CellValue: Clone + PartialEq + Send + Sync + 'static {}

impl<T> CellValue for T where T: Clone + PartialEq + Send + Sync + 'static {}
