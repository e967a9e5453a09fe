//! Error types for grid construction and cell access.

use std::fmt;

/// Errors arising from grid construction or per-cell access.
///
/// Both variants are programmer errors: callers are expected to pass
/// valid dimensions and in-bounds coordinates, and failures surface at
/// the call site rather than being silently clamped. Compaction never
/// produces an error — inability to fold is always "skip this time".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Attempted to construct a grid with a zero-sized dimension.
    EmptyGrid {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// A dimension exceeds what an `i32` coordinate can address.
    DimensionTooLarge {
        /// Which dimension ("width" or "height").
        name: &'static str,
        /// The requested value.
        value: u32,
        /// The maximum allowed value.
        max: u32,
    },
    /// A coordinate is outside the bounds of the grid.
    OutOfRange {
        /// The offending x coordinate.
        x: i32,
        /// The offending y coordinate.
        y: i32,
        /// Human-readable description of the valid range.
        bounds: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => {
                write!(f, "grid must have at least one cell, got {width}x{height}")
            }
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} {value} exceeds maximum {max}")
            }
            Self::OutOfRange { x, y, bounds } => {
                write!(f, "coordinate ({x}, {y}) out of range: {bounds}")
            }
        }
    }
}

impl std::error::Error for GridError {}
