//! Pure coordinate validation against fixed grid dimensions.

use crate::error::GridError;

/// Validated width/height of a grid, fixed for the life of a chain.
///
/// Dimensions are `u32` but coordinates are `i32` (so callers can pass
/// untrusted arithmetic results straight in and get a clean error for
/// negatives), which caps each dimension at `i32::MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    width: u32,
    height: u32,
}

impl Bounds {
    /// Maximum per-axis dimension: coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create bounds for a `width` x `height` grid.
    ///
    /// Returns [`GridError::EmptyGrid`] if either dimension is zero, or
    /// [`GridError::DimensionTooLarge`] if either exceeds [`Bounds::MAX_DIM`].
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        if width > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self { width, height })
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Check that `(x, y)` lies in `[0, width) x [0, height)`.
    pub fn check(&self, x: i32, y: i32) -> Result<(), GridError> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return Err(GridError::OutOfRange {
                x,
                y,
                bounds: format!("[0, {}) x [0, {})", self.width, self.height),
            });
        }
        Ok(())
    }
}
