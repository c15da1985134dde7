//! Raster error types.

use thiserror::Error;

/// Result type for raster operations.
pub type RasterResult<T> = Result<T, RasterError>;

/// Errors that can occur on the raster surface.
#[derive(Debug, Error)]
pub enum RasterError {
    /// Surface created with a zero dimension.
    #[error("invalid surface dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Snapshot encoding failed.
    #[error("snapshot encoding failed: {0}")]
    Encode(String),
}
