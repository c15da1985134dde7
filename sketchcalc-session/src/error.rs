//! Session-level errors.

use thiserror::Error;

use crate::recognition::RecognitionError;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced by the sketchpad.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The core model rejected an operation.
    #[error("core error: {0}")]
    Core(#[from] sketchcalc_core::CoreError),

    /// The raster surface failed.
    #[error("raster error: {0}")]
    Raster(#[from] sketchcalc_raster::RasterError),

    /// The recognition service failed.
    #[error("recognition error: {0}")]
    Recognition(#[from] RecognitionError),
}
