//! Error types for core model operations.

use thiserror::Error;

/// Result type for core model operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in the core model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A gesture was started while another gesture is still active.
    #[error("gesture already active (anchored at {x}, {y})")]
    GestureActive {
        /// Anchor X of the active gesture.
        x: f32,
        /// Anchor Y of the active gesture.
        y: f32,
    },

    /// A stroke style was configured with a zero width.
    #[error("invalid stroke width: {0} (must be positive)")]
    InvalidStrokeWidth(u32),

    /// Session state serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
