//! # Sketchcalc Raster
//!
//! The drawing surface: an owned RGBA pixel buffer with stroke and
//! shape-preview painting, the ink bounding-box scanner used to anchor
//! recognized results, and PNG snapshot encoding for the recognition
//! request.
//!
//! ## Painting policy
//!
//! ```text
//! pen / eraser      ──► additive segments, prior pixels remain
//! rect/circle/line  ──► full buffer clear, then the new preview shape
//! ```
//!
//! The full-clear preview policy is deliberate: a shape gesture replaces
//! everything drawn so far, which keeps the canvas a single-shape-at-a-time
//! surface during shape gestures.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bounds;
pub mod encode;
pub mod error;
pub mod paint;
pub mod surface;

pub use bounds::{scan, InkBounds};
pub use encode::{encode_png, to_data_uri};
pub use error::{RasterError, RasterResult};
pub use paint::{paint_preview, paint_stroke};
pub use surface::RasterSurface;
