//! # Sketchcalc Session Library
//!
//! The asynchronous layer of the sketchpad: the recognition HTTP client,
//! the cancellable reveal scheduler, the formula-renderer seam, and the
//! [`Sketchpad`] orchestrator that wires them to the core state machines
//! and the raster surface. Used by both the binary and integration tests.

pub mod config;
pub mod error;
pub mod pad;
pub mod recognition;
pub mod render;
pub mod schedule;

pub use config::PadConfig;
pub use error::{SessionError, SessionResult};
pub use pad::{RunOutcome, Sketchpad};
pub use recognition::{Recognized, RecognitionClient, RecognitionError};
pub use render::{FormulaRenderer, LogRenderer};
pub use schedule::{Reveal, RevealScheduler};
