//! # Sketchcalc Core
//!
//! Core model for the hand-drawn math sketchpad: the tool state machine,
//! gesture lifecycle, stroke styling, and ambient session state. No I/O
//! happens here; painting and networking live in the sibling crates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              sketchcalc-core                │
//! ├──────────────────────┬──────────────────────┤
//! │  Tool State Machine  │  Session State       │
//! │  - Tool selection    │  - Variable bindings │
//! │  - Gesture tracking  │  - Formula entries   │
//! │  - Stroke styles     │  - Overlay anchor    │
//! └──────────────────────┴──────────────────────┘
//!            │                      │
//!            ▼                      ▼
//!   sketchcalc-raster      sketchcalc-session
//!   (pixel buffer)         (recognition + reveal)
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod session;
pub mod style;
pub mod tool;

pub use error::{CoreError, CoreResult};
pub use event::{PointerEvent, PointerPhase};
pub use geometry::Point;
pub use gesture::{GestureTracker, GestureUpdate};
pub use session::{FormulaEntry, SessionState, VariableBindings};
pub use style::{Rgb, StrokeStyle, BACKGROUND, DEFAULT_WIDTH, ERASER_WIDTH, PALETTE};
pub use tool::Tool;

/// Core crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
