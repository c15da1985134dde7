//! Gesture lifecycle: one pointer-down, any number of moves, one release.
//!
//! The tracker is a two-state machine (idle, active). The anchor is
//! captured once when the gesture begins and stays fixed until the
//! gesture ends; shape tools compute their extent from it on every move.

use crate::error::{CoreError, CoreResult};
use crate::geometry::Point;

/// Data alive between gesture begin and end.
#[derive(Debug, Clone, Copy)]
struct ActiveGesture {
    /// Fixed reference point captured at gesture start.
    anchor: Point,
    /// Most recent pointer position, start of the next pen segment.
    last: Point,
}

/// One step of an active gesture, produced by [`GestureTracker::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureUpdate {
    /// The gesture's fixed anchor.
    pub anchor: Point,
    /// Previous pointer position.
    pub from: Point,
    /// Current pointer position.
    pub to: Point,
}

/// The idle/active gesture state machine.
///
/// `update` and `end` while idle are silent no-ops: pointer-up and
/// pointer-out may both fire for the same gesture, and moves can arrive
/// after release.
#[derive(Debug, Default)]
pub struct GestureTracker {
    active: Option<ActiveGesture>,
}

impl GestureTracker {
    /// Create an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a gesture anchored at `point`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::GestureActive`] if a gesture is already in
    /// progress; the active gesture is left untouched.
    pub fn begin(&mut self, point: Point) -> CoreResult<()> {
        if let Some(active) = &self.active {
            return Err(CoreError::GestureActive {
                x: active.anchor.x,
                y: active.anchor.y,
            });
        }
        tracing::trace!("gesture begin at {point}");
        self.active = Some(ActiveGesture {
            anchor: point,
            last: point,
        });
        Ok(())
    }

    /// Advance the gesture to `point`.
    ///
    /// Returns the step (anchor, previous position, new position) while
    /// active, or `None` when idle.
    pub fn update(&mut self, point: Point) -> Option<GestureUpdate> {
        let active = self.active.as_mut()?;
        let step = GestureUpdate {
            anchor: active.anchor,
            from: active.last,
            to: point,
        };
        active.last = point;
        Some(step)
    }

    /// End the gesture. The anchor becomes stale and must not be read
    /// again until the next [`GestureTracker::begin`]. No-op when idle.
    pub fn end(&mut self) {
        if self.active.take().is_some() {
            tracing::trace!("gesture end");
        }
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The active gesture's anchor, if any.
    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        self.active.map(|a| a.anchor)
    }
}
