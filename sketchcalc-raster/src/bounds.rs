//! Ink bounding-box scanning for result anchor placement.
//!
//! A full-frame scan over every pixel. This runs once per explicit "run"
//! action, not per frame, so the O(width x height) cost is acceptable; a
//! tighter loop would want incremental dirty-rect tracking instead.

use serde::{Deserialize, Serialize};
use sketchcalc_core::Point;

use crate::surface::RasterSurface;

/// Tight bounding box of ink pixels (alpha > 0).
///
/// Initialized inverted (`min = extent`, `max = 0`) and narrowed by
/// running min/max; a buffer with no ink keeps the inverted values, which
/// callers must treat as "no content" before trusting
/// [`InkBounds::center`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InkBounds {
    /// Leftmost ink column.
    pub min_x: u32,
    /// Topmost ink row.
    pub min_y: u32,
    /// Rightmost ink column.
    pub max_x: u32,
    /// Bottommost ink row.
    pub max_y: u32,
}

impl InkBounds {
    /// Whether the scan found no ink (the bounds are still inverted).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Midpoint of the bounds, used to anchor recognized results.
    ///
    /// Only meaningful when the bounds are not [`InkBounds::is_empty`].
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) as f32 / 2.0,
            (self.min_y + self.max_y) as f32 / 2.0,
        )
    }
}

/// Scan every pixel of `surface` for ink.
///
/// Returns the smallest axis-aligned rectangle covering all ink pixels,
/// or the degenerate inverted bounds when the surface is blank.
#[must_use]
pub fn scan(surface: &RasterSurface) -> InkBounds {
    let mut bounds = InkBounds {
        min_x: surface.width(),
        min_y: surface.height(),
        max_x: 0,
        max_y: 0,
    };

    for y in 0..surface.height() {
        for x in 0..surface.width() {
            if surface.is_ink(x, y) {
                bounds.min_x = bounds.min_x.min(x);
                bounds.min_y = bounds.min_y.min(y);
                bounds.max_x = bounds.max_x.max(x);
                bounds.max_y = bounds.max_y.max(y);
            }
        }
    }

    tracing::trace!(?bounds, "ink scan complete");
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::paint_stroke;
    use sketchcalc_core::{Rgb, StrokeStyle};

    #[test]
    fn test_blank_surface_returns_degenerate_bounds() {
        let surface = RasterSurface::new(32, 24).expect("surface");
        let bounds = scan(&surface);
        assert_eq!(bounds.min_x, 32);
        assert_eq!(bounds.min_y, 24);
        assert_eq!(bounds.max_x, 0);
        assert_eq!(bounds.max_y, 0);
        assert!(bounds.is_empty());
    }

    #[test]
    fn test_single_pixel_bounds_and_center() {
        let mut surface = RasterSurface::new(32, 32).expect("surface");
        let style = StrokeStyle::new(Rgb::new(255, 255, 255), 1).expect("style");
        paint_stroke(
            &mut surface,
            Point::new(7.0, 11.0),
            Point::new(7.0, 11.0),
            style,
        );
        // Width 1 at rest leaves exactly one pixel.
        let bounds = scan(&surface);
        assert_eq!((bounds.min_x, bounds.max_x), (7, 7));
        assert_eq!((bounds.min_y, bounds.max_y), (11, 11));
        assert!(!bounds.is_empty());
        assert_eq!(bounds.center(), Point::new(7.0, 11.0));
    }

    #[test]
    fn test_stroke_bounds_cover_endpoints() {
        let mut surface = RasterSurface::new(64, 64).expect("surface");
        let style = StrokeStyle::new(Rgb::new(255, 255, 255), 1).expect("style");
        paint_stroke(
            &mut surface,
            Point::new(10.0, 20.0),
            Point::new(40.0, 50.0),
            style,
        );
        let bounds = scan(&surface);
        assert!(bounds.min_x <= 10 && bounds.max_x >= 40);
        assert!(bounds.min_y <= 20 && bounds.max_y >= 50);
    }

    #[test]
    fn test_empty_after_clear() {
        let mut surface = RasterSurface::new(16, 16).expect("surface");
        let style = StrokeStyle::new(Rgb::new(255, 255, 255), 3).expect("style");
        paint_stroke(
            &mut surface,
            Point::new(4.0, 4.0),
            Point::new(12.0, 12.0),
            style,
        );
        assert!(!scan(&surface).is_empty());
        surface.clear();
        assert!(scan(&surface).is_empty());
    }
}
