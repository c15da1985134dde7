//! Painting operations: additive strokes and full-clear shape previews.
//!
//! Strokes are rasterized by stamping filled discs along the segment at
//! unit steps, giving round caps and joins at any width.

use sketchcalc_core::{Point, StrokeStyle, Tool};

use crate::surface::RasterSurface;

/// Stamp spacing along a segment, in pixels.
const STAMP_STEP: f32 = 1.0;

/// Minimum disc radius so a width-1 stroke still leaves pixels.
const MIN_RADIUS: f32 = 0.5;

/// Stamp one filled disc centered at `(cx, cy)`.
///
/// The pixel loop is clamped to the surface, so discs entirely off the
/// canvas cost nothing.
#[allow(clippy::cast_possible_truncation)]
fn fill_disc(surface: &mut RasterSurface, cx: f32, cy: f32, radius: f32, style: StrokeStyle) {
    let r = radius.max(MIN_RADIUS);
    let x0 = ((cx - r).floor() as i64).max(0);
    let x1 = ((cx + r).ceil() as i64).min(i64::from(surface.width()) - 1);
    let y0 = ((cy - r).floor() as i64).max(0);
    let y1 = ((cy + r).ceil() as i64).min(i64::from(surface.height()) - 1);

    #[allow(clippy::cast_precision_loss)]
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if dx * dx + dy * dy <= r * r {
                surface.set_pixel(x, y, style.color);
            }
        }
    }
}

/// Append a line segment from `from` to `to`, leaving prior pixels intact.
///
/// This is the pen/eraser path: each pointer move extends the stroke by
/// one segment and nothing is cleared.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn paint_stroke(surface: &mut RasterSurface, from: Point, to: Point, style: StrokeStyle) {
    #[allow(clippy::cast_precision_loss)]
    let radius = style.width as f32 / 2.0;
    let distance = from.distance_to(to);

    if distance < 0.1 {
        fill_disc(surface, from.x, from.y, radius, style);
        return;
    }

    let steps = (distance / STAMP_STEP).ceil() as usize;
    #[allow(clippy::cast_precision_loss)]
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = from.x + (to.x - from.x) * t;
        let y = from.y + (to.y - from.y) * t;
        fill_disc(surface, x, y, radius, style);
    }
}

/// Outline of the axis-aligned rectangle with corners at `a` and `b`.
///
/// Corners are normalized to min/max first, so the rectangle renders
/// identically whichever corner the gesture anchored on: all four drag
/// directions produce the same pixels.
fn rect_outline(surface: &mut RasterSurface, a: Point, b: Point, style: StrokeStyle) {
    let x0 = a.x.min(b.x);
    let x1 = a.x.max(b.x);
    let y0 = a.y.min(b.y);
    let y1 = a.y.max(b.y);

    paint_stroke(surface, Point::new(x0, y0), Point::new(x1, y0), style);
    paint_stroke(surface, Point::new(x1, y0), Point::new(x1, y1), style);
    paint_stroke(surface, Point::new(x1, y1), Point::new(x0, y1), style);
    paint_stroke(surface, Point::new(x0, y1), Point::new(x0, y0), style);
}

/// Outline of the circle centered at `center` through `through`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn circle_outline(surface: &mut RasterSurface, center: Point, through: Point, style: StrokeStyle) {
    #[allow(clippy::cast_precision_loss)]
    let stroke_radius = style.width as f32 / 2.0;
    let radius = center.distance_to(through);

    if radius < MIN_RADIUS {
        fill_disc(surface, center.x, center.y, stroke_radius, style);
        return;
    }

    // One stamp per pixel of circumference keeps the outline gap-free.
    let steps = ((std::f32::consts::TAU * radius) / STAMP_STEP).ceil().max(8.0) as usize;
    #[allow(clippy::cast_precision_loss)]
    for i in 0..steps {
        let angle = std::f32::consts::TAU * (i as f32) / (steps as f32);
        let x = radius.mul_add(angle.cos(), center.x);
        let y = radius.mul_add(angle.sin(), center.y);
        fill_disc(surface, x, y, stroke_radius, style);
    }
}

/// Paint the preview for an in-progress gesture.
///
/// For the shape tools (rectangle, circle, line) the ENTIRE buffer is
/// cleared first: the previewed shape replaces everything drawn so far in
/// the session, not just the previous preview frame. Pen and eraser fall
/// through to a plain additive segment.
pub fn paint_preview(
    surface: &mut RasterSurface,
    tool: Tool,
    anchor: Point,
    current: Point,
    style: StrokeStyle,
) {
    match tool {
        Tool::Rectangle => {
            surface.clear();
            rect_outline(surface, anchor, current, style);
        }
        Tool::Circle => {
            surface.clear();
            circle_outline(surface, anchor, current, style);
        }
        Tool::Line => {
            surface.clear();
            paint_stroke(surface, anchor, current, style);
        }
        Tool::Pen | Tool::Eraser => {
            paint_stroke(surface, anchor, current, style);
        }
    }
}
