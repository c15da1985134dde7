//! Stroke styling: colors, widths, and the toolbar swatch palette.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a new color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// The canvas background fill, applied on the first pointer-down.
///
/// The eraser paints in this color, so erased marks still read as ink
/// to the bounding-box scanner.
pub const BACKGROUND: Rgb = Rgb::new(0, 0, 0);

/// Fixed eraser stroke width, independent of the configured pen width.
pub const ERASER_WIDTH: u32 = 20;

/// Default pen stroke width.
pub const DEFAULT_WIDTH: u32 = 3;

/// Default pen color.
pub const DEFAULT_COLOR: Rgb = Rgb::new(255, 255, 255);

/// Swatch palette offered by the toolbar.
pub const PALETTE: [Rgb; 9] = [
    Rgb::new(255, 255, 255), // white
    Rgb::new(238, 51, 51),   // red
    Rgb::new(230, 73, 128),  // pink
    Rgb::new(190, 75, 219),  // violet
    Rgb::new(34, 139, 230),  // blue
    Rgb::new(64, 192, 87),   // green
    Rgb::new(0, 170, 170),   // teal
    Rgb::new(250, 176, 5),   // yellow
    Rgb::new(253, 126, 20),  // orange
];

/// How a stroke is painted: color and width.
///
/// Width is always positive; use [`StrokeStyle::new`] to construct a
/// validated style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Rgb,
    /// Stroke width in pixels.
    pub width: u32,
}

impl StrokeStyle {
    /// Create a validated stroke style.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidStrokeWidth`] if `width` is zero.
    pub fn new(color: Rgb, width: u32) -> CoreResult<Self> {
        if width == 0 {
            return Err(CoreError::InvalidStrokeWidth(width));
        }
        Ok(Self { color, width })
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            width: DEFAULT_WIDTH,
        }
    }
}
