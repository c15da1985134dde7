//! Drawing tools and their stroke behavior.

use serde::{Deserialize, Serialize};

use crate::style::{StrokeStyle, BACKGROUND, ERASER_WIDTH};

/// The drawing tool currently selected in the toolbar.
///
/// Selecting a tool is a pure state transition; nothing is painted until
/// the next gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand pen: additive line segments.
    #[default]
    Pen,
    /// Eraser: a pen stroke forced to the background color at a fixed width.
    Eraser,
    /// Axis-aligned rectangle preview between anchor and pointer.
    Rectangle,
    /// Circle preview centered on the anchor, radius to the pointer.
    Circle,
    /// Straight line preview from anchor to pointer.
    Line,
}

impl Tool {
    /// Shape tools replace the whole buffer with a fresh preview on every
    /// pointer move; pen and eraser append segments instead.
    #[must_use]
    pub const fn is_shape(self) -> bool {
        matches!(self, Self::Rectangle | Self::Circle | Self::Line)
    }

    /// Resolve the stroke style this tool actually paints with.
    ///
    /// The eraser ignores the configured style entirely: background color,
    /// width [`ERASER_WIDTH`]. Every other tool uses `configured` as-is.
    #[must_use]
    pub fn effective_style(self, configured: StrokeStyle) -> StrokeStyle {
        match self {
            Self::Eraser => StrokeStyle {
                color: BACKGROUND,
                width: ERASER_WIDTH,
            },
            _ => configured,
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Pen => "pen",
            Self::Eraser => "eraser",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Line => "line",
        };
        write!(f, "{name}")
    }
}
