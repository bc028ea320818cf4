//! Paint-attribute classification.
//!
//! The colour convention follows the usual laser-cutter print workflow:
//! a pure red hairline cuts, a pure black hairline marks, every other
//! stroke is engraved along its outline and fills are engraved as raster.

use laoskit_core::{OperationMode, PaintAttributes};

/// Strokes wider than this are never cut or marked
pub const HAIRLINE_WIDTH: f64 = 1.0;

/// Classify a path by its paint attributes.
///
/// Colour components are compared exactly; anything that is not pure red
/// or pure black falls through to engraving.
pub fn classify(attrs: &PaintAttributes) -> OperationMode {
    let hairline = attrs.stroke_width <= HAIRLINE_WIDTH;

    if attrs.filled {
        return OperationMode::FillEngrave;
    }

    match (attrs.red(), attrs.green(), attrs.blue()) {
        (r, g, b) if r == 1.0 && g == 0.0 && b == 0.0 && hairline => OperationMode::Cut,
        (r, g, b) if r == 0.0 && g == 0.0 && b == 0.0 && hairline => OperationMode::Mark,
        _ => OperationMode::StrokeEngrave,
    }
}
