//! Paint attributes and machine operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Paint state of a drawn path, as reported by the upstream renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintAttributes {
    /// Stroke colour as red, green, blue in `0.0..=1.0`
    pub stroke: [f64; 3],
    /// Stroke width in points
    #[serde(default)]
    pub stroke_width: f64,
    /// Whether the path is filled rather than stroked
    #[serde(default)]
    pub filled: bool,
}

impl PaintAttributes {
    /// Stroked path with the given colour and width
    pub fn stroked(r: f64, g: f64, b: f64, stroke_width: f64) -> Self {
        Self {
            stroke: [r, g, b],
            stroke_width,
            filled: false,
        }
    }

    /// Filled path with the given colour
    pub fn filled(r: f64, g: f64, b: f64) -> Self {
        Self {
            stroke: [r, g, b],
            stroke_width: 0.0,
            filled: true,
        }
    }

    pub fn red(&self) -> f64 {
        self.stroke[0]
    }

    pub fn green(&self) -> f64 {
        self.stroke[1]
    }

    pub fn blue(&self) -> f64 {
        self.stroke[2]
    }
}

impl Default for PaintAttributes {
    fn default() -> Self {
        Self::stroked(0.0, 0.0, 0.0, 0.0)
    }
}

/// Machine operation a path is realised with
///
/// The discriminant order matters: every mode above [`OperationMode::Mark`]
/// is an engraving mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationMode {
    /// No path has been classified yet
    #[default]
    Undefined,
    /// Cut through the material
    Cut,
    /// Mark or score the surface
    Mark,
    /// Engrave along a stroked outline
    StrokeEngrave,
    /// Engrave a filled region (raster only)
    FillEngrave,
}

impl OperationMode {
    /// Whether paths in this mode are turned into motion commands
    pub fn emits_vectors(self) -> bool {
        matches!(self, Self::Cut | Self::Mark | Self::StrokeEngrave)
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Cut => write!(f, "cut"),
            Self::Mark => write!(f, "mark"),
            Self::StrokeEngrave => write!(f, "stroke engrave"),
            Self::FillEngrave => write!(f, "fill engrave"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_ordering() {
        assert!(OperationMode::Undefined < OperationMode::Cut);
        assert!(OperationMode::Cut < OperationMode::Mark);
        assert!(OperationMode::Mark < OperationMode::StrokeEngrave);
        assert!(OperationMode::StrokeEngrave < OperationMode::FillEngrave);
    }

    #[test]
    fn test_emits_vectors() {
        assert!(OperationMode::Cut.emits_vectors());
        assert!(OperationMode::Mark.emits_vectors());
        assert!(OperationMode::StrokeEngrave.emits_vectors());
        assert!(!OperationMode::FillEngrave.emits_vectors());
        assert!(!OperationMode::Undefined.emits_vectors());
    }

    #[test]
    fn test_attributes_deserialize_defaults() {
        let attrs: PaintAttributes = serde_json::from_str(r#"{"stroke": [1, 0, 0]}"#).unwrap();
        assert_eq!(attrs, PaintAttributes::stroked(1.0, 0.0, 0.0, 0.0));
    }
}
