//! Path primitives as produced by the upstream path iterator.

use crate::geometry::Point;
use crate::paint::PaintAttributes;
use serde::{Deserialize, Serialize};

/// One drawing element of a path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathPrimitive {
    /// Start a new subpath at the given point
    MoveTo(Point),
    /// Straight segment from the current point
    LineTo(Point),
    /// Close the current subpath back to its first point
    ClosePath,
    /// Cubic Bézier from the current point
    CurveTo { cp1: Point, cp2: Point, end: Point },
    /// Anything the backend does not know how to emit
    #[serde(other)]
    Unknown,
}

/// A path together with the paint state it was drawn with
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DrawnPath {
    #[serde(flatten)]
    pub paint: PaintAttributes,
    pub elements: Vec<PathPrimitive>,
}

impl DrawnPath {
    pub fn new(paint: PaintAttributes) -> Self {
        Self {
            paint,
            elements: Vec::new(),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.elements.push(PathPrimitive::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.elements.push(PathPrimitive::LineTo(Point::new(x, y)));
        self
    }

    pub fn curve_to(mut self, cp1: Point, cp2: Point, end: Point) -> Self {
        self.elements.push(PathPrimitive::CurveTo { cp1, cp2, end });
        self
    }

    pub fn close(mut self) -> Self {
        self.elements.push(PathPrimitive::ClosePath);
        self
    }

    /// First point of the path, if it starts with a move or a line
    pub fn first_point(&self) -> Option<Point> {
        match self.elements.first()? {
            PathPrimitive::MoveTo(p) | PathPrimitive::LineTo(p) => Some(*p),
            _ => None,
        }
    }
}
