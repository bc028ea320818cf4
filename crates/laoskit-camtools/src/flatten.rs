//! Curve Flattener
//!
//! Converts cubic Bézier curves into linear segments; the controller only
//! understands straight moves.
//!
//! The number of fit points grows with the straight-line distance between
//! the curve's end points and with the output scale, clamped to
//! [`MIN_FIT_POINTS`]..=[`MAX_FIT_POINTS`]. Even a closed loop whose end
//! points coincide is flattened with the minimum count.

use crate::channels::ChannelSet;
use crate::motion::MotionEmitter;
use laoskit_core::{OperationMode, Point};

/// Fewest fit points used for any curve
pub const MIN_FIT_POINTS: usize = 20;
/// Most fit points used for any curve
pub const MAX_FIT_POINTS: usize = 100;

/// Evaluate the cubic Bézier `p0, cp1, cp2, p3` at `t`
pub fn bezier_point(t: f64, p0: Point, cp1: Point, cp2: Point, p3: Point) -> Point {
    // Coefficients of the parametric representation of the cubic
    let a = cp1 - p0;
    let b = cp2 - cp1 - a;
    let c = p3 - cp2 - a - b * 2.0;
    p0 + (a * 3.0 + (b * 3.0 + c * t) * t) * t
}

/// Flattens cubic curves for a given output scale
#[derive(Debug, Clone, Copy)]
pub struct CurveFlattener {
    scale: f64,
}

impl CurveFlattener {
    /// Create a flattener for documents written with `scale`
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    /// Number of fit points for a curve from `p0` to `p3`, including `p0`
    pub fn fit_points(&self, p0: Point, p3: Point) -> usize {
        let dist = p0.distance_to(&p3);
        let estimate = ((dist / 10.0) * (self.scale / 10.0)).round();
        if estimate.is_nan() || estimate < MIN_FIT_POINTS as f64 {
            MIN_FIT_POINTS
        } else if estimate > MAX_FIT_POINTS as f64 {
            MAX_FIT_POINTS
        } else {
            estimate as usize
        }
    }

    /// Points the pen draws to, excluding `p0` and ending exactly at `p3`
    pub fn flatten(&self, p0: Point, cp1: Point, cp2: Point, p3: Point) -> Vec<Point> {
        let fit_points = self.fit_points(p0, p3);
        let last = (fit_points - 1) as f64;
        (1..fit_points)
            .map(|s| bezier_point(s as f64 / last, p0, cp1, cp2, p3))
            .collect()
    }

    /// Emit the curve through `emitter`: a move to `p0`, then one line per
    /// flattened point
    #[allow(clippy::too_many_arguments)]
    pub fn emit(
        &self,
        emitter: &mut MotionEmitter,
        channels: &mut ChannelSet,
        mode: OperationMode,
        p0: Point,
        cp1: Point,
        cp2: Point,
        p3: Point,
    ) -> usize {
        emitter.move_to(p0);
        let points = self.flatten(p0, cp1, cp2, p3);
        for p in &points {
            emitter.line_to(channels, mode, *p);
        }
        points.len()
    }
}
