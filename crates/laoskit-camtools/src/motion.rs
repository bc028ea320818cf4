//! Motion command emission.
//!
//! The emitter keeps the pen position and a pending-move flag. A move only
//! records where the next stroke starts; the `0 x y` position command is
//! written lazily by the next line, so a move that is never followed by a
//! line costs nothing.
//!
//! The operation mode is passed in with every call and selects the output
//! channel; the emitter itself holds no routing state.

use crate::channels::ChannelSet;
use laoskit_core::units::format_scaled;
use laoskit_core::{OperationMode, Point};

/// Marker of a position-only command
const MOVE_MARKER: char = '0';
/// Marker of a draw command
const DRAW_MARKER: char = '1';

/// Current pen position and whether a move is still to be written
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PenState {
    pub position: Point,
    pub pending_move: bool,
}

/// Stateful `0`/`1` command emitter
#[derive(Debug, Clone)]
pub struct MotionEmitter {
    pen: PenState,
    scale: f64,
    digits: usize,
}

impl MotionEmitter {
    /// Create an emitter formatting coordinates as `scale * value` with
    /// `digits` decimals
    pub fn new(scale: f64, digits: usize) -> Self {
        Self {
            pen: PenState::default(),
            scale,
            digits,
        }
    }

    pub fn pen(&self) -> PenState {
        self.pen
    }

    pub fn position(&self) -> Point {
        self.pen.position
    }

    /// Record a new position without emitting anything
    pub fn move_to(&mut self, p: Point) {
        self.pen.position = p;
        self.pen.pending_move = true;
    }

    /// Emit a position command right away
    pub fn do_move_to(&mut self, channels: &mut ChannelSet, mode: OperationMode, p: Point) {
        channels.push(mode, self.command(MOVE_MARKER, p));
        self.pen.position = p;
        self.pen.pending_move = false;
    }

    /// Draw from the current position to `p`, flushing a pending move first
    pub fn line_to(&mut self, channels: &mut ChannelSet, mode: OperationMode, p: Point) {
        if self.pen.pending_move {
            channels.push(mode, self.command(MOVE_MARKER, self.pen.position));
            self.pen.pending_move = false;
        }
        channels.push(mode, self.command(DRAW_MARKER, p));
        self.pen.position = p;
    }

    /// Close a subpath by drawing back to its first point
    pub fn close_path(&mut self, channels: &mut ChannelSet, mode: OperationMode, first: Point) {
        self.line_to(channels, mode, first);
    }

    fn command(&self, marker: char, p: Point) -> String {
        format!(
            "{} {} {}",
            marker,
            format_scaled(p.x, self.scale, self.digits),
            format_scaled(p.y, self.scale, self.digits)
        )
    }
}
