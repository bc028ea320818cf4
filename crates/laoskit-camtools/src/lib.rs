//! # LAOSkit CAM Tools
//!
//! Turns classified drawing primitives into LAOS controller commands.
//!
//! ## Pipeline
//!
//! - **Classifier**: maps a path's paint attributes to a machine operation
//! - **Motion Emitter**: pen state and `0`/`1` motion commands
//! - **Curve Flattener**: cubic Béziers to polylines
//! - **Raster Engraver**: serpentine scanline encoding of the page bitmap
//! - **Document**: prolog, presets, per-operation channels and trailer
//!
//! ## Output channels
//!
//! Commands for cutting, marking and engraving are collected separately and
//! written engraving first, cutting last, so that parts are not cut loose
//! before they have been engraved.

pub mod channels;
pub mod classifier;
pub mod document;
pub mod error;
pub mod flatten;
pub mod motion;
pub mod pixel_buffer;
pub mod raster_engraver;

// Re-export commonly used items
pub use channels::{ChannelSet, OutputChannel};
pub use classifier::classify;
pub use document::{DocumentInfo, LaosDocument};
pub use error::{CamToolError, CamToolResult, RasterError, RasterResult};
pub use flatten::{bezier_point, CurveFlattener, MAX_FIT_POINTS, MIN_FIT_POINTS};
pub use motion::{MotionEmitter, PenState};
pub use pixel_buffer::{PixelBuffer, RasterImage, Rgb8};
pub use raster_engraver::{quantize, RasterEngraver, WordPacker};
