//! # LAOSkit Core
//!
//! Core types shared by the LAOSkit crates: document-space geometry,
//! paint attributes and the operation modes derived from them, the path
//! primitives handed over by the upstream path iterator, and the number
//! formatting rules of the LAOS command language.

pub mod error;
pub mod geometry;
pub mod paint;
pub mod path;
pub mod units;

pub use error::{Error, Result};
pub use geometry::Point;
pub use paint::{OperationMode, PaintAttributes};
pub use path::{DrawnPath, PathPrimitive};
pub use units::{format_scaled, leading_float, leading_int, MAX_CHANNEL_VALUE, POINTS_PER_INCH};
