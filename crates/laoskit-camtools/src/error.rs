//! Error types for the CAM tools crate.
//!
//! [`CamToolError`] is what document assembly returns. Raster problems get
//! their own [`RasterError`] because they never abort a document: the
//! raster pass logs them and is skipped.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during document generation.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// The drawing stream broke its contract.
    #[error(transparent)]
    Drawing(#[from] laoskit_core::Error),

    /// An operation was called out of the open/draw/close order.
    #[error("Document generation failed: {0}")]
    GenerationFailed(String),

    /// I/O error while writing the output document.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Errors of the raster engraving pass.
#[derive(Error, Debug)]
pub enum RasterError {
    /// The rendered page image does not exist.
    #[error("Raster image {0} not found")]
    NotFound(PathBuf),

    /// The image file could not be decoded.
    #[error("Failed to decode raster image: {0}")]
    Decode(#[from] image::ImageError),

    /// The decoded image is not 8-bit RGB.
    #[error("Unsupported pixel layout: {0}")]
    UnsupportedLayout(String),

    /// The engraving bit depth cannot be packed into 32-bit words.
    #[error("Unsupported engraving bit depth: {0}")]
    InvalidBitDepth(u32),
}

/// Result type alias for document generation.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for the raster pass.
pub type RasterResult<T> = Result<T, RasterError>;
