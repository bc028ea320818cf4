//! # LAOSkit
//!
//! Converts drawings into command files for LAOS laser cutters.
//!
//! ## Architecture
//!
//! LAOSkit is organized as a workspace with multiple crates:
//!
//! 1. **laoskit-core** - Geometry, paint attributes, operation modes, path primitives
//! 2. **laoskit-settings** - Feature table, feature-header scanner, machine configuration
//! 3. **laoskit-camtools** - Classifier, motion emitter, curve flattener, raster engraver,
//!    document assembly
//! 4. **laoskit** - Command-line driver that integrates all crates
//!
//! ## Output
//!
//! A job is plain text: the prolog, the optional page bounding box, then the
//! engrave, mark and cut blocks (each opened by its speed/power preset) and
//! finally the trailer.

pub mod cli;
pub mod job;

pub use cli::{parse_args, Command, JobOptions, USAGE};
pub use job::{load_features, run, Drawing, JobSummary};

pub use laoskit_core::{
    DrawnPath, Error, OperationMode, PaintAttributes, PathPrimitive, Point, Result,
};

pub use laoskit_settings::{
    default_config_path, keys, FeatureTable, HeaderScan, LaserConfig, OperationPreset,
    SettingsError,
};

pub use laoskit_camtools::{
    classify, CamToolError, ChannelSet, CurveFlattener, DocumentInfo, LaosDocument,
    MotionEmitter, PixelBuffer, RasterEngraver, RasterError, RasterImage,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - stderr output, so a job written to stdout stays clean
/// - RUST_LOG environment variable support (default `info`)
/// - JSON lines instead of text when `json` is set
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
