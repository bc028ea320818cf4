//! LAOS document assembly.
//!
//! A [`LaosDocument`] owns the output sink, the configuration and the three
//! operation channels of one job. Its lifecycle is
//! `open() -> draw_path()* -> attach_raster_*()? -> close()`:
//!
//! - `open` writes the prolog and bounding box straight to the sink and
//!   seeds every channel with its speed/power preset
//! - `draw_path` classifies a path and emits its motion commands into the
//!   channel of its operation
//! - `close` runs the raster pass, then writes the engrave, mark and cut
//!   channels followed by the trailer

use crate::channels::ChannelSet;
use crate::classifier::classify;
use crate::error::{CamToolError, CamToolResult, RasterResult};
use crate::flatten::CurveFlattener;
use crate::motion::MotionEmitter;
use crate::pixel_buffer::{PixelBuffer, RasterImage};
use crate::raster_engraver::RasterEngraver;
use laoskit_core::{DrawnPath, OperationMode, PathPrimitive};
use laoskit_settings::LaserConfig;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Values substituted into the prolog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub version: String,
    pub filename: String,
    pub date: String,
}

impl DocumentInfo {
    /// Info for `filename` converted now, by this version of the crate
    pub fn now(filename: impl Into<String>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            filename: filename.into(),
            date: chrono::Local::now().format("%c").to_string(),
        }
    }

    /// Replace the first `_version_`, `_filename_` and `_date_` in `template`
    pub fn substitute(&self, template: &str) -> String {
        template
            .replacen("_version_", &self.version, 1)
            .replacen("_filename_", &self.filename, 1)
            .replacen("_date_", &self.date, 1)
    }
}

/// Where the page raster comes from
enum RasterSource {
    Image(Box<dyn RasterImage>),
    File(PathBuf),
}

impl RasterSource {
    fn load(self) -> RasterResult<Box<dyn RasterImage>> {
        match self {
            Self::Image(image) => Ok(image),
            Self::File(path) => Ok(Box::new(PixelBuffer::from_file(path)?)),
        }
    }
}

/// One LAOS job being written to `W`
pub struct LaosDocument<W: Write> {
    sink: W,
    config: LaserConfig,
    info: DocumentInfo,
    channels: ChannelSet,
    emitter: MotionEmitter,
    flattener: CurveFlattener,
    mode: OperationMode,
    raster: Option<RasterSource>,
    paths: usize,
    opened: bool,
}

impl<W: Write> LaosDocument<W> {
    pub fn new(sink: W, config: LaserConfig, info: DocumentInfo) -> Self {
        let emitter = MotionEmitter::new(config.scale, config.digits);
        let flattener = CurveFlattener::new(config.scale);
        Self {
            sink,
            config,
            info,
            channels: ChannelSet::new(),
            emitter,
            flattener,
            mode: OperationMode::Undefined,
            raster: None,
            paths: 0,
            opened: false,
        }
    }

    pub fn config(&self) -> &LaserConfig {
        &self.config
    }

    /// Operation of the most recently drawn path
    pub fn current_mode(&self) -> OperationMode {
        self.mode
    }

    /// Write text verbatim ahead of the prolog
    pub fn include(&mut self, text: &str) -> CamToolResult<()> {
        if self.opened {
            return Err(CamToolError::GenerationFailed(
                "includes must be written before the document is opened".to_string(),
            ));
        }
        self.sink.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Write the prolog and bounding box and seed the channel presets
    pub fn open(&mut self) -> CamToolResult<()> {
        if self.opened {
            return Err(CamToolError::GenerationFailed(
                "document is already open".to_string(),
            ));
        }

        let prolog = self.info.substitute(&self.config.prolog);
        self.sink.write_all(prolog.as_bytes())?;

        if self.config.boundary_box {
            writeln!(self.sink, "7 201 0")?;
            writeln!(
                self.sink,
                "7 202 {}",
                self.config.format_coordinate(self.config.page_length)
            )?;
            writeln!(self.sink, "7 203 0")?;
            writeln!(
                self.sink,
                "7 204 {}",
                self.config.format_coordinate(self.config.page_width)
            )?;
        }

        for line in self.config.cutting.commands() {
            self.channels.cut.push_line(line);
        }
        for line in self.config.marking.commands() {
            self.channels.mark.push_line(line);
        }
        for line in self.config.engraving.commands() {
            self.channels.engrave.push_line(line);
        }

        self.opened = true;
        info!(
            "Opened LAOS document for {} (scale {}, {} digits)",
            self.info.filename, self.config.scale, self.config.digits
        );
        Ok(())
    }

    /// Classify `path` and emit its motion commands.
    ///
    /// Returns the operation the path was assigned. An element the path
    /// walker does not understand is a contract violation of the caller and
    /// is returned as [`laoskit_core::Error::UnexpectedPrimitive`].
    pub fn draw_path(&mut self, path: &DrawnPath) -> CamToolResult<OperationMode> {
        self.ensure_open()?;
        let index = self.paths;
        self.paths += 1;

        if let Some(element) = path
            .elements
            .iter()
            .position(|e| matches!(e, PathPrimitive::Unknown))
        {
            return Err(laoskit_core::Error::UnexpectedPrimitive {
                path: index,
                index: element,
            }
            .into());
        }

        let mode = classify(&path.paint);
        if mode != self.mode {
            debug!("path {}: operation {} -> {}", index, self.mode, mode);
            self.mode = mode;
        }

        if !mode.emits_vectors() {
            debug!("path {}: {} produces no vector output", index, mode);
            return Ok(mode);
        }
        if path.elements.is_empty() {
            debug!("path {} is empty", index);
            return Ok(mode);
        }

        let mut current = path.first_point().unwrap_or(self.emitter.position());
        let mut subpath_start = current;

        for element in &path.elements {
            match *element {
                PathPrimitive::MoveTo(p) => {
                    self.emitter.move_to(p);
                    current = p;
                    subpath_start = p;
                }
                PathPrimitive::LineTo(p) => {
                    self.emitter.line_to(&mut self.channels, mode, p);
                    current = p;
                }
                PathPrimitive::ClosePath => {
                    self.emitter
                        .close_path(&mut self.channels, mode, subpath_start);
                    current = subpath_start;
                }
                PathPrimitive::CurveTo { cp1, cp2, end } => {
                    self.flattener.emit(
                        &mut self.emitter,
                        &mut self.channels,
                        mode,
                        current,
                        cp1,
                        cp2,
                        end,
                    );
                    current = end;
                }
                // rejected before emission
                PathPrimitive::Unknown => {}
            }
        }

        Ok(mode)
    }

    /// Use an already decoded page image for the raster pass
    pub fn attach_raster_image(&mut self, image: Box<dyn RasterImage>) {
        self.raster = Some(RasterSource::Image(image));
    }

    /// Decode the page image from `path` when the document closes
    pub fn attach_raster_file(&mut self, path: impl Into<PathBuf>) {
        self.raster = Some(RasterSource::File(path.into()));
    }

    /// Run the raster pass, write all channels and the trailer and hand
    /// back the sink
    pub fn close(mut self) -> CamToolResult<W> {
        self.ensure_open()?;

        self.engrave_raster();

        let written = self.channels.concatenate_into(&mut self.sink)?;
        self.sink.write_all(self.config.trailer.as_bytes())?;
        self.sink.flush()?;

        info!(
            "Closed LAOS document: {} paths, {} command lines",
            self.paths, written
        );
        Ok(self.sink)
    }

    /// Raster pass; every failure is logged and skips only this pass
    fn engrave_raster(&mut self) {
        let Some(source) = self.raster.take() else {
            debug!("No raster image attached");
            return;
        };

        if !self.config.is_monochrome_engraving() {
            info!(
                "Engraving mode {} is not BW, raster image ignored",
                self.config.engraving_mode
            );
            return;
        }

        let result = source.load().and_then(|image| {
            let mut engraver = RasterEngraver::for_image(&self.config, image.as_ref())?;
            Ok(engraver.engrave(image.as_ref(), &mut self.emitter, &mut self.channels))
        });

        if let Err(e) = result {
            warn!("{}, skip engraving", e);
        }
    }

    fn ensure_open(&self) -> CamToolResult<()> {
        if self.opened {
            Ok(())
        } else {
            Err(CamToolError::GenerationFailed(
                "document is not open".to_string(),
            ))
        }
    }
}
