//! Raster Engraver
//!
//! Encodes the rendered page bitmap as LAOS raster data. Every scanline
//! with content becomes three commands on the engrave channel: a position
//! command at the start of the content, a `9 <bits> <count> <word>...`
//! data command and a draw command to the end of the content.
//!
//! Lines are engraved in serpentine order: the scan direction flips after
//! every emitted line, blank lines leave it untouched.

use crate::channels::ChannelSet;
use crate::error::{RasterError, RasterResult};
use crate::motion::MotionEmitter;
use crate::pixel_buffer::{RasterImage, Rgb8};
use laoskit_core::units::MAX_CHANNEL_VALUE;
use laoskit_core::{OperationMode, Point};
use laoskit_settings::config::MAX_ENGRAVING_BITS;
use laoskit_settings::LaserConfig;
use tracing::{debug, info, warn};

type BoxedIterator<T> = Box<dyn Iterator<Item = T>>;

/// Bits in one packed raster word
const WORD_BITS: u32 = 32;

/// Largest tolerated difference between the horizontal and vertical
/// image factors
const SCALE_MISMATCH_TOLERANCE: f64 = 0.001;

/// Raster data lines travel with stroke engraving
const RASTER_MODE: OperationMode = OperationMode::StrokeEngrave;

/// Quantize a pixel's darkness to `bits` bits.
///
/// White is 0, black is the largest `bits`-bit value. Black is clamped to
/// `2^bits - 1` rather than spilling into the next pixel, so a run of black
/// at 1 bit packs to `4294967295` where the LAOS reference driver writes
/// `4294967294`.
pub fn quantize(pixel: Rgb8, bits: u32) -> u32 {
    let full = 3.0 * MAX_CHANNEL_VALUE as f64;
    let sum: f64 = pixel.iter().map(|&c| c as f64).sum();
    let levels = (1u64 << bits) as f64;
    let value = ((full - sum) / full * levels).round() as u64;
    value.min((1u64 << bits) - 1) as u32
}

/// Whether a pixel is exactly white
fn is_background(pixel: Rgb8) -> bool {
    pixel.iter().map(|&c| c as u32).sum::<u32>() == 3 * MAX_CHANNEL_VALUE
}

/// Packs quantized pixel values into 32-bit words, first value in the
/// least significant bits
#[derive(Debug, Clone)]
pub struct WordPacker {
    bits: u32,
    acc: u64,
    filled: u32,
    words: Vec<u32>,
}

impl WordPacker {
    pub fn new(bits: u32) -> Self {
        Self {
            bits,
            acc: 0,
            filled: 0,
            words: Vec::new(),
        }
    }

    /// Append one value. A value that would not fit in the current word
    /// starts the next one.
    pub fn push(&mut self, value: u32) {
        if self.filled + self.bits > WORD_BITS {
            self.flush();
        }
        self.acc |= (value as u64) << self.filled;
        self.filled += self.bits;
        if self.filled == WORD_BITS {
            self.flush();
        }
    }

    /// Flush the partial word, if any, and return all words
    pub fn finish(mut self) -> Vec<u32> {
        if self.filled > 0 {
            self.flush();
        }
        self.words
    }

    fn flush(&mut self) {
        self.words.push(self.acc as u32);
        self.acc = 0;
        self.filled = 0;
    }
}

/// Serpentine scanline encoder
#[derive(Debug, Clone)]
pub struct RasterEngraver {
    direction: i32,
    scale_x: f64,
    scale_y: f64,
    bits: u32,
}

impl RasterEngraver {
    /// Create an engraver mapping pixels to document points with the given
    /// factors
    pub fn new(scale_x: f64, scale_y: f64, bits: u32) -> RasterResult<Self> {
        if bits == 0 || bits > MAX_ENGRAVING_BITS {
            return Err(RasterError::InvalidBitDepth(bits));
        }
        Ok(Self {
            direction: 1,
            scale_x,
            scale_y,
            bits,
        })
    }

    /// Create an engraver that stretches `image` over the configured page
    pub fn for_image(config: &LaserConfig, image: &dyn RasterImage) -> RasterResult<Self> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(RasterError::UnsupportedLayout(format!(
                "empty image ({}x{})",
                width, height
            )));
        }

        let scale_x = config.page_length / width as f64;
        let scale_y = config.page_width / height as f64;
        if (scale_x - scale_y).abs() > SCALE_MISMATCH_TOLERANCE {
            warn!(
                "Image scaling mismatch: X={} Y={}, the engraving will be distorted",
                scale_x, scale_y
            );
        }
        debug!("Image factor X={}, Y={}", scale_x, scale_y);

        Self::new(scale_x, scale_y, config.engraving_bits)
    }

    /// Current scan direction, `1` left to right, `-1` right to left
    pub fn direction(&self) -> i32 {
        self.direction
    }

    /// First and last non-white pixel of row `y`, or `None` when the row
    /// has nothing to engrave
    pub fn scan_bounds(image: &dyn RasterImage, y: usize) -> Option<(usize, usize)> {
        let width = image.width();
        if width == 0 {
            return None;
        }

        let first = (0..width)
            .find(|&x| !is_background(image.get_pixel(x, y)))
            .unwrap_or(width);

        let mut last = width - 1;
        while last > 0 && is_background(image.get_pixel(last, y)) {
            last -= 1;
        }

        (first < last).then_some((first, last))
    }

    /// Encode every row of `image` into the engrave channel.
    ///
    /// Returns the number of engraved lines.
    pub fn engrave(
        &mut self,
        image: &dyn RasterImage,
        emitter: &mut MotionEmitter,
        channels: &mut ChannelSet,
    ) -> usize {
        let mut engraved = 0;
        for y in 0..image.height() {
            if let Some((first, last)) = Self::scan_bounds(image, y) {
                self.engrave_line(image, y, first, last, emitter, channels);
                engraved += 1;
            }
        }
        info!(
            "Engraved {} of {} raster lines at {} bit(s) per pixel",
            engraved,
            image.height(),
            self.bits
        );
        engraved
    }

    /// Encode the content of row `y` between `first` and `last` inclusive,
    /// in the current direction, then flip the direction
    pub fn engrave_line(
        &mut self,
        image: &dyn RasterImage,
        y: usize,
        first: usize,
        last: usize,
        emitter: &mut MotionEmitter,
        channels: &mut ChannelSet,
    ) {
        let (start, end) = if self.direction == 1 {
            (first, last)
        } else {
            (last, first)
        };
        let doc_y = (image.height() - y) as f64 * self.scale_y;

        emitter.do_move_to(
            channels,
            RASTER_MODE,
            Point::new(start as f64 * self.scale_x, doc_y),
        );

        let columns: BoxedIterator<usize> = if start <= end {
            Box::new(start..=end)
        } else {
            Box::new((end..=start).rev())
        };
        let mut packer = WordPacker::new(self.bits);
        for x in columns {
            packer.push(quantize(image.get_pixel(x, y), self.bits));
        }

        let mut data = format!("9 {} {}", self.bits, start.abs_diff(end));
        for word in packer.finish() {
            data.push(' ');
            data.push_str(&word.to_string());
        }
        channels.push(RASTER_MODE, data);

        emitter.line_to(
            channels,
            RASTER_MODE,
            Point::new(end as f64 * self.scale_x, doc_y),
        );

        self.direction = -self.direction;
    }
}
