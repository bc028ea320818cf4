//! Typed machine configuration.
//!
//! [`LaserConfig`] is built once from a fully populated [`FeatureTable`]
//! and is read-only afterwards. Numeric features are parsed leniently
//! (`atoi`/`atof` style), so a malformed value reads as zero instead of
//! failing; [`LaserConfig::validate`] catches the values no vector output
//! can be produced with. The engraving bit depth is checked by the raster
//! pass itself.

use crate::error::{ConfigError, ConfigResult};
use crate::features::{keys, FeatureTable};
use laoskit_core::units::{format_scaled, leading_float, leading_int, POINTS_PER_INCH};
use std::path::PathBuf;

/// Name of the machine configuration file
pub const CONFIG_FILE_NAME: &str = "laoscfg.ps";

/// Largest supported engraving bit depth
pub const MAX_ENGRAVING_BITS: u32 = 8;

/// Speed and power preset of one operation, in controller units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationPreset {
    pub speed: i64,
    pub power: i64,
}

impl OperationPreset {
    /// Build a preset from the raw feature strings.
    ///
    /// `speed_prefix` leading characters are dropped from the speed,
    /// `power_prefix` leading and `power_suffix` trailing characters from
    /// the power, before the integer part is read. Speed is then scaled by
    /// 1000 and power by 100.
    pub fn from_features(
        speed: &str,
        speed_prefix: usize,
        power: &str,
        power_prefix: usize,
        power_suffix: usize,
    ) -> Self {
        Self {
            speed: leading_int(strip_chars(speed, speed_prefix, 0)) * 1000,
            power: leading_int(strip_chars(power, power_prefix, power_suffix)) * 100,
        }
    }

    /// The `7 100` / `7 101` command lines selecting this preset
    pub fn commands(&self) -> [String; 2] {
        [format!("7 100 {}", self.speed), format!("7 101 {}", self.power)]
    }
}

/// Drop `leading` characters from the front and `trailing` from the back
fn strip_chars(value: &str, leading: usize, trailing: usize) -> &str {
    let count = value.chars().count();
    if leading + trailing >= count {
        return "";
    }
    let start = value
        .char_indices()
        .nth(leading)
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    let end = value
        .char_indices()
        .nth(count - trailing)
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    &value[start..end]
}

/// Immutable machine and page configuration for one document
#[derive(Debug, Clone, PartialEq)]
pub struct LaserConfig {
    /// Page length in points (first page dimension)
    pub page_length: f64,
    /// Page width in points (second page dimension)
    pub page_width: f64,
    pub cutting: OperationPreset,
    pub marking: OperationPreset,
    pub engraving: OperationPreset,
    /// Raster resolution the page image is rendered at
    pub engraving_ppi: f64,
    /// Raster engraving mode; only `BW` is engraved
    pub engraving_mode: String,
    /// Bits per engraved pixel
    pub engraving_bits: u32,
    /// Emit the page bounding box at the start of the job
    pub boundary_box: bool,
    /// Document units to machine units
    pub scale: f64,
    /// Decimals of every coordinate field
    pub digits: usize,
    pub prolog: String,
    pub trailer: String,
}

impl Default for LaserConfig {
    fn default() -> Self {
        Self::from_features(&FeatureTable::default())
    }
}

impl LaserConfig {
    /// Read every feature the emitters need
    pub fn from_features(features: &FeatureTable) -> Self {
        Self {
            page_length: leading_float(features.get(keys::PAGE_LENGTH)),
            page_width: leading_float(features.get(keys::PAGE_WIDTH)),
            cutting: OperationPreset::from_features(
                features.get(keys::CUTTING_SPEED),
                1,
                features.get(keys::CUTTING_POWER),
                0,
                1,
            ),
            marking: OperationPreset::from_features(
                features.get(keys::MARKING_SPEED),
                2,
                features.get(keys::MARKING_POWER),
                1,
                1,
            ),
            engraving: OperationPreset::from_features(
                features.get(keys::ENGRAVING_SPEED),
                0,
                features.get(keys::ENGRAVING_POWER),
                0,
                0,
            ),
            engraving_ppi: leading_float(features.get(keys::ENGRAVING_PPI)),
            engraving_mode: features.get(keys::ENGRAVING_MODE).to_string(),
            engraving_bits: u32::try_from(leading_int(features.get(keys::ENGRAVING_BITS)))
                .unwrap_or(0),
            boundary_box: features.get(keys::BOUNDARY_BOX) == "True",
            scale: leading_float(features.get(keys::SCALE)),
            digits: leading_float(features.get(keys::DIGITS)).max(0.0) as usize,
            prolog: features.get(keys::PROLOG).to_string(),
            trailer: features.get(keys::TRAILER).to_string(),
        }
    }

    /// Validate scale and page size
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(out_of_range(keys::SCALE, self.scale));
        }

        if !(self.page_length > 0.0) {
            return Err(out_of_range(keys::PAGE_LENGTH, self.page_length));
        }

        if !(self.page_width > 0.0) {
            return Err(out_of_range(keys::PAGE_WIDTH, self.page_width));
        }

        Ok(())
    }

    /// Whether the raster pass runs for this document
    pub fn is_monochrome_engraving(&self) -> bool {
        self.engraving_mode == "BW"
    }

    /// Raster pixels per document point
    pub fn image_factor(&self) -> f64 {
        self.engraving_ppi / POINTS_PER_INCH
    }

    /// Format a document coordinate as a command field
    pub fn format_coordinate(&self, value: f64) -> String {
        format_scaled(value, self.scale, self.digits)
    }
}

fn out_of_range(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Default location of the machine configuration file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("laoskit").join(CONFIG_FILE_NAME))
}
