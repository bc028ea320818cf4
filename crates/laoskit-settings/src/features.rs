//! The feature table: machine and page parameters keyed by feature name.

use crate::error::{SettingsError, SettingsResult};
use crate::scanner::{scan_features, HeaderScan};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Well-known feature names
pub mod keys {
    pub const PAGE_LENGTH: &str = "*PageLength";
    pub const PAGE_WIDTH: &str = "*PageWidth";
    pub const CUSTOM_PAGE_SIZE: &str = "*CustomPageSize";
    pub const CUTTING_SPEED: &str = "*LaserCuttingSpeed";
    pub const CUTTING_POWER: &str = "*LaserCuttingPower";
    pub const CUTTING_FREQUENCY: &str = "*LaserCuttingFrequency";
    pub const MARKING_SPEED: &str = "*LaserMarkingSpeed";
    pub const MARKING_POWER: &str = "*LaserMarkingPower";
    pub const MARKING_FREQUENCY: &str = "*LaserMarkingFrequency";
    pub const ENGRAVING_SPEED: &str = "*LaserEngravingSpeed";
    pub const ENGRAVING_POWER: &str = "*LaserEngravingPower";
    pub const ENGRAVING_PPI: &str = "*LaserEngravingPPI";
    pub const ENGRAVING_MODE: &str = "*LaserEngravingMode";
    pub const ENGRAVING_INVERT: &str = "*LaserEngravingInvert";
    pub const ENGRAVING_BITS: &str = "*LaserEngravingBits";
    pub const BOUNDARY_BOX: &str = "*LaserBoundaryBox";
    pub const SCALE: &str = "*Scale";
    pub const DIGITS: &str = "*Digits";
    pub const THRESHOLD: &str = "*Threshold";
    pub const PROLOG: &str = "*Prolog";
    pub const TRAILER: &str = "*Trailer";
}

/// Built-in value of every recognised feature.
///
/// Page sizes are in points; the default scale turns points into
/// micrometres.
const DEFAULTS: &[(&str, &str)] = &[
    (keys::PAGE_LENGTH, "595.280029296875"),
    (keys::PAGE_WIDTH, "841.890014648438"),
    (keys::CUTTING_SPEED, "v10"),
    (keys::CUTTING_POWER, "100%"),
    (keys::CUTTING_FREQUENCY, "f1000"),
    (keys::MARKING_SPEED, "mv100"),
    (keys::MARKING_POWER, "m70%"),
    (keys::MARKING_FREQUENCY, "mf2000"),
    (keys::ENGRAVING_SPEED, "100"),
    (keys::ENGRAVING_POWER, "50"),
    (keys::ENGRAVING_PPI, "600"),
    (keys::ENGRAVING_MODE, "BW"),
    (keys::ENGRAVING_INVERT, "False"),
    (keys::ENGRAVING_BITS, "1"),
    (keys::BOUNDARY_BOX, "True"),
    (keys::SCALE, "352.777777778"),
    (keys::DIGITS, "0"),
    (keys::THRESHOLD, "0"),
    (
        keys::PROLOG,
        "; Generated by laoskit _version_ from _filename_ at _date_ \n",
    ),
    (keys::TRAILER, "; www.laoslaser.org"),
];

/// Feature name to string value, always fully defaulted
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    values: BTreeMap<String, String>,
}

impl Default for FeatureTable {
    fn default() -> Self {
        Self {
            values: DEFAULTS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl FeatureTable {
    /// Create a table holding the built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a feature; unknown features read as the empty string
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// Set a feature, returning the previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        if Self::is_known(&key) {
            debug!("feature {} = '{}'", key, value);
        } else {
            debug!("feature {} = '{}' (not used by the backend)", key, value);
        }
        self.values.insert(key, value)
    }

    /// Whether the feature is one of the built-in ones
    pub fn is_known(key: &str) -> bool {
        DEFAULTS.iter().any(|(k, _)| *k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Apply features from a file.
    ///
    /// `.json` and `.toml` files hold a flat map of feature names to
    /// scalar values; names may omit the leading `*`. Any other file is
    /// scanned as a PostScript feature header, and its `%%%LaosInclude:`
    /// texts are returned.
    pub fn apply_file(&mut self, path: &Path) -> SettingsResult<HeaderScan> {
        if !path.is_file() {
            return Err(SettingsError::LoadError(format!(
                "{} is not a readable file",
                path.display()
            )));
        }

        let mut scan = HeaderScan::default();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = std::fs::read_to_string(path)?;
                let map: BTreeMap<String, serde_json::Value> = serde_json::from_str(&content)?;
                for (key, value) in map {
                    let text = match value {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Number(n) => n.to_string(),
                        serde_json::Value::Bool(b) => capitalized_bool(b),
                        other => return Err(non_scalar(&key, &other.to_string())),
                    };
                    self.set(normalize_key(&key), text);
                    scan.features_read += 1;
                }
                Ok(scan)
            }
            Some("toml") => {
                let content = std::fs::read_to_string(path)?;
                let map: BTreeMap<String, toml::Value> = toml::from_str(&content)?;
                for (key, value) in map {
                    let text = match value {
                        toml::Value::String(s) => s,
                        toml::Value::Integer(i) => i.to_string(),
                        toml::Value::Float(f) => f.to_string(),
                        toml::Value::Boolean(b) => capitalized_bool(b),
                        other => return Err(non_scalar(&key, &other.to_string())),
                    };
                    self.set(normalize_key(&key), text);
                    scan.features_read += 1;
                }
                Ok(scan)
            }
            _ => {
                let file = File::open(path)?;
                Ok(scan_features(BufReader::new(file), self)?)
            }
        }
    }
}

/// Boolean features are spelled the PostScript-PPD way
fn capitalized_bool(b: bool) -> String {
    if b { "True" } else { "False" }.to_string()
}

fn normalize_key(key: &str) -> String {
    if key.starts_with('*') {
        key.to_string()
    } else {
        format!("*{}", key)
    }
}

fn non_scalar(key: &str, value: &str) -> SettingsError {
    SettingsError::InvalidSetting {
        key: key.to_string(),
        reason: format!("expected a scalar value, got {}", value),
    }
}
