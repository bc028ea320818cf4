//! LAOSkit Settings Crate
//!
//! Machine and page parameters ("features") for one document.
//!
//! Features are collected as strings from several sources, later ones
//! overriding earlier ones:
//! - built-in defaults, so every known key always has a value
//! - a configuration file (`laoscfg.ps`, or a JSON/TOML map)
//! - the `%%BeginFeature:` header of the input document itself
//!
//! Once collected, the table is converted into an immutable [`LaserConfig`]
//! that the emitters read from.

pub mod config;
pub mod error;
pub mod features;
pub mod scanner;

pub use config::{default_config_path, LaserConfig, OperationPreset, CONFIG_FILE_NAME};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use features::{keys, FeatureTable};
pub use scanner::{scan_features, HeaderScan};
