//! Tool configuration module.
//!
//! Handles loading, validating, and merging `da-vinci.toml`. Stock defaults
//! are overridden by the user file, and command-line flags override both.
//!
//! ## Config File Location
//!
//! `da-vinci.toml` is read from the current directory, or from the directory
//! passed with `--config`:
//!
//! ```text
//! photos/
//! ├── da-vinci.toml
//! ├── dawn.jpg
//! └── dusk.png
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! # format = "webp"         # Output format (omit to keep the source format)
//! # quality = 90            # JPEG/AVIF quality 1-100 (omit for encoder default)
//! suffix = ""               # Appended to the file stem, e.g. "-small"
//!
//! [resize]
//! method = "stretch"        # stretch | fit | fill
//! filter = "lanczos3"       # nearest | triangle | catmull-rom | gaussian | lanczos3
//!
//! [crop]
//! center = { x = "50%", y = "50%" }  # pixels ("120") or percent ("25%")
//!
//! [processing]
//! # max_processes = 4       # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::format::Format;
use crate::imaging::{Center, Filter, ResizeMethod};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the config directory.
pub const CONFIG_FILE: &str = "da-vinci.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `da-vinci.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where and how results are written.
    pub output: OutputConfig,
    /// Defaults for the `resize` command.
    pub resize: ResizeConfig,
    /// Defaults for the `crop` command.
    pub crop: CropConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .output
            .quality
            .is_some_and(|q| !(1..=100).contains(&q))
        {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        if self.output.suffix.contains(std::path::is_separator) {
            return Err(ConfigError::Validation(
                "output.suffix must not contain path separators".into(),
            ));
        }
        Ok(())
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Target format. `None` keeps each source's own format.
    pub format: Option<Format>,
    /// Encoding quality for lossy formats. `None` uses the encoder default.
    pub quality: Option<u32>,
    /// Appended to the file stem of every output.
    pub suffix: String,
}

/// Resize defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    pub method: ResizeMethod,
    pub filter: Filter,
}

/// Crop defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropConfig {
    /// Crop center, per axis in pixels or percent.
    pub center: Center,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image processing workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Loading and merging
// =============================================================================

/// Stock defaults as a TOML value, the base layer for merging.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(Config::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `da-vinci.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no config file.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    log::debug!("reading {}", config_path.display());
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<Config, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `da-vinci.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<Config, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `da-vinci.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# da-vinci Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as da-vinci.toml in the working directory, or point
# --config at the directory containing it. Command-line flags override it.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Format to write: jpeg, png, gif, bmp, tiff, webp, avif.
# Omit to keep each source image's own format.
# format = "webp"

# Quality for lossy formats (JPEG, AVIF), 1-100.
# Omit to use the encoder's default.
# quality = 90

# Appended to the file stem of every output, e.g. "-small" turns
# dawn.jpg into dawn-small.jpg. With no suffix, no --out-dir and no
# format change, the source file is overwritten.
suffix = ""

# ---------------------------------------------------------------------------
# Resize
# ---------------------------------------------------------------------------
[resize]
# stretch: exactly the requested size (aspect may change)
# fit:     largest size inside the box, aspect preserved
# fill:    smallest size covering the box, aspect preserved
method = "stretch"

# Resampling filter: nearest, triangle, catmull-rom, gaussian, lanczos3
filter = "lanczos3"

# ---------------------------------------------------------------------------
# Crop
# ---------------------------------------------------------------------------
[crop]
# Center of the crop box. Each axis is pixels ("120") or a percentage
# of the image extent ("25%"). The box is shifted to stay inside the image.
center = { x = "50%", y = "50%" }

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers. Omit for auto (= number of CPU cores).
# Values larger than the core count are clamped down.
# max_processes = 4
"##
}

// =============================================================================
// Tests
// =============================================================================
