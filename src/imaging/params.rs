//! Parameter types for image operations.
//!
//! These types describe *what* to do, not *how* to do it. The geometry
//! engine in [`calculations`](super::calculations) turns the high-level
//! requests ([`ResizeRequest`], [`CropRequest`]) into exact values ([`Size`],
//! [`CropBox`]); the `*Params` structs then carry those values to the
//! [`backend`](super::backend), which does the pixel work.
//!
//! ## Types
//!
//! - [`Size`]: pixel dimensions of a source or a computed target.
//! - [`ResizeMethod`]: Stretch / Fit / Fill.
//! - [`Length`]: absolute pixels or a percentage of a reference extent.
//! - [`Center`]: one [`Length`] per axis, default `(50%, 50%)`.
//! - [`CropBox`]: `(left, top, right, bottom)` in source pixels.
//! - [`Quality`]: lossy encoding quality (1–100). Clamped on construction.
//! - [`Filter`], [`Direction`], [`Rotation`]: closed sets validated at the boundary.

use super::calculations::GeometryError;
use crate::format::Format;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Pixel dimensions (width, height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect_ratio(self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// How to reconcile a requested width *and* height with the source aspect ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMethod {
    /// Exact requested size, aspect ratio ignored.
    #[default]
    Stretch,
    /// Largest size that fits inside the requested box (letterbox).
    Fit,
    /// Smallest size that covers the requested box (overflow is cropped later).
    Fill,
}

impl FromStr for ResizeMethod {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stretch" => Ok(Self::Stretch),
            "fit" => Ok(Self::Fit),
            "fill" => Ok(Self::Fill),
            other => Err(GeometryError::InvalidInput(format!(
                "unknown resize method '{other}' (expected stretch, fit or fill)"
            ))),
        }
    }
}

/// A length along one axis: either absolute pixels or a percentage of the
/// axis extent.
///
/// Text form is `"30"` (pixels) or `"50%"` (percent). Percentages outside
/// `0..=100` are allowed and extrapolate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Length {
    Pixels(u32),
    Percent(f64),
}

impl Length {
    pub const fn percent(value: f64) -> Self {
        Self::Percent(value)
    }

    pub const fn pixels(value: u32) -> Self {
        Self::Pixels(value)
    }
}

impl FromStr for Length {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(number) = s.strip_suffix('%') {
            let value: f64 = number.trim().parse().map_err(|_| {
                GeometryError::InvalidInput(format!("invalid percentage '{s}'"))
            })?;
            if !value.is_finite() {
                return Err(GeometryError::InvalidInput(format!(
                    "percentage must be finite, got '{s}'"
                )));
            }
            return Ok(Self::Percent(value));
        }
        s.parse::<u32>().map(Self::Pixels).map_err(|_| {
            GeometryError::InvalidInput(format!(
                "invalid length '{s}' (expected a non-negative pixel count or a percentage like 50%)"
            ))
        })
    }
}

impl TryFrom<String> for Length {
    type Error = GeometryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Length> for String {
    fn from(value: Length) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixels(px) => write!(f, "{px}"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

/// Crop center, one [`Length`] per axis. Defaults to the image midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Center {
    pub x: Length,
    pub y: Length,
}

impl Center {
    pub const fn new(x: Length, y: Length) -> Self {
        Self { x, y }
    }
}

impl Default for Center {
    fn default() -> Self {
        Self {
            x: Length::Percent(50.0),
            y: Length::Percent(50.0),
        }
    }
}

/// Parses `"X,Y"`, e.g. `"50%,25%"` or `"120,80"`.
impl FromStr for Center {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once(',').ok_or_else(|| {
            GeometryError::InvalidInput(format!("center must be 'X,Y', got '{s}'"))
        })?;
        Ok(Self {
            x: x.parse()?,
            y: y.parse()?,
        })
    }
}

impl fmt::Display for Center {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Crop rectangle in source pixel coordinates. `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CropBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropBox {
    pub fn width(self) -> u32 {
        self.right - self.left
    }

    pub fn height(self) -> u32 {
        self.bottom - self.top
    }

    pub fn size(self) -> Size {
        Size::new(self.width(), self.height())
    }
}

impl fmt::Display for CropBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Resampling filter handed to the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<Filter> for FilterType {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Nearest => FilterType::Nearest,
            Filter::Triangle => FilterType::Triangle,
            Filter::CatmullRom => FilterType::CatmullRom,
            Filter::Gaussian => FilterType::Gaussian,
            Filter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Flip axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Direction {
    /// Mirror left-right.
    Horizontal,
    /// Mirror top-bottom.
    Vertical,
}

impl FromStr for Direction {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            other => Err(GeometryError::InvalidInput(format!(
                "direction must be 'horizontal' or 'vertical', got '{other}'"
            ))),
        }
    }
}

/// Counterclockwise rotation.
///
/// Quarter turns are lossless and swap the axes where needed. Any other
/// angle resamples onto the original canvas, leaving the exposed corners
/// empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rotation {
    None,
    Ccw90,
    Ccw180,
    Ccw270,
    /// Degrees in `(0, 360)` that are not a quarter turn.
    Angle(f64),
}

impl Rotation {
    /// Normalizes `degrees` modulo 360, picking the lossless quarter turn
    /// when one matches exactly.
    pub fn from_degrees(degrees: f64) -> Result<Self, GeometryError> {
        if !degrees.is_finite() {
            return Err(GeometryError::InvalidInput(format!(
                "rotation must be a finite number of degrees, got {degrees}"
            )));
        }
        let normalized = degrees.rem_euclid(360.0);
        // rem_euclid can round a tiny negative up to exactly 360
        let normalized = if normalized >= 360.0 { 0.0 } else { normalized };
        Ok(if normalized == 0.0 {
            Self::None
        } else if normalized == 90.0 {
            Self::Ccw90
        } else if normalized == 180.0 {
            Self::Ccw180
        } else if normalized == 270.0 {
            Self::Ccw270
        } else {
            Self::Angle(normalized)
        })
    }

    pub fn degrees(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Ccw90 => 90.0,
            Self::Ccw180 => 180.0,
            Self::Ccw270 => 270.0,
            Self::Angle(degrees) => degrees,
        }
    }

    /// Size of a `size` image after this rotation.
    pub fn rotated_size(self, size: Size) -> Size {
        match self {
            Self::Ccw90 | Self::Ccw270 => Size::new(size.height, size.width),
            Self::None | Self::Ccw180 | Self::Angle(_) => size,
        }
    }
}

impl FromStr for Rotation {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let degrees: f64 = s.trim().parse().map_err(|_| {
            GeometryError::InvalidInput(format!("invalid rotation '{s}' (expected degrees)"))
        })?;
        Self::from_degrees(degrees)
    }
}

/// A resize request as a caller states it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeRequest {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub method: ResizeMethod,
}

impl ResizeRequest {
    pub fn new(width: Option<u32>, height: Option<u32>, method: ResizeMethod) -> Self {
        Self {
            width,
            height,
            method,
        }
    }

    pub fn width(width: u32) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }

    pub fn height(height: u32) -> Self {
        Self {
            height: Some(height),
            ..Self::default()
        }
    }
}

/// A crop request: output size plus the point it is centered on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRequest {
    pub width: u32,
    pub height: u32,
    pub center: Center,
}

impl CropRequest {
    /// Centered crop of `width` x `height`.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            center: Center::default(),
        }
    }

    pub fn with_center(self, center: Center) -> Self {
        Self { center, ..self }
    }
}

/// Where and how an operation writes its result.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSpec {
    pub path: PathBuf,
    pub format: Format,
    pub quality: Option<Quality>,
}

/// Parameters for an exact resize.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: OutputSpec,
    pub size: Size,
    pub filter: Filter,
}

/// Parameters for extracting a crop box.
#[derive(Debug, Clone, PartialEq)]
pub struct CropParams {
    pub source: PathBuf,
    pub output: OutputSpec,
    pub crop: CropBox,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlipParams {
    pub source: PathBuf,
    pub output: OutputSpec,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RotateParams {
    pub source: PathBuf,
    pub output: OutputSpec,
    pub rotation: Rotation,
}

/// Re-encode without touching pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertParams {
    pub source: PathBuf,
    pub output: OutputSpec,
}
