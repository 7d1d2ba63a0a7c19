//! Pure calculation functions for image geometry.
//!
//! All functions here are pure and testable without any I/O or images:
//!
//! - [`resolve_length`] turns a [`Length`] into absolute pixels.
//! - [`calculate_dimensions`] turns a width/height/method request into a target [`Size`].
//! - [`calculate_crop_box`] turns a crop size and [`Center`] into a [`CropBox`].
//!
//! Non-integer results are rounded to nearest, halves away from zero.

use super::params::{Center, CropBox, Length, ResizeMethod, Size};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Resolve a length against the extent it is relative to.
///
/// Pixel lengths are returned unchanged; percentages become
/// `round(total * p / 100)`. Percentages may extrapolate beyond `total`
/// or below zero.
///
/// # Examples
/// ```
/// # use da_vinci::imaging::{Length, resolve_length};
/// assert_eq!(resolve_length(Length::Percent(50.0), 200).unwrap(), 100);
/// assert_eq!(resolve_length(Length::Percent(150.0), 200).unwrap(), 300);
/// assert_eq!(resolve_length(Length::Pixels(30), 7).unwrap(), 30);
/// ```
pub fn resolve_length(length: Length, total: i64) -> Result<i64, GeometryError> {
    match length {
        Length::Pixels(px) => Ok(i64::from(px)),
        Length::Percent(_) if total < 0 => Err(GeometryError::InvalidInput(format!(
            "cannot resolve a percentage against negative total {total}"
        ))),
        Length::Percent(p) => Ok((total as f64 * p / 100.0).round() as i64),
    }
}

/// Calculate the output size for a resize request.
///
/// - Neither dimension given: error.
/// - One dimension given: the other follows the source aspect ratio and
///   `method` is ignored.
/// - Both given: [`ResizeMethod::Stretch`] returns them verbatim;
///   [`ResizeMethod::Fit`] scales by the smaller axis ratio so the result fits
///   inside the box; [`ResizeMethod::Fill`] scales by the larger one so the
///   result covers it.
///
/// Fit and Fill apply one scale factor to both source axes, so rounding
/// drift never distorts the aspect ratio by more than a pixel. Each output
/// axis is at least 1.
///
/// # Arguments
/// * `width`, `height` - Requested target dimensions
/// * `source` - Original image dimensions
/// * `method` - Policy when both dimensions are given
///
/// # Examples
/// ```
/// # use da_vinci::imaging::{ResizeMethod, Size, calculate_dimensions};
/// let source = Size::new(800, 600);
/// let fit = calculate_dimensions(Some(200), Some(200), source, ResizeMethod::Fit).unwrap();
/// assert_eq!(fit, Size::new(200, 150));
///
/// let fill = calculate_dimensions(Some(200), Some(200), source, ResizeMethod::Fill).unwrap();
/// assert_eq!(fill, Size::new(267, 200));
/// ```
pub fn calculate_dimensions(
    width: Option<u32>,
    height: Option<u32>,
    source: Size,
    method: ResizeMethod,
) -> Result<Size, GeometryError> {
    ensure_source(source)?;
    let src_w = source.width as f64;
    let src_h = source.height as f64;

    let (out_w, out_h) = match (width, height) {
        (None, None) => {
            return Err(GeometryError::InvalidInput(
                "at least one target dimension required".into(),
            ));
        }
        (Some(w), None) => {
            let w = w as f64;
            (w, (w * (src_h / src_w)).round())
        }
        (None, Some(h)) => {
            let h = h as f64;
            ((h * (src_w / src_h)).round(), h)
        }
        (Some(w), Some(h)) => {
            let (w, h) = (w as f64, h as f64);
            match method {
                ResizeMethod::Stretch => (w, h),
                ResizeMethod::Fit => {
                    let scale = (w / src_w).min(h / src_h);
                    ((src_w * scale).round(), (src_h * scale).round())
                }
                ResizeMethod::Fill => {
                    let scale = (w / src_w).max(h / src_h);
                    ((src_w * scale).round(), (src_h * scale).round())
                }
            }
        }
    };

    Ok(Size::new(at_least_one(out_w), at_least_one(out_h)))
}

/// Calculate the pixel box for a crop of `width` x `height` centered on `center`.
///
/// The box is first centered on the resolved point (the half-size split
/// rounds toward the top-left), then shifted back inside the source if it
/// overhangs an edge. An axis larger than the source is clamped to the full
/// source extent instead.
///
/// # Examples
/// ```
/// # use da_vinci::imaging::{Center, CropBox, Length, Size, calculate_crop_box};
/// let b = calculate_crop_box(40, 40, Size::new(100, 100), Center::default()).unwrap();
/// assert_eq!(b, CropBox { left: 30, top: 30, right: 70, bottom: 70 });
///
/// let corner = Center::new(Length::Percent(0.0), Length::Percent(0.0));
/// let b = calculate_crop_box(40, 40, Size::new(100, 100), corner).unwrap();
/// assert_eq!(b, CropBox { left: 0, top: 0, right: 40, bottom: 40 });
/// ```
pub fn calculate_crop_box(
    width: u32,
    height: u32,
    source: Size,
    center: Center,
) -> Result<CropBox, GeometryError> {
    if width == 0 || height == 0 {
        return Err(GeometryError::InvalidInput(format!(
            "crop dimensions must be positive, got {width}x{height}"
        )));
    }
    ensure_source(source)?;

    let cx = resolve_length(center.x, i64::from(source.width))?;
    let cy = resolve_length(center.y, i64::from(source.height))?;

    let (left, right) = place_span(cx, width, source.width);
    let (top, bottom) = place_span(cy, height, source.height);

    Ok(CropBox {
        left,
        top,
        right,
        bottom,
    })
}

/// Position a span of `len` centered on `center` within `[0, extent]`.
fn place_span(center: i64, len: u32, extent: u32) -> (u32, u32) {
    if len >= extent {
        return (0, extent);
    }
    let max_start = i64::from(extent - len);
    let start = (center - i64::from(len) / 2).clamp(0, max_start);
    // In range: 0 <= start <= extent - len
    let start = start as u32;
    (start, start + len)
}

fn ensure_source(source: Size) -> Result<(), GeometryError> {
    if source.is_empty() {
        return Err(GeometryError::InvalidInput(format!(
            "source dimensions must be positive, got {source}"
        )));
    }
    Ok(())
}

fn at_least_one(value: f64) -> u32 {
    (value as u32).max(1)
}
