//! High-level image operations.
//!
//! These functions combine calculations with backend execution: identify the
//! source, compute exact geometry, then hand the result to the backend.
//! The `plan_*` functions stop before the backend call, so the full
//! parameter generation is testable without touching pixels.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{calculate_crop_box, calculate_dimensions};
use super::params::{
    ConvertParams, CropParams, CropRequest, Direction, Filter, FlipParams, OutputSpec,
    ResizeParams, ResizeRequest, RotateParams, Rotation, Size,
};
use crate::image::{Image, ImageInfo};
use crate::naming;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Outcome of one file operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transformed {
    pub source: PathBuf,
    /// Path actually written (extension matches the output format).
    pub output: PathBuf,
    pub before: Size,
    pub after: Size,
}

impl Transformed {
    fn new(source: &Path, output: &OutputSpec, before: Size, after: Size) -> Self {
        Self {
            source: source.to_path_buf(),
            output: naming::output_filename(&output.path, output.format),
            before,
            after,
        }
    }
}

/// Full description of an image file: dimensions, format, pixel layout.
pub fn describe_file(path: &Path) -> Result<ImageInfo> {
    Ok(Image::open(path)?.info())
}

/// Plan a resize without executing it.
pub fn plan_resize(
    source: &Path,
    output: &OutputSpec,
    original: Size,
    request: &ResizeRequest,
    filter: Filter,
) -> Result<ResizeParams> {
    let size = calculate_dimensions(request.width, request.height, original, request.method)?;
    Ok(ResizeParams {
        source: source.to_path_buf(),
        output: output.clone(),
        size,
        filter,
    })
}

/// Plan a crop without executing it.
pub fn plan_crop(
    source: &Path,
    output: &OutputSpec,
    original: Size,
    request: &CropRequest,
) -> Result<CropParams> {
    let crop = calculate_crop_box(request.width, request.height, original, request.center)?;
    Ok(CropParams {
        source: source.to_path_buf(),
        output: output.clone(),
        crop,
    })
}

/// Resize `source` per `request` and write it to `output`.
pub fn resize_file(
    backend: &impl ImageBackend,
    source: &Path,
    output: &OutputSpec,
    request: &ResizeRequest,
    filter: Filter,
) -> Result<Transformed> {
    let before = backend.identify(source)?;
    let params = plan_resize(source, output, before, request, filter)?;
    log::debug!(
        "{}: resize {} -> {} ({:?}, {:?})",
        source.display(),
        before,
        params.size,
        request.method,
        filter
    );
    backend.resize(&params)?;
    Ok(Transformed::new(source, output, before, params.size))
}

/// Crop `source` per `request` and write it to `output`.
pub fn crop_file(
    backend: &impl ImageBackend,
    source: &Path,
    output: &OutputSpec,
    request: &CropRequest,
) -> Result<Transformed> {
    let before = backend.identify(source)?;
    let params = plan_crop(source, output, before, request)?;
    log::debug!(
        "{}: crop {} at {} -> {}",
        source.display(),
        before,
        request.center,
        params.crop
    );
    backend.crop(&params)?;
    Ok(Transformed::new(source, output, before, params.crop.size()))
}

pub fn flip_file(
    backend: &impl ImageBackend,
    source: &Path,
    output: &OutputSpec,
    direction: Direction,
) -> Result<Transformed> {
    let before = backend.identify(source)?;
    log::debug!("{}: flip {:?}", source.display(), direction);
    backend.flip(&FlipParams {
        source: source.to_path_buf(),
        output: output.clone(),
        direction,
    })?;
    Ok(Transformed::new(source, output, before, before))
}

/// Rotate counterclockwise. Quarter turns swap the reported axes; other
/// angles keep the canvas.
pub fn rotate_file(
    backend: &impl ImageBackend,
    source: &Path,
    output: &OutputSpec,
    rotation: Rotation,
) -> Result<Transformed> {
    let before = backend.identify(source)?;
    log::debug!("{}: rotate {}°", source.display(), rotation.degrees());
    backend.rotate(&RotateParams {
        source: source.to_path_buf(),
        output: output.clone(),
        rotation,
    })?;
    Ok(Transformed::new(
        source,
        output,
        before,
        rotation.rotated_size(before),
    ))
}

/// Re-encode `source` into the output format.
pub fn convert_file(
    backend: &impl ImageBackend,
    source: &Path,
    output: &OutputSpec,
) -> Result<Transformed> {
    let before = backend.identify(source)?;
    log::debug!("{}: convert to {}", source.display(), output.format);
    backend.convert(&ConvertParams {
        source: source.to_path_buf(),
        output: output.clone(),
    })?;
    Ok(Transformed::new(source, output, before, before))
}
