//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::ImageReader::into_dimensions` (header only) |
//! | Decode (JPEG, PNG, GIF, BMP, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | Resize | `DynamicImage::resize_exact` with the requested [`Filter`](super::params::Filter) |
//! | Crop | `DynamicImage::crop_imm` |
//! | Flip / rotate | `fliph` / `flipv` / `rotate90` / `rotate180` / `rotate270`; other angles `imageproc::geometric_transformations::rotate_about_center` |
//! | Encode → JPEG | `JpegEncoder::new_with_quality` (alpha dropped) |
//! | Encode → AVIF | `AvifEncoder` (rav1e, speed 6) |
//! | Encode → others | `DynamicImage::write_to` |
//!
//! The pixel work lives on [`Image`]; this backend is the path-to-path
//! adapter the batch [`operations`](super::operations) drive.

use super::backend::{BackendError, ImageBackend};
use super::calculations::GeometryError;
use super::params::{
    ConvertParams, CropParams, FlipParams, OutputSpec, ResizeParams, RotateParams, Size,
};
use crate::image::Image;
use image::ImageReader;
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply the output format and quality, then write.
fn save(image: Image, output: &OutputSpec) -> Result<(), BackendError> {
    let image = image.with_format(output.format);
    let image = match output.quality {
        Some(q) => image.with_quality(q),
        None => image,
    };
    image.save(Some(&output.path))?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Size, BackendError> {
        let (width, height) = ImageReader::open(path)?
            .with_guessed_format()?
            .into_dimensions()
            .map_err(|e| BackendError::Decode {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Size::new(width, height))
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let image = Image::open(&params.source)?.resize_exact(params.size, params.filter);
        save(image, &params.output)
    }

    fn crop(&self, params: &CropParams) -> Result<(), BackendError> {
        let image = Image::open(&params.source)?;
        let bounds = image.size();
        if params.crop.right > bounds.width || params.crop.bottom > bounds.height {
            return Err(GeometryError::InvalidInput(format!(
                "crop box {} exceeds image {}",
                params.crop, bounds
            ))
            .into());
        }
        save(image.crop_exact(params.crop), &params.output)
    }

    fn flip(&self, params: &FlipParams) -> Result<(), BackendError> {
        save(Image::open(&params.source)?.flip(params.direction), &params.output)
    }

    fn rotate(&self, params: &RotateParams) -> Result<(), BackendError> {
        save(Image::open(&params.source)?.rotate(params.rotation), &params.output)
    }

    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError> {
        save(Image::open(&params.source)?, &params.output)
    }
}
