//! Shared test utilities: synthetic images written to disk or kept in memory.
//!
//! The gradient pattern makes pixel positions checkable after a transform:
//! pixel `(x, y)` is `[x % 256, y % 256, 128]`.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let path = tmp.path().join("dawn.jpg");
//! create_test_jpeg(&path, 200, 150);
//! ```

use image::{DynamicImage, ImageEncoder, RgbImage};
use std::path::Path;

// =========================================================================
// In-memory fixtures
// =========================================================================

/// RGB gradient where each pixel encodes its own coordinates.
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
}

// =========================================================================
// On-disk fixtures
// =========================================================================

/// Write a gradient JPEG. Lossy, so only use it where dimensions matter.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = gradient(width, height).to_rgb8();
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a gradient PNG with an alpha channel.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = gradient(width, height).to_rgba8();
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::png::PngEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgba8)
        .unwrap();
}
