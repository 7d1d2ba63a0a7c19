//! The [`Image`] wrapper: decoded pixels plus the little state needed to save
//! them again (origin, output format, quality).
//!
//! Geometry-bearing operations ([`Image::resize`], [`Image::crop`]) go through
//! the pure calculators first and hand only the exact result to the `image`
//! crate. Everything is by value: each operation consumes the image and
//! returns the transformed one.
//!
//! ```no_run
//! use da_vinci::image::Image;
//! use da_vinci::imaging::{CropRequest, Filter, Quality, ResizeMethod, ResizeRequest};
//! use da_vinci::format::Format;
//!
//! # fn main() -> Result<(), da_vinci::imaging::BackendError> {
//! let thumb = Image::open("dawn.jpg")?
//!     .resize(&ResizeRequest::new(Some(200), Some(200), ResizeMethod::Fill), Filter::Lanczos3)?
//!     .crop(&CropRequest::new(200, 200))?
//!     .with_format(Format::WebP)
//!     .with_quality(Quality::new(85));
//! let written = thumb.save(Some("thumbs/dawn.jpg".as_ref()))?; // thumbs/dawn.webp
//! # Ok(())
//! # }
//! ```

use crate::format::Format;
use crate::imaging::{
    BackendError, CropBox, CropRequest, Direction, Filter, Quality, ResizeRequest, Rotation, Size,
    calculate_crop_box, calculate_dimensions,
};
use crate::naming;
use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, ImageReader, Rgb, Rgba};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};
use serde::Serialize;
use std::borrow::Cow;
use std::io::{BufRead, Cursor, Seek, Write};
use std::path::{Path, PathBuf};

/// rav1e speed preset; 6 trades a little size for reasonable throughput.
const AVIF_SPEED: u8 = 6;
/// AVIF quality when none is set.
const DEFAULT_AVIF_QUALITY: u32 = 80;

/// A decoded image ready for transformation.
#[derive(Debug, Clone)]
pub struct Image {
    pixels: DynamicImage,
    path: Option<PathBuf>,
    name: String,
    format: Format,
    quality: Option<Quality>,
}

/// Serializable summary of an [`Image`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub format: Format,
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: f64,
    pub color: String,
}

impl Image {
    /// Open and decode an image file. The format is detected from content,
    /// falling back to the extension.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        let path = path.as_ref();
        let reader = ImageReader::open(path)?.with_guessed_format()?;
        let (pixels, format) = decode(reader, path)?;
        Ok(Self {
            pixels,
            path: Some(path.to_path_buf()),
            name: naming::base_name(path),
            format,
            quality: None,
        })
    }

    /// Decode an in-memory image. It has no path until saved; `name` is used
    /// to derive the output filename.
    pub fn from_bytes(bytes: &[u8], name: &str) -> Result<Self, BackendError> {
        let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
        let (pixels, format) = decode(reader, Path::new(name))?;
        Ok(Self::from_pixels(pixels, name, format))
    }

    /// Wrap pixels that were produced elsewhere.
    pub fn from_pixels(pixels: DynamicImage, name: &str, format: Format) -> Self {
        Self {
            pixels,
            path: None,
            name: name.to_string(),
            format,
            quality: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.size().aspect_ratio()
    }

    /// Pixel layout of the decoded data (the "mode").
    pub fn color_type(&self) -> ColorType {
        self.pixels.color()
    }

    /// Format used by [`save`](Self::save). Starts as the detected source format.
    pub fn format(&self) -> Format {
        self.format
    }

    pub fn quality(&self) -> Option<Quality> {
        self.quality
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the image was read from; `None` for in-memory images.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn with_format(self, format: Format) -> Self {
        Self { format, ..self }
    }

    pub fn with_quality(self, quality: Quality) -> Self {
        Self {
            quality: Some(quality),
            ..self
        }
    }

    /// Replace the pixel data, keeping name, format and quality.
    pub fn with_pixels(self, pixels: DynamicImage) -> Self {
        Self { pixels, ..self }
    }

    /// The underlying `image` crate buffer, for manipulation beyond this API.
    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }

    pub fn into_pixels(self) -> DynamicImage {
        self.pixels
    }

    /// Filename this image would be saved under: its path (or name) with the
    /// extension of the current format.
    pub fn filename(&self) -> PathBuf {
        naming::output_filename(self.origin(), self.format)
    }

    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            name: self.name.clone(),
            path: self.path.clone(),
            format: self.format,
            width: self.width(),
            height: self.height(),
            aspect_ratio: self.aspect_ratio(),
            color: format!("{:?}", self.color_type()),
        }
    }

    pub fn flip(self, direction: Direction) -> Self {
        let pixels = match direction {
            Direction::Horizontal => self.pixels.fliph(),
            Direction::Vertical => self.pixels.flipv(),
        };
        self.with_pixels(pixels)
    }

    /// Rotate counterclockwise. The `image` crate rotates clockwise, hence
    /// the swapped quarter turns.
    pub fn rotate(self, rotation: Rotation) -> Self {
        let pixels = match rotation {
            Rotation::None => return self,
            Rotation::Ccw90 => self.pixels.rotate270(),
            Rotation::Ccw180 => self.pixels.rotate180(),
            Rotation::Ccw270 => self.pixels.rotate90(),
            Rotation::Angle(degrees) => rotate_on_canvas(&self.pixels, degrees),
        };
        self.with_pixels(pixels)
    }

    /// Resize according to a width/height/method request.
    pub fn resize(self, request: &ResizeRequest, filter: Filter) -> Result<Self, BackendError> {
        let size = calculate_dimensions(request.width, request.height, self.size(), request.method)?;
        log::debug!(
            "{}: resize {} -> {} ({:?})",
            self.name,
            self.size(),
            size,
            request.method
        );
        Ok(self.resize_exact(size, filter))
    }

    /// Resample to exactly `size`. A no-op when the size already matches.
    pub fn resize_exact(self, size: Size, filter: Filter) -> Self {
        if size == self.size() {
            return self;
        }
        let pixels = self
            .pixels
            .resize_exact(size.width, size.height, filter.into());
        self.with_pixels(pixels)
    }

    /// Crop according to a size/center request.
    pub fn crop(self, request: &CropRequest) -> Result<Self, BackendError> {
        let crop = calculate_crop_box(request.width, request.height, self.size(), request.center)?;
        log::debug!(
            "{}: crop {} at {} -> {}",
            self.name,
            self.size(),
            request.center,
            crop
        );
        Ok(self.crop_exact(crop))
    }

    /// Extract exactly `crop`, which must lie within the image.
    pub fn crop_exact(self, crop: CropBox) -> Self {
        let pixels = self
            .pixels
            .crop_imm(crop.left, crop.top, crop.width(), crop.height());
        self.with_pixels(pixels)
    }

    /// Encode to disk and return the path written.
    ///
    /// The target defaults to the path the image was opened from, or its
    /// name. Either way the extension is rewritten to match the format.
    pub fn save(&self, target: Option<&Path>) -> Result<PathBuf, BackendError> {
        let base = target.unwrap_or_else(|| self.origin());
        if base.as_os_str().is_empty() {
            return Err(BackendError::Unnamed);
        }
        let path = naming::output_filename(base, self.format);
        // Encode fully before touching the target, which may be the source.
        let mut buffer = Cursor::new(Vec::new());
        encode(&self.pixels, &mut buffer, self.format, self.quality).map_err(|e| {
            BackendError::Encode {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;
        std::fs::write(&path, buffer.into_inner())?;
        log::info!("wrote {} ({}, {})", path.display(), self.format, self.size());
        Ok(path)
    }

    fn origin(&self) -> &Path {
        self.path
            .as_deref()
            .unwrap_or_else(|| Path::new(&self.name))
    }
}

fn decode<R: BufRead + Seek>(
    reader: ImageReader<R>,
    path: &Path,
) -> Result<(DynamicImage, Format), BackendError> {
    let detected = reader.format().ok_or_else(|| {
        BackendError::UnsupportedFormat(format!("could not detect format of {}", path.display()))
    })?;
    let format = Format::from_image_format(detected)
        .ok_or_else(|| BackendError::UnsupportedFormat(format!("{detected:?}")))?;
    let pixels = reader.decode().map_err(|e| BackendError::Decode {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok((pixels, format))
}

/// Encode `pixels` as `format`, converting the pixel layout where the
/// encoder requires it (JPEG has no alpha, WebP/GIF/AVIF want 8-bit RGB(A)).
fn encode<W: Write + Seek>(
    pixels: &DynamicImage,
    writer: &mut W,
    format: Format,
    quality: Option<Quality>,
) -> image::ImageResult<()> {
    let pixels = encodable(pixels, format);
    let quality = quality.filter(|_| format.is_lossy());
    match format {
        Format::Jpeg => match quality {
            Some(q) => pixels.write_with_encoder(JpegEncoder::new_with_quality(
                writer,
                q.value() as u8,
            )),
            None => pixels.write_with_encoder(JpegEncoder::new(writer)),
        },
        Format::Avif => {
            let q = quality.map_or(DEFAULT_AVIF_QUALITY, Quality::value) as u8;
            pixels.write_with_encoder(AvifEncoder::new_with_speed_quality(writer, AVIF_SPEED, q))
        }
        other => pixels.write_to(writer, other.to_image_format()),
    }
}

fn encodable(pixels: &DynamicImage, format: Format) -> Cow<'_, DynamicImage> {
    let color = pixels.color();
    let supported = match format {
        Format::Jpeg => matches!(color, ColorType::L8 | ColorType::Rgb8),
        Format::Gif | Format::WebP | Format::Avif => {
            matches!(color, ColorType::Rgb8 | ColorType::Rgba8)
        }
        Format::Bmp => matches!(
            color,
            ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8
        ),
        Format::Png => !matches!(color, ColorType::Rgb32F | ColorType::Rgba32F),
        Format::Tiff => true,
    };
    if supported {
        return Cow::Borrowed(pixels);
    }
    Cow::Owned(match format {
        Format::Png => DynamicImage::ImageRgba16(pixels.to_rgba16()),
        f if f.supports_alpha() => DynamicImage::ImageRgba8(pixels.to_rgba8()),
        _ => DynamicImage::ImageRgb8(pixels.to_rgb8()),
    })
}

/// Rotate counterclockwise about the center, keeping the canvas size.
/// Exposed corners are black, or transparent when the image has alpha.
fn rotate_on_canvas(pixels: &DynamicImage, degrees: f64) -> DynamicImage {
    // imageproc turns clockwise
    let theta = -degrees.to_radians() as f32;
    if pixels.color().has_alpha() {
        DynamicImage::ImageRgba8(rotate_about_center(
            &pixels.to_rgba8(),
            theta,
            Interpolation::Bilinear,
            Rgba([0, 0, 0, 0]),
        ))
    } else {
        DynamicImage::ImageRgb8(rotate_about_center(
            &pixels.to_rgb8(),
            theta,
            Interpolation::Bilinear,
            Rgb([0, 0, 0]),
        ))
    }
}

/// Guess a format from a path's extension without touching the file.
pub fn format_from_path(path: &Path) -> Option<Format> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(Format::from_extension)
}
