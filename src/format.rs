//! Image format registry.
//!
//! Maps user-facing format names (case-insensitive, with the usual aliases)
//! to a typed [`Format`], and each format to its canonical file extension and
//! the `image` crate's [`ImageFormat`].
//!
//! | Format | Accepted names | Extension |
//! |---|---|---|
//! | JPEG | `jpg`, `jpeg`, `jpe` | `jpg` |
//! | PNG | `png` | `png` |
//! | GIF | `gif` | `gif` |
//! | BMP | `bmp` | `bmp` |
//! | TIFF | `tif`, `tiff` | `tif` |
//! | WebP | `webp` | `webp` |
//! | AVIF | `avif` | `avif` |
//!
//! AVIF is write-only: the `image` crate's `"avif"` feature only enables the
//! encoder.

use image::ImageFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Unknown image format: '{0}'")]
    Unknown(String),
}

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Format {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Tiff,
    WebP,
    Avif,
}

impl Format {
    pub const ALL: [Format; 7] = [
        Format::Jpeg,
        Format::Png,
        Format::Gif,
        Format::Bmp,
        Format::Tiff,
        Format::WebP,
        Format::Avif,
    ];

    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Jpeg => "jpg",
            Format::Png => "png",
            Format::Gif => "gif",
            Format::Bmp => "bmp",
            Format::Tiff => "tif",
            Format::WebP => "webp",
            Format::Avif => "avif",
        }
    }

    /// Lower-case canonical name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Format::Jpeg => "jpeg",
            Format::Png => "png",
            Format::Gif => "gif",
            Format::Bmp => "bmp",
            Format::Tiff => "tiff",
            Format::WebP => "webp",
            Format::Avif => "avif",
        }
    }

    /// Detect a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        ext.parse().ok()
    }

    /// Whether the encoder honours a quality setting.
    pub fn is_lossy(self) -> bool {
        matches!(self, Format::Jpeg | Format::Avif)
    }

    /// Whether a decoder is compiled in.
    pub fn can_decode(self) -> bool {
        !matches!(self, Format::Avif)
    }

    /// Whether the encoder can write an alpha channel.
    pub fn supports_alpha(self) -> bool {
        !matches!(self, Format::Jpeg)
    }

    pub fn to_image_format(self) -> ImageFormat {
        match self {
            Format::Jpeg => ImageFormat::Jpeg,
            Format::Png => ImageFormat::Png,
            Format::Gif => ImageFormat::Gif,
            Format::Bmp => ImageFormat::Bmp,
            Format::Tiff => ImageFormat::Tiff,
            Format::WebP => ImageFormat::WebP,
            Format::Avif => ImageFormat::Avif,
        }
    }

    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(Format::Jpeg),
            ImageFormat::Png => Some(Format::Png),
            ImageFormat::Gif => Some(Format::Gif),
            ImageFormat::Bmp => Some(Format::Bmp),
            ImageFormat::Tiff => Some(Format::Tiff),
            ImageFormat::WebP => Some(Format::WebP),
            ImageFormat::Avif => Some(Format::Avif),
            _ => None,
        }
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().trim_start_matches('.').to_ascii_lowercase();
        match lower.as_str() {
            "jpg" | "jpeg" | "jpe" => Ok(Format::Jpeg),
            "png" => Ok(Format::Png),
            "gif" => Ok(Format::Gif),
            "bmp" => Ok(Format::Bmp),
            "tif" | "tiff" => Ok(Format::Tiff),
            "webp" => Ok(Format::WebP),
            "avif" => Ok(Format::Avif),
            _ => Err(FormatError::Unknown(s.to_string())),
        }
    }
}

impl TryFrom<String> for Format {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Format> for String {
    fn from(value: Format) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("JPEG".parse::<Format>().unwrap(), Format::Jpeg);
        assert_eq!("Jpg".parse::<Format>().unwrap(), Format::Jpeg);
        assert_eq!("WebP".parse::<Format>().unwrap(), Format::WebP);
        assert_eq!("TIFF".parse::<Format>().unwrap(), Format::Tiff);
    }

    #[test]
    fn parse_accepts_leading_dot() {
        assert_eq!(".png".parse::<Format>().unwrap(), Format::Png);
    }

    #[test]
    fn parse_unknown_is_error() {
        let err = "psd".parse::<Format>().unwrap_err();
        assert_eq!(err, FormatError::Unknown("psd".into()));
        assert_eq!(err.to_string(), "Unknown image format: 'psd'");
    }

    #[test]
    fn aliases_share_canonical_extension() {
        for alias in ["jpg", "jpeg", "jpe"] {
            assert_eq!(alias.parse::<Format>().unwrap().extension(), "jpg");
        }
        for alias in ["tif", "tiff"] {
            assert_eq!(alias.parse::<Format>().unwrap().extension(), "tif");
        }
    }

    #[test]
    fn name_roundtrips_through_parse() {
        for format in Format::ALL {
            assert_eq!(format.name().parse::<Format>().unwrap(), format);
            assert_eq!(format.extension().parse::<Format>().unwrap(), format);
        }
    }

    #[test]
    fn image_format_roundtrips() {
        for format in Format::ALL {
            assert_eq!(
                Format::from_image_format(format.to_image_format()),
                Some(format)
            );
        }
        assert_eq!(Format::from_image_format(ImageFormat::Qoi), None);
    }

    #[test]
    fn avif_is_encode_only() {
        assert!(!Format::Avif.can_decode());
        assert!(Format::Png.can_decode());
    }

    #[test]
    fn only_jpeg_and_avif_take_quality() {
        let lossy: Vec<_> = Format::ALL.into_iter().filter(|f| f.is_lossy()).collect();
        assert_eq!(lossy, vec![Format::Jpeg, Format::Avif]);
    }

    #[test]
    fn jpeg_is_the_only_opaque_format() {
        assert!(!Format::Jpeg.supports_alpha());
        assert!(Format::Bmp.supports_alpha());
        assert!(Format::Png.supports_alpha());
    }

    #[test]
    fn from_extension_detects_known() {
        assert_eq!(Format::from_extension("JPG"), Some(Format::Jpeg));
        assert_eq!(Format::from_extension("txt"), None);
    }
}
