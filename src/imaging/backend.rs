//! Image processing backend trait and shared error type.
//!
//! The [`ImageBackend`] trait is the boundary to the pixel engine: it only
//! ever receives exact geometry ([`Size`], [`CropBox`]) that the
//! [`calculations`](super::calculations) module has already worked out.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate.

use super::calculations::GeometryError;
use super::params::{ConvertParams, CropParams, FlipParams, ResizeParams, RotateParams, Size};
use crate::format::FormatError;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("Failed to encode {path}: {reason}")]
    Encode { path: String, reason: String },
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Image has no name; pass an explicit save target")]
    Unnamed,
    #[error("Output {path} conflicts with input {other}")]
    OutputConflict { path: String, other: String },
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Trait for image processing backends.
///
/// Every operation reads `source`, applies one transformation, and writes the
/// result as described by the params' `output` spec.
pub trait ImageBackend: Sync {
    /// Get image dimensions without decoding pixel data where possible.
    fn identify(&self, path: &Path) -> Result<Size, BackendError>;

    /// Resample to exactly `params.size`.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;

    /// Extract `params.crop`.
    fn crop(&self, params: &CropParams) -> Result<(), BackendError>;

    fn flip(&self, params: &FlipParams) -> Result<(), BackendError>;

    fn rotate(&self, params: &RotateParams) -> Result<(), BackendError>;

    /// Re-encode into the output format.
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError>;
}
