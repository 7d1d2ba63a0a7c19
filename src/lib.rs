//! # da-vinci
//!
//! Open, resize, crop and save raster images with exact, predictable
//! geometry. A thin layer over the `image` crate: the pixel work belongs to
//! the engine, the sizing decisions belong here.
//!
//! ```text
//! open  →  resize (stretch | fit | fill)  →  crop (centered, clamped)  →  save
//!             │                                 │
//!             └─ calculate_dimensions           └─ calculate_crop_box
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Geometry calculators, parameter types, the `ImageBackend` trait and file operations |
//! | [`image`] | The [`Image`](image::Image) wrapper: decoded pixels with format, quality and save |
//! | [`format`] | Case-insensitive format names, canonical extensions |
//! | [`naming`] | Output filename and path construction |
//! | [`config`] | `da-vinci.toml` loading, validation and merging |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Geometry First, Pixels Second
//!
//! Every size and crop box is computed by pure functions in
//! [`imaging`] before the engine is touched. The engine only ever receives an
//! exact target size or an in-bounds box, so the geometry is testable
//! without decoding a single image, and a mock backend can assert exactly
//! what would have been requested.
//!
//! ## Shift, Then Clamp
//!
//! A crop box that would spill over an edge is slid back inside rather than
//! shrunk, so a crop near a corner still yields the requested size. Only an
//! axis larger than the image itself is reduced, to the full extent.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, resampling and encoding (including AVIF via `rav1e`) use pure
//! Rust crates. The binary has no system library dependencies.

pub mod config;
pub mod format;
pub mod image;
pub mod imaging;
pub mod naming;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
