//! Image geometry and processing.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` |
//! | **Resize** | Stretch / Fit / Fill sizing, then `resize_exact` |
//! | **Crop** | centered box, shifted then clamped into bounds, then `crop_imm` |
//! | **Flip / rotate** | `fliph` / `flipv`, quarter turns counterclockwise |
//! | **Convert** | re-encode; JPEG and AVIF honour quality |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{GeometryError, calculate_crop_box, calculate_dimensions, resolve_length};
pub use operations::{
    Transformed, convert_file, crop_file, describe_file, flip_file, resize_file, rotate_file,
};
pub use params::{
    Center, ConvertParams, CropBox, CropParams, CropRequest, Direction, Filter, FlipParams,
    Length, OutputSpec, Quality, ResizeMethod, ResizeParams, ResizeRequest, RotateParams,
    Rotation, Size,
};
pub use rust_backend::RustBackend;
