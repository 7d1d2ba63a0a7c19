//! CLI output formatting for all commands.
//!
//! Every image leads with its positional index and file name; paths and
//! geometry follow as indented context lines.
//!
//! # Output Format
//!
//! ## Info
//!
//! ```text
//! 001 dawn.jpg
//!     Source: photos/dawn.jpg
//!     Size: 800x600 (1.33)
//!     Format: jpeg, Rgb8
//! ```
//!
//! ## Transform commands
//!
//! ```text
//! 001 dawn.jpg → dawn-small.webp
//!     Source: photos/dawn.jpg
//!     800x600 → 400x300
//!
//! Processed 2 images, 1 failed
//! ```
//!
//! # Architecture
//!
//! Each entity has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout (stderr for
//! failures). Format functions are pure: no I/O, no side effects.

use crate::image::ImageInfo;
use crate::imaging::Transformed;
use crate::naming::base_name;
use std::fmt::Display;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// info
// ============================================================================

/// Format one image description.
pub fn format_info(index: usize, info: &ImageInfo) -> Vec<String> {
    let mut lines = vec![format!("{} {}", format_index(index), info.name)];
    if let Some(path) = &info.path {
        lines.push(format!("{}Source: {}", indent(1), path.display()));
    }
    lines.push(format!(
        "{}Size: {}x{} ({:.2})",
        indent(1),
        info.width,
        info.height,
        info.aspect_ratio
    ));
    lines.push(format!("{}Format: {}, {}", indent(1), info.format, info.color));
    lines
}

pub fn print_info(index: usize, info: &ImageInfo) {
    for line in format_info(index, info) {
        println!("{}", line);
    }
}

/// Pretty JSON array of image descriptions, for `info --json`.
pub fn format_info_json(infos: &[ImageInfo]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(infos)
}

// ============================================================================
// Transform commands
// ============================================================================

/// Format the outcome of one file operation.
pub fn format_transformed(index: usize, result: &Transformed) -> Vec<String> {
    vec![
        format!(
            "{} {} → {}",
            format_index(index),
            base_name(&result.source),
            base_name(&result.output)
        ),
        format!("{}Source: {}", indent(1), result.source.display()),
        format!("{}{} → {}", indent(1), result.before, result.after),
    ]
}

pub fn print_transformed(index: usize, result: &Transformed) {
    for line in format_transformed(index, result) {
        println!("{}", line);
    }
}

/// Format a per-file failure.
pub fn format_failure(index: usize, source: &Path, error: &dyn Display) -> Vec<String> {
    vec![
        format!("{} {} failed", format_index(index), base_name(source)),
        format!("{}Source: {}", indent(1), source.display()),
        format!("{}Error: {}", indent(1), error),
    ]
}

pub fn print_failure(index: usize, source: &Path, error: &dyn Display) {
    for line in format_failure(index, source, error) {
        eprintln!("{}", line);
    }
}

/// One-line batch summary.
pub fn format_summary(succeeded: usize, failed: usize) -> String {
    let processed = plural(succeeded, "image");
    if failed == 0 {
        format!("Processed {processed}")
    } else {
        format!("Processed {processed}, {failed} failed")
    }
}

pub fn print_summary(succeeded: usize, failed: usize) {
    println!();
    println!("{}", format_summary(succeeded, failed));
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Format;
    use crate::imaging::Size;
    use std::path::PathBuf;

    fn sample_info() -> ImageInfo {
        ImageInfo {
            name: "dawn.jpg".into(),
            path: Some(PathBuf::from("photos/dawn.jpg")),
            format: Format::Jpeg,
            width: 800,
            height: 600,
            aspect_ratio: 800.0 / 600.0,
            color: "Rgb8".into(),
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_single_digit() {
        assert_eq!(format_index(1), "001");
    }

    #[test]
    fn format_index_triple_digit() {
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn plural_singular_and_plural() {
        assert_eq!(plural(1, "image"), "1 image");
        assert_eq!(plural(0, "image"), "0 images");
        assert_eq!(plural(3, "image"), "3 images");
    }

    // =========================================================================
    // info
    // =========================================================================

    #[test]
    fn info_lines() {
        assert_eq!(
            format_info(1, &sample_info()),
            vec![
                "001 dawn.jpg",
                "    Source: photos/dawn.jpg",
                "    Size: 800x600 (1.33)",
                "    Format: jpeg, Rgb8",
            ]
        );
    }

    #[test]
    fn info_without_path_skips_source() {
        let info = ImageInfo {
            path: None,
            ..sample_info()
        };
        let lines = format_info(2, &info);
        assert_eq!(lines.len(), 3);
        assert!(!lines.iter().any(|l| l.contains("Source")));
    }

    #[test]
    fn info_json_has_fields() {
        let json = format_info_json(&[sample_info()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "dawn.jpg");
        assert_eq!(value[0]["format"], "jpeg");
        assert_eq!(value[0]["width"], 800);
        assert_eq!(value[0]["height"], 600);
    }

    // =========================================================================
    // Transform commands
    // =========================================================================

    #[test]
    fn transformed_lines() {
        let result = Transformed {
            source: PathBuf::from("photos/dawn.jpg"),
            output: PathBuf::from("out/dawn-small.webp"),
            before: Size::new(800, 600),
            after: Size::new(400, 300),
        };
        assert_eq!(
            format_transformed(1, &result),
            vec![
                "001 dawn.jpg → dawn-small.webp",
                "    Source: photos/dawn.jpg",
                "    800x600 → 400x300",
            ]
        );
    }

    #[test]
    fn failure_lines() {
        let lines = format_failure(3, Path::new("photos/broken.jpg"), &"bad data");
        assert_eq!(lines[0], "003 broken.jpg failed");
        assert_eq!(lines[2], "    Error: bad data");
    }

    #[test]
    fn summary_without_failures() {
        assert_eq!(format_summary(2, 0), "Processed 2 images");
    }

    #[test]
    fn summary_with_failures() {
        assert_eq!(format_summary(1, 1), "Processed 1 image, 1 failed");
    }
}
