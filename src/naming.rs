//! Output filename construction.
//!
//! An image keeps its name across transformations; only the extension
//! follows the output format. Every save goes through these helpers so the
//! extension on disk always matches the bytes inside:
//!
//! - `photo.jpeg` saved as PNG → `photo.png`
//! - `scans/page-01.TIF` saved as JPEG → `scans/page-01.jpg`
//! - `download` (no extension) saved as WebP → `download.webp`

use crate::format::Format;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Replace the extension of `name` with the canonical extension of `format`.
///
/// Any directory part of `name` is preserved.
pub fn output_filename(name: &Path, format: Format) -> PathBuf {
    name.with_extension(format.extension())
}

/// Build the output path for a transformed `source`.
///
/// `{dir}/{stem}{suffix}.{ext}` where `dir` is `out_dir` if given, otherwise
/// the directory of `source`.
pub fn output_path(source: &Path, out_dir: Option<&Path>, suffix: &str, format: Format) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let file_name = format!("{stem}{suffix}.{}", format.extension());
    match out_dir {
        Some(dir) => dir.join(file_name),
        None => source.with_file_name(file_name),
    }
}

/// Find outputs that would overwrite each other, or another input.
///
/// `outputs[i]` is the planned output of `sources[i]` (`None` when planning
/// already failed). The result holds, per entry, the index of the input it
/// conflicts with: an earlier entry claiming the same output, or a different
/// input whose source is that path. The first claimant of a path keeps it.
pub fn output_conflicts(sources: &[PathBuf], outputs: &[Option<&Path>]) -> Vec<Option<usize>> {
    let mut inputs: HashMap<&Path, usize> = HashMap::new();
    for (i, source) in sources.iter().enumerate() {
        inputs.entry(source.as_path()).or_insert(i);
    }

    let mut claimed: HashMap<&Path, usize> = HashMap::new();
    outputs
        .iter()
        .enumerate()
        .map(|(i, output)| {
            let output = (*output)?;
            if let Some(&owner) = claimed.get(output) {
                return Some(owner);
            }
            match inputs.get(output) {
                Some(&reader) if reader != i => Some(reader),
                _ => {
                    claimed.insert(output, i);
                    None
                }
            }
        })
        .collect()
}

/// The final component of `path`, used as an image's display name.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
