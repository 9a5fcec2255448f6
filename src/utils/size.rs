//! File size reporting.
//!
//! Sizes are reported in whole kilobytes (1 KB = 1024 bytes) as `"~ N KB"`,
//! rounded to the nearest kilobyte with ties going to the even neighbour.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::validate;

const KILOBYTE: u64 = 1024;

/// Size of the file at `path`, formatted as `"~ N KB"`.
///
/// # Errors
///
/// - [`ArtifactError::InvalidArgument`](crate::ArtifactError::InvalidArgument)
///   if `path` is empty
/// - [`ArtifactError::Io`](crate::ArtifactError::Io) if the path does not exist
///   or cannot be inspected
///
/// # Examples
///
/// ```
/// # use pipeline_artifacts::utils::size::format_kilobytes;
/// assert_eq!(format_kilobytes(2048), "~ 2 KB");
/// assert_eq!(format_kilobytes(1536), "~ 2 KB");
/// ```
pub fn get_size(path: impl AsRef<Path>) -> Result<String> {
    let path = validate::path_arg("get_size", "path", path.as_ref())?;
    let bytes = fs::metadata(path)?.len();
    Ok(format_kilobytes(bytes))
}

/// Format a byte count as `"~ N KB"`.
#[must_use]
pub fn format_kilobytes(bytes: u64) -> String {
    format!("~ {} KB", round_kilobytes(bytes))
}

/// Round `bytes / 1024` to the nearest integer, ties to even.
fn round_kilobytes(bytes: u64) -> u64 {
    let whole = bytes / KILOBYTE;
    let rest = bytes % KILOBYTE;
    let half = KILOBYTE / 2;

    if rest > half || (rest == half && whole % 2 == 1) {
        whole + 1
    } else {
        whole
    }
}
