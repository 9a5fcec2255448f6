//! Argument-contract checks run at the top of every public operation.

use std::path::Path;

use crate::error::{ArtifactError, Result};

/// Check that `path` names something the OS could open.
///
/// Rejects empty paths and paths containing a NUL byte.
pub(crate) fn path_arg<'a>(
    operation: &'static str,
    name: &'static str,
    path: &'a Path,
) -> Result<&'a Path> {
    let raw = path.as_os_str();

    if raw.is_empty() {
        return Err(ArtifactError::invalid_argument(
            operation,
            name,
            "path must not be empty",
        ));
    }

    if raw.as_encoded_bytes().contains(&0) {
        return Err(ArtifactError::invalid_argument(
            operation,
            name,
            format!("path contains a NUL byte: {}", path.display()),
        ));
    }

    Ok(path)
}
