//! YAML configuration loading.

use std::fs;
use std::path::Path;

use tracing::info;

use super::convert;
use crate::document::Document;
use crate::error::{ArtifactError, Result};
use crate::validate;

/// Read the YAML file at `path` into a [`Document`].
///
/// # Errors
///
/// - [`ArtifactError::InvalidArgument`] if `path` is empty
/// - [`ArtifactError::Io`] if the file cannot be read
/// - [`ArtifactError::EmptyDocument`] if the file is blank, holds only
///   comments, or parses to `null` or an empty mapping
/// - [`ArtifactError::Yaml`] if the YAML is malformed
/// - [`ArtifactError::NotAMapping`] if the top level is a scalar or sequence
/// - [`ArtifactError::Unrepresentable`] if a number is NaN or infinite, or a
///   mapping key is a collection
pub fn read_yaml(path: impl AsRef<Path>) -> Result<Document> {
    let path = validate::path_arg("read_yaml", "path", path.as_ref())?;

    let content = fs::read_to_string(path)?;
    if is_blank(&content) {
        return Err(empty(path));
    }

    let parsed: serde_yaml::Value = serde_yaml::from_str(&content)?;
    if parsed.is_null() {
        return Err(empty(path));
    }
    // Scalar keys (`1: a`, `true: b`, `~: c`) become their string form.
    let value = convert::yaml_to_json(parsed).map_err(|e| e.in_file(path))?;

    let document = Document::from_value(value, path)?;
    if document.is_empty() {
        return Err(empty(path));
    }

    info!(path = %path.display(), "yaml file loaded successfully");
    Ok(document)
}

fn empty(path: &Path) -> ArtifactError {
    ArtifactError::EmptyDocument {
        path: path.to_path_buf(),
    }
}

/// Whether the text holds nothing but whitespace and comments.
fn is_blank(content: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'))
}
