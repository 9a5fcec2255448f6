//! JSON artifact persistence.
//!
//! Artifacts are written as pretty-printed JSON with 4-space indentation and
//! read back as a [`Document`].

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use tracing::info;

use super::convert;
use crate::document::{Document, value_kind};
use crate::error::{ArtifactError, Result};
use crate::validate;

/// Indentation used for every JSON artifact.
const JSON_INDENT: &[u8] = b"    ";

/// Save `data` as pretty-printed JSON at `path`, overwriting any existing file.
///
/// `data` can be any serializable value whose JSON form is a mapping: a
/// [`Document`], a `serde_json::Map`, a `HashMap<String, _>`, or a struct.
///
/// # Errors
///
/// - [`ArtifactError::InvalidArgument`] if `path` is empty or `data` does not
///   serialize to a mapping (nothing is written)
/// - [`ArtifactError::Unrepresentable`] if `data` holds a NaN or infinite
///   number (nothing is written)
/// - [`ArtifactError::Json`] if `data` cannot be serialized
/// - [`ArtifactError::Io`] if the file cannot be created or written
pub fn save_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, data: &T) -> Result<()> {
    let path = validate::path_arg("save_json", "path", path.as_ref())?;

    // serde_json writes NaN and infinities as `null`; YAML values keep them.
    if let Ok(shadow) = serde_yaml::to_value(data)
        && let Some(found) = convert::find_non_finite(&shadow)
    {
        return Err(found.in_file(path));
    }

    let value = serde_json::to_value(data)?;
    if !value.is_object() {
        return Err(ArtifactError::invalid_argument(
            "save_json",
            "data",
            format!("expected a mapping, got a {}", value_kind(&value)),
        ));
    }

    let mut writer = BufWriter::new(File::create(path)?);
    write_pretty(&mut writer, &value)?;
    writer.flush()?;

    info!(path = %path.display(), "json file saved");
    Ok(())
}

/// Load the JSON artifact at `path`.
///
/// An empty object `{}` loads as an empty document.
///
/// # Errors
///
/// - [`ArtifactError::InvalidArgument`] if `path` is empty
/// - [`ArtifactError::Io`] if the file cannot be opened
/// - [`ArtifactError::Json`] if the contents are not valid JSON
/// - [`ArtifactError::NotAMapping`] if the top level is not an object
pub fn load_json(path: impl AsRef<Path>) -> Result<Document> {
    let path = validate::path_arg("load_json", "path", path.as_ref())?;

    let reader = BufReader::new(File::open(path)?);
    let value: Value = serde_json::from_reader(reader)?;
    let document = Document::from_value(value, path)?;

    info!(path = %path.display(), "json file loaded");
    Ok(document)
}

/// Render `value` with the same formatting [`save_json`] uses.
///
/// # Errors
///
/// Returns [`ArtifactError::Json`] if `value` cannot be serialized.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    write_pretty(&mut buffer, value)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_pretty<W: Write, T: Serialize + ?Sized>(writer: W, value: &T) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)?;
    Ok(())
}
