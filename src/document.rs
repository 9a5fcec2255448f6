//! Attribute-accessible documents.
//!
//! [`Document`] is what [`crate::read_yaml`] and [`crate::load_json`] return:
//! a string-keyed mapping of JSON-model values. Values can be reached by key
//! (`doc.get("model")`, `doc["model"]`), by dotted path
//! (`doc.lookup("training.params.epochs")`), or pulled straight into a typed
//! struct with [`Document::extract`] / [`Document::deserialize`].
//!
//! ```ignore
//! let config = read_yaml("config/config.yaml")?;
//! let root: PathBuf = config.extract("data_ingestion.root_dir")?;
//! ```

use std::fmt;
use std::ops::Index;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ArtifactError, Result};

static NULL: Value = Value::Null;

/// A string-keyed mapping with keyed, dotted-path and typed access.
///
/// Key order follows the source document. Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    entries: Map<String, Value>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a parsed value read from `path`, which must be a mapping.
    pub(crate) fn from_value(value: Value, path: &Path) -> Result<Self> {
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(ArtifactError::NotAMapping {
                path: path.to_path_buf(),
                found: value_kind(&other),
            }),
        }
    }

    /// Value stored directly under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Whether `key` is present at the top level.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Follow a dotted path such as `"prepare_base_model.params.image_size.0"`.
    ///
    /// Each segment selects a key in a mapping, or an index in a sequence when
    /// the segment is a number.
    #[must_use]
    pub fn lookup(&self, dotted: &str) -> Option<&Value> {
        let mut segments = dotted.split('.');
        let mut current = self.entries.get(segments.next()?)?;

        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        Some(current)
    }

    /// Nested mapping at `dotted` as its own document.
    ///
    /// # Errors
    ///
    /// [`ArtifactError::MissingKey`] if nothing lives at `dotted`, or
    /// [`ArtifactError::Json`] if the value there is not a mapping.
    pub fn section(&self, dotted: &str) -> Result<Self> {
        self.extract(dotted)
    }

    /// Deserialize the value at `dotted` into `T`.
    ///
    /// # Errors
    ///
    /// [`ArtifactError::MissingKey`] if nothing lives at `dotted`, or
    /// [`ArtifactError::Json`] if the value does not fit `T`.
    pub fn extract<T: DeserializeOwned>(&self, dotted: &str) -> Result<T> {
        let value = self
            .lookup(dotted)
            .ok_or_else(|| ArtifactError::MissingKey(dotted.to_string()))?;
        Ok(T::deserialize(value)?)
    }

    /// Deserialize the whole document into `T`.
    ///
    /// # Errors
    ///
    /// [`ArtifactError::Json`] if the document does not fit `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.entries.clone()))?)
    }

    /// Insert or replace a top-level entry, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-level keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Top-level entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Borrow the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Unwrap into the underlying map.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.entries
    }
}

impl From<Map<String, Value>> for Document {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Self {
        Self::Object(document.entries)
    }
}

impl Index<&str> for Document {
    type Output = Value;

    /// Missing keys index to `null`, as with [`serde_json::Value`].
    fn index(&self, key: &str) -> &Value {
        self.entries.get(key).unwrap_or(&NULL)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::store::json::to_pretty_json(&self.entries).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Name of a value's kind, as used in error messages.
pub(crate) const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
