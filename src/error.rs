//! Error types for artifact operations.
//!
//! Every public operation returns [`Result`], whose error side is
//! [`ArtifactError`]. Failures from the underlying parsers, the OS layer and
//! the codecs are carried through unchanged (`#[error(transparent)]`), so the
//! caller sees exactly what `serde_yaml`, `serde_json`, `std::io`, `base64` or
//! `ciborium` reported.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T, E = ArtifactError> = std::result::Result<T, E>;

/// All the ways an artifact operation can fail.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// An argument broke the operation's contract. Raised before any I/O.
    #[error("invalid argument `{name}` for {operation}: {reason}")]
    InvalidArgument {
        /// Operation that rejected the argument (e.g. `"save_json"`).
        operation: &'static str,
        /// Name of the offending parameter.
        name: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// The YAML file parsed to nothing (blank, comments only, `null`, `{}`).
    #[error("yaml file is empty: {}", path.display())]
    EmptyDocument {
        /// File that was read.
        path: PathBuf,
    },

    /// The document's top level is a scalar or sequence, not a mapping.
    #[error("expected a mapping at the top level of {}, found a {found}", path.display())]
    NotAMapping {
        /// File that was read.
        path: PathBuf,
        /// Kind of value found instead.
        found: &'static str,
    },

    /// A value has no form in the JSON document model: a NaN or infinite
    /// number, or a YAML mapping key that is itself a collection.
    #[error("cannot represent the value at `{location}` in {}: {reason}", path.display())]
    Unrepresentable {
        /// File being read or written.
        path: PathBuf,
        /// Dotted location of the value (`"(top level)"` for the root).
        location: String,
        /// What has no JSON form.
        reason: &'static str,
    },

    /// A dotted key lookup on a [`crate::Document`] found nothing.
    #[error("key `{0}` not found in document")]
    MissingKey(String),

    /// The binary artifact header is missing or from another format version.
    #[error("{} is not a compatible binary artifact: {reason}", path.display())]
    IncompatibleFormat {
        /// File that was read.
        path: PathBuf,
        /// What was wrong with the header.
        reason: String,
    },

    /// Malformed YAML.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// Malformed JSON, or a value that could not be (de)serialized as JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Invalid base64 input.
    #[error(transparent)]
    Decode(#[from] base64::DecodeError),

    /// A value the CBOR encoder rejected while writing a binary artifact.
    #[error(transparent)]
    BinaryEncode(#[from] ciborium::ser::Error<io::Error>),

    /// Corrupt binary artifact body, or a body that does not decode as the
    /// requested type.
    #[error(transparent)]
    BinaryDecode(#[from] ciborium::de::Error<io::Error>),
}

impl ArtifactError {
    /// Whether this error is an argument-contract violation.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    pub(crate) fn invalid_argument(
        operation: &'static str,
        name: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            operation,
            name,
            reason: reason.into(),
        }
    }
}
