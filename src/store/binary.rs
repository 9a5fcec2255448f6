//! Binary artifact persistence.
//!
//! A binary artifact is a 6-byte header followed by the CBOR encoding of the
//! value:
//!
//! | bytes | content                               |
//! |-------|---------------------------------------|
//! | 0..4  | magic `PABN`                          |
//! | 4..6  | format version, little-endian `u16`   |
//! | 6..   | CBOR body                             |
//!
//! CBOR is self-describing, so dynamically typed values (a [`Document`], a
//! `serde_json::Value`) load back as well as plain structs do. Version 1
//! artifacts held a bincode body and are rejected as incompatible.
//!
//! [`Document`]: crate::Document

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::{ArtifactError, Result};
use crate::validate;

const MAGIC: &[u8; 4] = b"PABN";
const FORMAT_VERSION: u16 = 2;
const HEADER_LEN: usize = 6;

/// Serialize `data` to `path`, overwriting any existing file.
///
/// # Errors
///
/// - [`ArtifactError::InvalidArgument`] if `path` is empty
/// - [`ArtifactError::Io`] if the file cannot be created or written
/// - [`ArtifactError::BinaryEncode`] if `data` cannot be encoded
pub fn save_bin<T: Serialize + ?Sized>(data: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = validate::path_arg("save_bin", "path", path.as_ref())?;

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(MAGIC)?;
    writer.write_all(&FORMAT_VERSION.to_le_bytes())?;
    ciborium::into_writer(data, &mut writer)?;
    writer.flush()?;

    info!(path = %path.display(), "binary file saved");
    Ok(())
}

/// Deserialize a value of type `T` previously written by [`save_bin`].
///
/// # Errors
///
/// - [`ArtifactError::InvalidArgument`] if `path` is empty
/// - [`ArtifactError::Io`] if the file cannot be opened
/// - [`ArtifactError::IncompatibleFormat`] if the header is missing, foreign,
///   or from another format version
/// - [`ArtifactError::BinaryDecode`] if the body is corrupt or does not decode
///   as `T`
pub fn load_bin<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = validate::path_arg("load_bin", "path", path.as_ref())?;

    let mut reader = BufReader::new(File::open(path)?);
    check_header(&mut reader, path)?;
    let data = ciborium::from_reader(reader)?;

    info!(path = %path.display(), "binary file loaded");
    Ok(data)
}

fn check_header<R: Read>(reader: &mut R, path: &Path) -> Result<()> {
    let incompatible = |reason: String| ArtifactError::IncompatibleFormat {
        path: path.to_path_buf(),
        reason,
    };

    let mut header = [0u8; HEADER_LEN];
    if let Err(e) = reader.read_exact(&mut header) {
        return Err(if e.kind() == io::ErrorKind::UnexpectedEof {
            incompatible("file is shorter than the artifact header".to_string())
        } else {
            e.into()
        });
    }

    if &header[..4] != MAGIC {
        return Err(incompatible("missing artifact header".to_string()));
    }

    let version = u16::from_le_bytes([header[4], header[5]]);
    if version != FORMAT_VERSION {
        return Err(incompatible(format!(
            "format version {version}, expected {FORMAT_VERSION}"
        )));
    }

    Ok(())
}
