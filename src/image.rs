//! Base64 transport for image files.
//!
//! Images travel through text-only channels (JSON bodies, HTTP forms) as
//! standard padded base64. No image-format validation happens here: any byte
//! stream round-trips.

use std::fs;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::info;

use crate::error::Result;
use crate::validate;

/// Decode a base64 payload and write the bytes to `destination`,
/// overwriting any existing file.
///
/// ASCII whitespace in the payload (line breaks from wrapped encoders) is
/// ignored. The payload is fully decoded before the destination is opened.
///
/// # Errors
///
/// - [`ArtifactError::InvalidArgument`](crate::ArtifactError::InvalidArgument)
///   if `destination` is empty
/// - [`ArtifactError::Decode`](crate::ArtifactError::Decode) if the payload is
///   not valid base64
/// - [`ArtifactError::Io`](crate::ArtifactError::Io) if the file cannot be written
pub fn decode_image(encoded: &str, destination: impl AsRef<Path>) -> Result<()> {
    let destination = validate::path_arg("decode_image", "destination", destination.as_ref())?;

    let bytes = decode_base64(encoded)?;
    fs::write(destination, &bytes)?;

    info!(path = %destination.display(), bytes = bytes.len(), "image decoded");
    Ok(())
}

/// Read the file at `source` and return its base64 encoding.
///
/// # Errors
///
/// - [`ArtifactError::InvalidArgument`](crate::ArtifactError::InvalidArgument)
///   if `source` is empty
/// - [`ArtifactError::Io`](crate::ArtifactError::Io) if the file cannot be read
pub fn encode_image_into_base64(source: impl AsRef<Path>) -> Result<String> {
    let source = validate::path_arg("encode_image_into_base64", "source", source.as_ref())?;

    let bytes = fs::read(source)?;
    let encoded = STANDARD.encode(&bytes);

    info!(path = %source.display(), bytes = bytes.len(), "image encoded");
    Ok(encoded)
}

fn decode_base64(encoded: &str) -> Result<Vec<u8>> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(STANDARD.decode(compact)?)
}
