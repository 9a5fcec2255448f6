//! # pipeline-artifacts
//!
//! Filesystem and serialization helpers for gluing together a machine-learning
//! pipeline.
//!
//! ## Operations
//!
//! - [`read_yaml`]: load a YAML configuration into a [`Document`]
//! - [`create_directories`]: create directory trees, idempotently
//! - [`save_json`] / [`load_json`]: 4-space indented JSON artifacts
//! - [`save_bin`] / [`load_bin`]: CBOR artifacts behind a versioned header
//! - [`get_size`]: file size as `"~ N KB"`
//! - [`decode_image`] / [`encode_image_into_base64`]: base64 image transport
//!
//! Every operation is a blocking, one-shot call. Arguments are checked before
//! any I/O ([`ArtifactError::InvalidArgument`]); every other failure is
//! returned to the caller as reported by the underlying library.
//!
//! Successful loads and saves emit one `tracing` event at `INFO` level. The
//! library never installs a subscriber; whichever one the process (or a test)
//! has installed receives the events.

pub mod config;
pub mod directories;
pub mod document;
pub mod error;
pub mod image;
pub mod store;
pub mod utils;

mod validate;

pub use directories::create_directories;
pub use document::Document;
pub use error::{ArtifactError, Result};
pub use image::{decode_image, encode_image_into_base64};
pub use store::{load_bin, load_json, read_yaml, save_bin, save_json, to_pretty_json};
pub use utils::get_size;
