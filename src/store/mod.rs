//! Artifact persistence.
//!
//! Each submodule owns one on-disk format:
//!
//! - [`yaml`]: read-only configuration documents
//! - [`json`]: pretty-printed JSON artifacts
//! - [`binary`]: CBOR-encoded artifacts behind a versioned header

pub mod binary;
mod convert;
pub mod json;
pub mod yaml;

pub use binary::{load_bin, save_bin};
pub use json::{load_json, save_json, to_pretty_json};
pub use yaml::read_yaml;
