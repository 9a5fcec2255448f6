//! Configuration for the command-line front end.
//!
//! [`file`] reads the optional TOML configuration file; [`options`] holds the
//! values resolved from it and the command line.

pub mod file;
pub mod options;

pub use file::{FileConfig, expand_tilde};
pub use options::{LogLevel, RunOptions};
