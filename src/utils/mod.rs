//! Utility functions and helpers.
//!
//! This module contains small filesystem helpers that don't belong to a
//! particular artifact format, such as file size reporting.

pub mod size;

pub use size::{format_kilobytes, get_size};
