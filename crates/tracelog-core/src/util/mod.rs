//! Utility functions.

pub mod fs;

pub use fs::{expand_path, open_truncated};
