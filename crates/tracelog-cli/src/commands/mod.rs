//! Command implementations.

pub mod emit;
pub mod map_error;
pub mod show_config;
pub mod stress;
