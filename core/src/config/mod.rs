//! Minimal configuration module for jumpsearch core
//!
//! Only exports pure data types. All loading logic is in CLI layer.

pub mod types;

pub use types::{SearchSettings, DEFAULT_EXCLUDED_DIRS, DEFAULT_FILE_TYPES, WILDCARD_FILE_TYPE};
