//! Filesystem helpers
//!
//! Reading request payloads and settings, and writing artifacts atomically.

pub mod file_io;

pub use file_io::{read_json, read_json_required, write_bytes_atomic, write_json_atomic};
