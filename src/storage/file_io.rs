//! File I/O utilities with atomic writes
//!
//! Exported artifacts and the settings file are written to a temp file next
//! to the target and renamed into place, so a failed export never leaves a
//! half-written file behind.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::ExportError;

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, ExportError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    read_json_required(path)
}

/// Read JSON from a file, returning an error if file doesn't exist
pub fn read_json_required<T, P>(path: P) -> Result<T, ExportError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = File::open(path)
        .map_err(|e| ExportError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| ExportError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write raw bytes to a file atomically (write to temp, then rename)
pub fn write_bytes_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<(), ExportError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                ExportError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    // Each write gets its own temp file in the target directory, so
    // concurrent writes to the same path never share a temp file
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let prefix = format!(
        ".{}.",
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    );

    let mut temp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| ExportError::Io(format!("Failed to create temp file: {}", e)))?;

    temp.write_all(bytes)
        .map_err(|e| ExportError::Io(format!("Failed to write data: {}", e)))?;

    temp.as_file()
        .sync_all()
        .map_err(|e| ExportError::Io(format!("Failed to sync data: {}", e)))?;

    // On failure the temp file is removed when the error drops it
    temp.persist(path)
        .map_err(|e| ExportError::Io(format!("Failed to rename temp file: {}", e.error)))?;

    Ok(())
}

/// Write pretty-printed JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), ExportError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let bytes = serde_json::to_vec_pretty(data)
        .map_err(|e| ExportError::Json(format!("Failed to serialize data: {}", e)))?;
    write_bytes_atomic(path, &bytes)
}
