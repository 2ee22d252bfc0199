//! Artifact delivery
//!
//! Handing the finished bytes to a sink is the last step of every successful
//! export. Nothing reaches a sink when rendering fails.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::ExportFormat;
use crate::error::{ExportError, ExportResult};
use crate::storage::write_bytes_atomic;

/// A finished export file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// `{base_name}.{extension}`
    pub file_name: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(base_name: &str, format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!("{}.{}", base_name, format.extension()),
            format,
            bytes,
        }
    }
}

/// Somewhere finished artifacts go
pub trait ArtifactSink {
    fn deliver(&self, artifact: &Artifact) -> ExportResult<()>;
}

/// Writes artifacts into a directory, creating it on first use
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where an artifact with this name ends up
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl ArtifactSink for DirectorySink {
    fn deliver(&self, artifact: &Artifact) -> ExportResult<()> {
        let path = self.path_for(&artifact.file_name);
        write_bytes_atomic(&path, &artifact.bytes)?;
        tracing::debug!(path = %path.display(), bytes = artifact.bytes.len(), "artifact written");
        Ok(())
    }
}

/// Keeps delivered artifacts in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Mutex<Vec<Artifact>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of everything delivered so far, oldest first
    pub fn artifacts(&self) -> Vec<Artifact> {
        self.artifacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl ArtifactSink for MemorySink {
    fn deliver(&self, artifact: &Artifact) -> ExportResult<()> {
        self.artifacts
            .lock()
            .map_err(|_| ExportError::Io("artifact store lock poisoned".into()))?
            .push(artifact.clone());
        Ok(())
    }
}
