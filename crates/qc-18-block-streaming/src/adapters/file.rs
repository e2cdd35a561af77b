//! Filesystem artifact sink.
//!
//! One file per artifact, named exactly as the artifact, directly under the
//! configured write directory.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::{ArtifactName, StreamingConfig};
use crate::error::SinkError;
use crate::ports::outbound::ArtifactSink;

/// Writes each artifact as one file under a root directory.
///
/// Writes go to `<name>.tmp` first and are renamed into place, so a reader
/// never observes a partially written artifact. Re-writing a name replaces
/// the previous file.
#[derive(Debug, Clone)]
pub struct FileSink {
    root: PathBuf,
    sync_writes: bool,
}

impl FileSink {
    /// Sink rooted at an existing directory, with fsync enabled.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            sync_writes: true,
        }
    }

    pub fn from_config(config: &StreamingConfig) -> Result<Self, SinkError> {
        if config.create_dir {
            fs::create_dir_all(&config.write_dir).map_err(|source| SinkError::Io {
                artifact: config.write_dir.display().to_string(),
                source,
            })?;
            tracing::info!(
                "[qc-18] 📁 Streaming artifacts to {}",
                config.write_dir.display()
            );
        }

        Ok(Self {
            root: config.write_dir.clone(),
            sync_writes: config.sync_writes,
        })
    }

    pub fn with_sync_writes(mut self, sync: bool) -> Self {
        self.sync_writes = sync;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Final on-disk path of an artifact.
    pub fn path_for(&self, name: &ArtifactName) -> PathBuf {
        self.root.join(name.to_string())
    }

    fn write_atomic(&self, path: &Path, temp_path: &Path, payload: &[u8]) -> std::io::Result<()> {
        let mut file = File::create(temp_path)?;
        file.write_all(payload)?;
        if self.sync_writes {
            file.sync_all()?;
        }
        drop(file);
        fs::rename(temp_path, path)
    }
}

impl ArtifactSink for FileSink {
    fn write(&self, name: &ArtifactName, payload: &[u8]) -> Result<(), SinkError> {
        let path = self.path_for(name);
        let temp_path = self.root.join(format!("{name}.tmp"));

        self.write_atomic(&path, &temp_path, payload)
            .map_err(|source| {
                // Leftover temp files are harmless; removal is best effort.
                let _ = fs::remove_file(&temp_path);
                SinkError::Io {
                    artifact: name.to_string(),
                    source,
                }
            })
    }
}
