//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the streaming service requires from its host.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::ArtifactName;
use crate::error::{EncodeError, SinkError};

/// Append-only artifact store.
///
/// Production: `FileSink`
/// Testing: `InMemorySink`, `FaultySink`
pub trait ArtifactSink: Send + Sync {
    /// Create or overwrite `name` with the full `payload`.
    ///
    /// Returns only once the payload is persisted (or handed off, for
    /// queueing sinks). Callers never retry.
    fn write(&self, name: &ArtifactName, payload: &[u8]) -> Result<(), SinkError>;
}

impl<S: ArtifactSink + ?Sized> ArtifactSink for Arc<S> {
    fn write(&self, name: &ArtifactName, payload: &[u8]) -> Result<(), SinkError> {
        (**self).write(name, payload)
    }
}

/// Turns export records into artifact bytes.
pub trait ArtifactEncoder: Send + Sync {
    fn encode<T: Serialize>(&self, record: &T) -> Result<Vec<u8>, EncodeError>;
}
