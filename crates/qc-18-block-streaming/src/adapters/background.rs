//! Background artifact writer.
//!
//! Moves the blocking write off the host's execution thread. The listener
//! side only enqueues; a worker on tokio's blocking pool drains the queue
//! into the wrapped sink in FIFO order, so per-stream artifact order is kept.
//!
//! The queue is bounded. When it is full the artifact is dropped and
//! `SinkError::QueueFull` is returned; the host thread never waits.

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;

use crate::domain::ArtifactName;
use crate::error::SinkError;
use crate::ports::outbound::ArtifactSink;

struct QueuedArtifact {
    name: ArtifactName,
    payload: Vec<u8>,
}

/// Enqueueing half. Cheap to clone; the worker stops once every clone is dropped.
#[derive(Clone)]
pub struct BackgroundSink {
    tx: mpsc::Sender<QueuedArtifact>,
}

/// Draining half, owns the wrapped sink.
pub struct BackgroundWorker<S> {
    inner: S,
    rx: mpsc::Receiver<QueuedArtifact>,
}

/// What the worker did before the queue closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerSummary {
    pub written: usize,
    pub failed: usize,
}

impl BackgroundSink {
    /// Build both halves without starting anything.
    pub fn channel<S: ArtifactSink>(inner: S, capacity: usize) -> (Self, BackgroundWorker<S>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, BackgroundWorker { inner, rx })
    }

    /// Start the worker on the current tokio runtime's blocking pool.
    pub fn spawn<S: ArtifactSink + 'static>(
        inner: S,
        capacity: usize,
    ) -> (Self, JoinHandle<WorkerSummary>) {
        let (sink, worker) = Self::channel(inner, capacity);
        let handle = tokio::task::spawn_blocking(move || worker.run_blocking());
        (sink, handle)
    }
}

impl ArtifactSink for BackgroundSink {
    fn write(&self, name: &ArtifactName, payload: &[u8]) -> Result<(), SinkError> {
        let queued = QueuedArtifact {
            name: name.clone(),
            payload: payload.to_vec(),
        };

        self.tx.try_send(queued).map_err(|e| match e {
            TrySendError::Full(a) => SinkError::QueueFull {
                artifact: a.name.to_string(),
            },
            TrySendError::Closed(a) => SinkError::QueueClosed {
                artifact: a.name.to_string(),
            },
        })
    }
}

impl<S: ArtifactSink> BackgroundWorker<S> {
    /// Drain until every `BackgroundSink` is dropped. Must not run inside an
    /// async context.
    pub fn run_blocking(mut self) -> WorkerSummary {
        let mut summary = WorkerSummary::default();

        while let Some(artifact) = self.rx.blocking_recv() {
            match self.inner.write(&artifact.name, &artifact.payload) {
                Ok(()) => summary.written += 1,
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!(
                        artifact = %artifact.name,
                        error = %e,
                        "[qc-18] Background artifact write failed"
                    );
                }
            }
        }

        tracing::debug!(
            written = summary.written,
            failed = summary.failed,
            "[qc-18] Background writer drained"
        );
        summary
    }
}
