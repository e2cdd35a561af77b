//! # Block Streaming Service
//!
//! Implements [`BlockLifecycleListener`] on top of an artifact sink.
//!
//! ## Flush sequence (`on_block_end`)
//!
//! 1. Take the buffered block out of the accumulator, leaving it empty.
//! 2. Derive `{prefix}_{height}_txs` / `{prefix}_{height}_block` from the
//!    immutable prefix and the footer height.
//! 3. If any transactions were delivered, encode and write the `_txs` batch.
//! 4. Always encode and write the `_block` record.
//!
//! Step 1 happens before any I/O, so no failure in 3 or 4 can leave records
//! behind for the next block. Each artifact fails independently.

mod fanout;


pub use fanout::ListenerSet;

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use shared_types::{BlockFooter, BlockHeader, RawHeader, TxResult};

use crate::adapters::{FileSink, JsonArtifactEncoder};
use crate::domain::{
    ArtifactKind, ArtifactName, BlockAccumulator, BlockRecord, FlushBatch, StreamPrefix,
    StreamingConfig, TxBatch,
};
use crate::error::{StreamingError, StreamingResult};
use crate::metrics::StreamingMetrics;
use crate::ports::inbound::BlockLifecycleListener;
use crate::ports::outbound::{ArtifactEncoder, ArtifactSink};

/// Adapters the service is built from.
pub struct StreamingDependencies<S, E = JsonArtifactEncoder> {
    pub sink: S,
    pub encoder: E,
}

impl<S> StreamingDependencies<S> {
    /// Sink with the default JSON encoder.
    pub fn with_sink(sink: S) -> Self {
        Self {
            sink,
            encoder: JsonArtifactEncoder,
        }
    }
}

/// One export stream: one prefix, one sink, one accumulator.
pub struct BlockStreamingService<S: ArtifactSink, E: ArtifactEncoder = JsonArtifactEncoder> {
    sink: S,
    encoder: E,
    prefix: StreamPrefix,
    accumulator: BlockAccumulator,
    metrics: Arc<StreamingMetrics>,
}

impl<S: ArtifactSink, E: ArtifactEncoder> BlockStreamingService<S, E> {
    pub fn new(deps: StreamingDependencies<S, E>, prefix: StreamPrefix) -> Self {
        Self {
            sink: deps.sink,
            encoder: deps.encoder,
            prefix,
            accumulator: BlockAccumulator::new(),
            metrics: Arc::new(StreamingMetrics::new()),
        }
    }

    /// Share a metrics collector, e.g. across a [`ListenerSet`].
    pub fn with_metrics(mut self, metrics: Arc<StreamingMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn prefix(&self) -> &StreamPrefix {
        &self.prefix
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn metrics(&self) -> &Arc<StreamingMetrics> {
        &self.metrics
    }

    /// Header of the block in flight, if it parsed.
    pub fn current_header(&self) -> Option<&BlockHeader> {
        self.accumulator.header()
    }

    /// Transactions buffered for the block in flight.
    pub fn pending_txs(&self) -> usize {
        self.accumulator.len()
    }

    fn flush(&mut self, footer: &BlockFooter) {
        let FlushBatch { header, txs } = self.accumulator.take();
        let height = footer.height;

        match &header {
            Some(h) if h.height != height => {
                tracing::warn!(
                    header_height = h.height,
                    footer_height = height,
                    "[qc-18] Header/footer height mismatch, naming by footer"
                );
            }
            None => {
                tracing::warn!(
                    height,
                    "[qc-18] No valid header for block, exporting degraded record"
                );
            }
            _ => {}
        }

        let txn = txs.len();
        if !txs.is_empty() {
            let name = self.prefix.artifact(height, ArtifactKind::Txs);
            self.export(&name, &TxBatch { txs });
        }

        let name = self.prefix.artifact(height, ArtifactKind::Block);
        self.export(&name, &BlockRecord::new(header.as_ref(), height, txn));

        self.metrics.record_block_flushed();
        tracing::debug!(height, txs = txn, "[qc-18] Block flushed");
    }

    /// Write one artifact, logging instead of propagating.
    fn export<T: Serialize>(&self, name: &ArtifactName, record: &T) {
        match self.write_artifact(name, record) {
            Ok(()) => self.metrics.record_artifact_written(),
            Err(StreamingError::Encode(e)) => {
                self.metrics.record_encode_failure();
                tracing::error!(artifact = %name, error = %e, "[qc-18] Artifact encode failed, skipped");
            }
            Err(e) => {
                self.metrics.record_write_failure();
                tracing::error!(artifact = %name, error = %e, "[qc-18] Artifact write failed, skipped");
            }
        }
    }

    fn write_artifact<T: Serialize>(&self, name: &ArtifactName, record: &T) -> StreamingResult<()> {
        let payload = self.encoder.encode(record)?;
        self.sink.write(name, &payload)?;
        Ok(())
    }
}

impl BlockStreamingService<FileSink> {
    /// File-backed stream writing `{write_dir}/{file_prefix}_{height}_{kind}`.
    pub fn new_file_streaming(
        write_dir: impl Into<PathBuf>,
        file_prefix: impl Into<String>,
    ) -> StreamingResult<Self> {
        Self::from_config(&StreamingConfig::new(write_dir, file_prefix))
    }

    pub fn from_config(config: &StreamingConfig) -> StreamingResult<Self> {
        config.validate()?;
        let prefix = config.prefix()?;
        let sink = FileSink::from_config(config)?;

        tracing::info!(
            prefix = prefix.as_str(),
            write_dir = %config.write_dir.display(),
            "[qc-18] File streaming service created"
        );
        Ok(Self::new(StreamingDependencies::with_sink(sink), prefix))
    }
}

#[cfg(feature = "async-writer")]
impl BlockStreamingService<crate::adapters::BackgroundSink> {
    /// File-backed stream whose writes run on a background worker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_background(
        config: &StreamingConfig,
    ) -> StreamingResult<(
        Self,
        tokio::task::JoinHandle<crate::adapters::WorkerSummary>,
    )> {
        config.validate()?;
        let prefix = config.prefix()?;
        let file_sink = FileSink::from_config(config)?;
        let (sink, handle) =
            crate::adapters::BackgroundSink::spawn(file_sink, config.async_queue_capacity);

        Ok((
            Self::new(StreamingDependencies::with_sink(sink), prefix),
            handle,
        ))
    }
}

impl<S: ArtifactSink, E: ArtifactEncoder> BlockLifecycleListener for BlockStreamingService<S, E> {
    fn on_block_start(&mut self, header: &RawHeader) {
        let parsed = match header.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                self.metrics.record_header_failure();
                tracing::error!(
                    height = header.height,
                    error = %e,
                    "[qc-18] Invalid block header, block will export without it"
                );
                None
            }
        };

        let stray = self.accumulator.begin(parsed);
        if stray > 0 {
            self.metrics.record_stray_txs(stray);
            tracing::warn!(
                height = header.height,
                discarded = stray,
                "[qc-18] Discarded transactions delivered outside a block"
            );
        }
    }

    fn on_tx_delivered(&mut self, raw_tx: &[u8], result: &TxResult) {
        if !self.accumulator.in_block() {
            tracing::warn!("[qc-18] Transaction delivered with no block open");
        }
        self.accumulator.push(raw_tx, result.clone());
        self.metrics.record_tx();
    }

    fn on_block_end(&mut self, footer: &BlockFooter) {
        self.flush(footer);
    }
}
