//! Counters for the streaming pipeline
//!
//! Every failure the listener swallows is counted here, so a silent export
//! gap still shows up somewhere.
//!
//! ## Usage
//!
//! ```ignore
//! let metrics = Arc::new(StreamingMetrics::new());
//! let service = BlockStreamingService::new(deps, prefix).with_metrics(metrics.clone());
//! // ... blocks flow ...
//! assert_eq!(metrics.snapshot().write_failures, 0);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters, shared via `Arc`.
#[derive(Debug, Default)]
pub struct StreamingMetrics {
    /// Blocks that reached `on_block_end`
    pub blocks_flushed: AtomicU64,
    /// Transactions recorded by `on_tx_delivered`
    pub txs_recorded: AtomicU64,
    /// Artifacts accepted by the sink
    pub artifacts_written: AtomicU64,
    /// Artifacts skipped because encoding failed
    pub encode_failures: AtomicU64,
    /// Artifacts the sink rejected
    pub write_failures: AtomicU64,
    /// Headers that failed validation at block start
    pub header_failures: AtomicU64,
    /// Records discarded because no block was open for them
    pub stray_txs_discarded: AtomicU64,
}

impl StreamingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_block_flushed(&self) {
        self.blocks_flushed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_tx(&self) {
        self.txs_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_artifact_written(&self) {
        self.artifacts_written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_encode_failure(&self) {
        self.encode_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_write_failure(&self) {
        self.write_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_header_failure(&self) {
        self.header_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stray_txs(&self, count: usize) {
        self.stray_txs_discarded
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            blocks_flushed: self.blocks_flushed.load(Ordering::Relaxed),
            txs_recorded: self.txs_recorded.load(Ordering::Relaxed),
            artifacts_written: self.artifacts_written.load(Ordering::Relaxed),
            encode_failures: self.encode_failures.load(Ordering::Relaxed),
            write_failures: self.write_failures.load(Ordering::Relaxed),
            header_failures: self.header_failures.load(Ordering::Relaxed),
            stray_txs_discarded: self.stray_txs_discarded.load(Ordering::Relaxed),
        }
    }

    /// Total artifacts lost to encode or write failures.
    pub fn artifacts_lost(&self) -> u64 {
        self.encode_failures.load(Ordering::Relaxed) + self.write_failures.load(Ordering::Relaxed)
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.blocks_flushed.store(0, Ordering::Relaxed);
        self.txs_recorded.store(0, Ordering::Relaxed);
        self.artifacts_written.store(0, Ordering::Relaxed);
        self.encode_failures.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.header_failures.store(0, Ordering::Relaxed);
        self.stray_txs_discarded.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub blocks_flushed: u64,
    pub txs_recorded: u64,
    pub artifacts_written: u64,
    pub encode_failures: u64,
    pub write_failures: u64,
    pub header_failures: u64,
    pub stray_txs_discarded: u64,
}
