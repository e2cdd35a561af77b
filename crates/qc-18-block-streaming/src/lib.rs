//! # QC-18 Block Streaming
//!
//! Exports every committed block and its transactions as per-height
//! artifacts, driven by the host's block lifecycle hooks.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure export logic, no I/O
//!   - `BlockAccumulator`: Buffers the block in flight, drained with take-and-reset
//!   - `StreamPrefix` / `ArtifactName`: Immutable prefix, derived per-height names
//!   - `BlockRecord`, `TxRecord`, `TxBatch`: The exported shapes
//!   - `StreamingConfig`: Configuration with validation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `BlockLifecycleListener`: Driving port, called by the host pipeline
//!   - `ArtifactSink`, `ArtifactEncoder`: Driven ports
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `BlockStreamingService`: Implements `BlockLifecycleListener`
//!   - `ListenerSet`: Fans one hook out to several independent streams
//!
//! - **Adapters Layer** (`adapters/`)
//!   - `FileSink`: Atomic file writes under a directory
//!   - `InMemorySink`, `FaultySink`: Development and failure injection
//!   - `BackgroundSink`: Bounded queue drained off-thread (feature `async-writer`)
//!
//! ## Invariants
//!
//! - **Prefix immutability**: artifact names for height H are always
//!   `{prefix}_{H}_block` / `{prefix}_{H}_txs`, never carrying earlier heights.
//! - **Reset on every flush**: the accumulator is empty after `on_block_end`,
//!   whatever the sink did.
//! - **Failure containment**: encode/write failures are logged and counted,
//!   never returned to the host.
//!
//! ## Usage Example
//!
//! ```ignore
//! use qc_18_block_streaming::{BlockLifecycleListener, BlockStreamingService};
//!
//! let mut streaming = BlockStreamingService::new_file_streaming("./data/streaming", "node0")?;
//!
//! streaming.on_block_start(&raw_header);
//! for (tx, result) in delivered {
//!     streaming.on_tx_delivered(&tx, &result);
//! }
//! streaming.on_block_end(&BlockFooter::new(raw_header.height));
//! // ./data/streaming/node0_{height}_block and node0_{height}_txs now exist
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{FaultySink, FileSink, InMemorySink, JsonArtifactEncoder};
pub use domain::{
    ArtifactKind, ArtifactName, BlockAccumulator, BlockRecord, StreamPrefix, StreamingConfig,
    TxBatch, TxRecord,
};
pub use error::{ConfigError, EncodeError, SinkError, StreamingError, StreamingResult};
pub use metrics::{MetricsSnapshot, StreamingMetrics};
pub use ports::{ArtifactEncoder, ArtifactSink, BlockLifecycleListener};
pub use service::{BlockStreamingService, ListenerSet, StreamingDependencies};

#[cfg(feature = "async-writer")]
pub use adapters::{BackgroundSink, BackgroundWorker, WorkerSummary};
