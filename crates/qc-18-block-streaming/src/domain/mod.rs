//! # Domain Layer
//!
//! Pure export logic for the Block Streaming subsystem. No I/O here.
//!
//! ## Modules
//!
//! - `records` - BlockRecord, TxRecord, TxBatch (the exported shapes)
//! - `accumulator` - Per-block transaction buffer with take-and-reset flush
//! - `naming` - Immutable stream prefix and derived artifact names
//! - `config` - StreamingConfig with validation

pub mod accumulator;
pub mod config;
pub mod naming;
pub mod records;

pub use accumulator::{BlockAccumulator, FlushBatch};
pub use config::StreamingConfig;
pub use naming::{ArtifactKind, ArtifactName, StreamPrefix};
pub use records::{BlockRecord, TxBatch, TxRecord};
