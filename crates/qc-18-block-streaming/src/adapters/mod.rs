//! # Adapters Module
//!
//! Implementations of the outbound ports.
//!
//! ## Modules
//!
//! - `file`: Atomic filesystem sink (production)
//! - `memory`: In-memory sink for development and tests
//! - `mock`: Fault-injecting sink wrapper
//! - `encoder`: JSON artifact encoder
//! - `background`: Queue-backed asynchronous writer (feature `async-writer`)

#[cfg(feature = "async-writer")]
pub mod background;
pub mod encoder;
pub mod file;
pub mod memory;
pub mod mock;

#[cfg(feature = "async-writer")]
pub use background::{BackgroundSink, BackgroundWorker, WorkerSummary};
pub use encoder::JsonArtifactEncoder;
pub use file::FileSink;
pub use memory::InMemorySink;
pub use mock::FaultySink;
