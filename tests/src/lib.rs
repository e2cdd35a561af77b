//! # Quantum-Chain Streaming Test Suite
//!
//! Cross-crate flows driving `qc-18-block-streaming` the way the host
//! pipeline does, against a real temporary directory.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     └── streaming_flow.rs   # Host hooks → listeners → sinks → files
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p qc-tests
//! cargo test -p qc-tests integration::
//! ```

pub mod integration;
