//! # Ports Layer
//!
//! Hexagonal architecture ports for the Block Streaming subsystem.
//!
//! - **Driving Port (Inbound)**: `BlockLifecycleListener`, invoked by the host pipeline
//! - **Driven Ports (Outbound)**: `ArtifactSink` and `ArtifactEncoder`, implemented by adapters

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
