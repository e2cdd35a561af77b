//! # Shared Types Crate
//!
//! Host-pipeline value types consumed by the block streaming subsystem.
//!
//! ## Design Principles
//!
//! - **Observed, not owned**: headers, footers and execution results are
//!   produced by the consensus engine and are read-only here.
//! - **Parse at the boundary**: `RawHeader` is the wire-shaped header the host
//!   hands over; `RawHeader::parse` validates it into a `BlockHeader` once, so
//!   downstream code never re-checks fields.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
