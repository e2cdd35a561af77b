//! # Integration Flows
//!
//! - `streaming_flow`: full block lifecycle through file, fan-out and
//!   background sinks, with the telemetry subscriber installed.

pub mod streaming_flow;
