//! # Quantum Telemetry
//!
//! Logging bootstrap for Quantum-Chain subsystems.
//!
//! Subsystems log through `tracing` macros only; the binary (or test) that
//! hosts them installs the subscriber once through this crate.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quantum_telemetry::{init_tracing, TelemetryConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_tracing(&TelemetryConfig::for_streaming())?;
//!     // Subsystem logs are now emitted
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `quantum-chain` | Service name in startup logs |
//! | `QC_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `QC_CONSOLE_OUTPUT` | `true` | Emit to stdout |
//! | `QC_JSON_LOGS` | `false` (`true` in containers) | JSON formatted logs |

mod config;
mod logging;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{init_tracing, init_test_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter {filter:?}: {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Global subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error() {
        init_test_tracing();
        let result = init_tracing(&TelemetryConfig::default());
        assert!(matches!(result, Err(TelemetryError::AlreadyInitialized(_))));
    }
}
