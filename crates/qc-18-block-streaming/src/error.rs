//! Error types for the Block Streaming subsystem
//!
//! None of these ever reach the host pipeline: the listener logs them and
//! carries on with the next block.

use thiserror::Error;

/// Top-level error for construction and flush helpers.
#[derive(Debug, Error)]
pub enum StreamingError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("write_dir must not be empty")]
    EmptyWriteDir,

    #[error("file_prefix {prefix:?} contains forbidden character {found:?}")]
    InvalidPrefix { prefix: String, found: char },

    #[error("async_queue_capacity must be greater than 0")]
    ZeroQueueCapacity,
}

/// Failures persisting an artifact.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error writing {artifact}: {source}")]
    Io {
        artifact: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Background queue full, dropped {artifact}")]
    QueueFull { artifact: String },

    #[error("Background writer stopped, dropped {artifact}")]
    QueueClosed { artifact: String },

    #[error("Write rejected for {artifact}: {reason}")]
    Rejected { artifact: String, reason: String },
}

/// Failures turning a record into bytes.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Encoding rejected: {0}")]
    Rejected(String),
}

/// Result type for streaming operations
pub type StreamingResult<T> = Result<T, StreamingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StreamingError::from(ConfigError::InvalidPrefix {
            prefix: "a/b".to_string(),
            found: '/',
        });
        assert!(err.to_string().contains("a/b"));

        let err = StreamingError::from(SinkError::QueueFull {
            artifact: "P_7_txs".to_string(),
        });
        assert!(err.to_string().contains("P_7_txs"));
    }
}
