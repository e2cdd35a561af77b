//! Streaming configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use qc_18_block_streaming::StreamingConfig;
//!
//! let config = StreamingConfig::new("/var/lib/qc/stream", "node0")
//!     .with_sync_writes(false)
//!     .with_async_queue_capacity(256);
//! config.validate()?;
//! ```

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::naming::StreamPrefix;
use crate::error::ConfigError;

/// Flat configuration for one streaming listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Directory artifacts are written into
    pub write_dir: PathBuf,
    /// Logical stream name; may be empty
    pub file_prefix: String,
    /// Create `write_dir` when the sink is built
    pub create_dir: bool,
    /// fsync each artifact before it becomes visible
    pub sync_writes: bool,
    /// Queue bound for the background writer
    pub async_queue_capacity: usize,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            write_dir: PathBuf::from("./data/streaming"),
            file_prefix: String::new(),
            create_dir: true,
            sync_writes: true,
            async_queue_capacity: 1024,
        }
    }
}

impl StreamingConfig {
    pub fn new(write_dir: impl Into<PathBuf>, file_prefix: impl Into<String>) -> Self {
        Self {
            write_dir: write_dir.into(),
            file_prefix: file_prefix.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_STREAM_DIR`: Write directory (default: ./data/streaming)
    /// - `QC_STREAM_PREFIX`: Stream prefix (default: empty)
    /// - `QC_STREAM_CREATE_DIR`: Create the directory (default: true)
    /// - `QC_STREAM_SYNC`: fsync artifacts (default: true)
    /// - `QC_STREAM_QUEUE`: Background queue capacity (default: 1024)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            write_dir: env::var("QC_STREAM_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.write_dir),

            file_prefix: env::var("QC_STREAM_PREFIX").unwrap_or(defaults.file_prefix),

            create_dir: env::var("QC_STREAM_CREATE_DIR")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.create_dir),

            sync_writes: env::var("QC_STREAM_SYNC")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.sync_writes),

            async_queue_capacity: env::var("QC_STREAM_QUEUE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.async_queue_capacity),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.write_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyWriteDir);
        }

        StreamPrefix::new(self.file_prefix.as_str())?;

        if self.async_queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }

        Ok(())
    }

    /// Validated, immutable stream prefix.
    pub fn prefix(&self) -> Result<StreamPrefix, ConfigError> {
        StreamPrefix::new(self.file_prefix.as_str())
    }

    pub fn with_create_dir(mut self, create: bool) -> Self {
        self.create_dir = create;
        self
    }

    pub fn with_sync_writes(mut self, sync: bool) -> Self {
        self.sync_writes = sync;
        self
    }

    pub fn with_async_queue_capacity(mut self, capacity: usize) -> Self {
        self.async_queue_capacity = capacity;
        self
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(value.to_lowercase().as_str(), "false" | "0" | "no" | "off")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(StreamingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = StreamingConfig::new("", "P");
        assert_eq!(config.validate(), Err(ConfigError::EmptyWriteDir));

        let config = StreamingConfig::new("/tmp/x", "../escape");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPrefix { found: '/', .. })
        ));

        let config = StreamingConfig::new("/tmp/x", "P").with_async_queue_capacity(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroQueueCapacity));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: StreamingConfig =
            serde_json::from_str(r#"{"write_dir":"/srv/stream","file_prefix":"shard1"}"#)
                .unwrap();

        assert_eq!(config.write_dir, PathBuf::from("/srv/stream"));
        assert_eq!(config.file_prefix, "shard1");
        assert!(config.create_dir);
        assert_eq!(config.async_queue_capacity, 1024);
    }

    const ENV_VARS: [&str; 5] = [
        "QC_STREAM_DIR",
        "QC_STREAM_PREFIX",
        "QC_STREAM_CREATE_DIR",
        "QC_STREAM_SYNC",
        "QC_STREAM_QUEUE",
    ];

    // Serializes tests that touch the process environment.
    static ENV_LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());

    fn with_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
        let _guard = ENV_LOCK.lock();
        for name in ENV_VARS {
            env::remove_var(name);
        }
        for (name, value) in vars {
            env::set_var(name, value);
        }
        let result = f();
        for name in ENV_VARS {
            env::remove_var(name);
        }
        result
    }

    #[test]
    fn test_from_env_reads_every_variable() {
        let config = with_env(
            &[
                ("QC_STREAM_DIR", "/srv/qc/stream"),
                ("QC_STREAM_PREFIX", "validator0"),
                ("QC_STREAM_CREATE_DIR", "false"),
                ("QC_STREAM_SYNC", "0"),
                ("QC_STREAM_QUEUE", "64"),
            ],
            StreamingConfig::from_env,
        );

        assert_eq!(config.write_dir, PathBuf::from("/srv/qc/stream"));
        assert_eq!(config.file_prefix, "validator0");
        assert!(!config.create_dir);
        assert!(!config.sync_writes);
        assert_eq!(config.async_queue_capacity, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_env_falls_back_to_defaults() {
        let config = with_env(&[], StreamingConfig::from_env);
        assert_eq!(config, StreamingConfig::default());
    }

    #[test]
    fn test_from_env_ignores_non_numeric_queue() {
        let config = with_env(
            &[("QC_STREAM_QUEUE", "lots"), ("QC_STREAM_SYNC", "yes")],
            StreamingConfig::from_env,
        );
        assert_eq!(config.async_queue_capacity, 1024);
        assert!(config.sync_writes);
    }

    #[test]
    fn test_from_env_keeps_invalid_prefix_for_validate() {
        let config = with_env(&[("QC_STREAM_PREFIX", "a/b")], StreamingConfig::from_env);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPrefix { found: '/', .. })
        ));
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("FALSE"));
        assert!(!parse_flag("off"));
    }
}
