//! # Artifact Naming
//!
//! Artifact names are `{prefix}_{height}_{kind}`. The prefix is fixed at
//! construction and never rewritten; every block derives its names from it
//! fresh, so a prefix containing `_` is as safe as any other.

use std::fmt;

use crate::error::ConfigError;

const SEPARATOR: char = '_';
const FORBIDDEN: [char; 3] = ['/', '\\', '\0'];

/// Immutable logical stream name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct StreamPrefix(String);

impl StreamPrefix {
    /// Accepts any prefix that cannot escape the write directory.
    pub fn new(prefix: impl Into<String>) -> Result<Self, ConfigError> {
        let prefix = prefix.into();
        if let Some(found) = prefix.chars().find(|c| FORBIDDEN.contains(c)) {
            return Err(ConfigError::InvalidPrefix { prefix, found });
        }
        Ok(Self(prefix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the `kind` artifact for `height`.
    pub fn artifact(&self, height: i64, kind: ArtifactKind) -> ArtifactName {
        ArtifactName {
            prefix: self.clone(),
            height,
            kind,
        }
    }
}

/// Which of the two per-block artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Block,
    Txs,
}

impl ArtifactKind {
    pub fn suffix(self) -> &'static str {
        match self {
            ArtifactKind::Block => "block",
            ArtifactKind::Txs => "txs",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Fully derived artifact name, relative to the sink root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactName {
    prefix: StreamPrefix,
    height: i64,
    kind: ArtifactKind,
}

impl ArtifactName {
    pub fn height(&self) -> i64 {
        self.height
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn prefix(&self) -> &StreamPrefix {
        &self.prefix
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // An empty prefix yields `{height}_{kind}` rather than a leading separator.
        if !self.prefix.0.is_empty() {
            write!(f, "{}{}", self.prefix.0, SEPARATOR)?;
        }
        write!(f, "{}{}{}", self.height, SEPARATOR, self.kind)
    }
}
