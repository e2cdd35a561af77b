use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::domain::ArtifactName;
use crate::error::SinkError;
use crate::ports::outbound::ArtifactSink;

/// In-memory artifact store for development and testing.
///
/// Keys are the rendered artifact names, so `names()` is sorted.
#[derive(Debug, Default)]
pub struct InMemorySink {
    artifacts: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.artifacts.read().get(name).cloned()
    }

    /// Decode a stored artifact as JSON.
    pub fn get_json(&self, name: &str) -> Option<serde_json::Value> {
        self.get(name)
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.artifacts.read().contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.artifacts.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.artifacts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.read().is_empty()
    }
}

impl ArtifactSink for InMemorySink {
    fn write(&self, name: &ArtifactName, payload: &[u8]) -> Result<(), SinkError> {
        self.artifacts
            .write()
            .insert(name.to_string(), payload.to_vec());
        Ok(())
    }
}
