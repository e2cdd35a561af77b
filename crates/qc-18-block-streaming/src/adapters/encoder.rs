//! JSON artifact encoding.

use serde::Serialize;

use crate::error::EncodeError;
use crate::ports::outbound::ArtifactEncoder;

/// Compact JSON, one document per artifact.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonArtifactEncoder;

impl ArtifactEncoder for JsonArtifactEncoder {
    fn encode<T: Serialize>(&self, record: &T) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_json::to_vec(record)?)
    }
}
