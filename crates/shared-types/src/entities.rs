//! # Host Pipeline Entities
//!
//! Shapes handed to block listeners by the consensus pipeline.
//!
//! ## Clusters
//!
//! - **Header**: `RawHeader` (as delivered), `Timestamp`, `BlockHeader` (validated)
//! - **Footer**: `BlockFooter` (end-of-block request)
//! - **Execution**: `TxResult`, `Event`, `EventAttribute`

use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};
use sha2::{Digest, Sha256};

use crate::errors::HeaderError;

/// Proposer addresses are 20 bytes.
pub const ADDRESS_LEN: usize = 20;

/// Length of a SHA-256 digest.
pub const HASH_LEN: usize = 32;

/// Longest chain id accepted in a header.
pub const MAX_CHAIN_ID_LEN: usize = 50;

const NANOS_PER_SECOND: i32 = 1_000_000_000;

/// Protobuf-style timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: i32,
}

impl Timestamp {
    pub fn from_unix(seconds: i64) -> Self {
        Self { seconds, nanos: 0 }
    }
}

/// Block header exactly as the host hands it to `on_block_start`.
///
/// Nothing here is trusted until [`RawHeader::parse`] succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawHeader {
    pub chain_id: String,
    pub height: i64,
    pub time: Option<Timestamp>,
    pub last_block_hash: Vec<u8>,
    pub app_hash: Vec<u8>,
    pub proposer_address: Vec<u8>,
}

impl RawHeader {
    /// Validate the header and compute its content digest.
    pub fn parse(&self) -> Result<BlockHeader, HeaderError> {
        if self.height < 1 {
            return Err(HeaderError::InvalidHeight {
                height: self.height,
            });
        }

        let time = self.time.ok_or(HeaderError::MissingTimestamp)?;
        if time.seconds < 0 || !(0..NANOS_PER_SECOND).contains(&time.nanos) {
            return Err(HeaderError::InvalidTimestamp {
                seconds: time.seconds,
                nanos: time.nanos,
            });
        }

        if self.chain_id.len() > MAX_CHAIN_ID_LEN {
            return Err(HeaderError::InvalidChainId {
                len: self.chain_id.len(),
            });
        }

        if self.proposer_address.len() != ADDRESS_LEN {
            return Err(HeaderError::InvalidProposer {
                len: self.proposer_address.len(),
                expected: ADDRESS_LEN,
            });
        }

        if !self.last_block_hash.is_empty() && self.last_block_hash.len() != HASH_LEN {
            return Err(HeaderError::InvalidLastBlockHash {
                len: self.last_block_hash.len(),
            });
        }

        Ok(BlockHeader {
            chain_id: self.chain_id.clone(),
            height: self.height,
            time: time.seconds,
            hash: hex::encode_upper(self.digest(time)),
            proposer: hex::encode_upper(&self.proposer_address),
        })
    }

    /// SHA-256 over a length-prefixed canonical encoding of every header field.
    fn digest(&self, time: Timestamp) -> [u8; HASH_LEN] {
        let mut hasher = Sha256::new();
        hasher.update((self.chain_id.len() as u32).to_be_bytes());
        hasher.update(self.chain_id.as_bytes());
        hasher.update(self.height.to_be_bytes());
        hasher.update(time.seconds.to_be_bytes());
        hasher.update(time.nanos.to_be_bytes());
        for field in [&self.last_block_hash, &self.app_hash, &self.proposer_address] {
            hasher.update((field.len() as u32).to_be_bytes());
            hasher.update(field);
        }
        hasher.finalize().into()
    }
}

/// A validated header, reduced to what block export needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub chain_id: String,
    /// Block height in the chain.
    pub height: i64,
    /// Unix seconds; sub-second precision is dropped.
    pub time: i64,
    /// Uppercase hex content digest.
    pub hash: String,
    /// Uppercase hex proposer address.
    pub proposer: String,
}

/// End-of-block request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockFooter {
    pub height: i64,
}

impl BlockFooter {
    pub fn new(height: i64) -> Self {
        Self { height }
    }
}

/// Deliver-tx response from the execution layer.
///
/// Empty fields are omitted on the wire. A non-zero `code` means the
/// transaction failed execution.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TxResult {
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub code: u32,
    #[serde_as(as = "Base64")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<u8>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub log: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub info: String,
    #[serde(default, skip_serializing_if = "is_zero_i64")]
    pub gas_wanted: i64,
    #[serde(default, skip_serializing_if = "is_zero_i64")]
    pub gas_used: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub codespace: String,
}

impl TxResult {
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }
}

/// Typed event emitted during execution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<EventAttribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventAttribute {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub index: bool,
}

fn is_zero_u32(value: &u32) -> bool {
    *value == 0
}

fn is_zero_i64(value: &i64) -> bool {
    *value == 0
}
