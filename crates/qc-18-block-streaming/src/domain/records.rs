//! # Export Records
//!
//! The shapes written to the sink. Field order is the on-disk JSON order.

use serde::{Deserialize, Serialize};
use shared_types::{BlockHeader, TxResult};

/// Summary of one processed block, written as the `_block` artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub height: i64,
    pub hash: String,
    /// Number of transactions delivered in this block.
    pub txn: i64,
    /// Unix seconds from the header.
    pub time: i64,
    pub proposer: String,
}

impl BlockRecord {
    /// Build the record for a flushed block.
    ///
    /// Without a header (parse failure at block start) the record keeps the
    /// footer height and the real transaction count, with empty hash and
    /// proposer and `time` 0.
    pub fn new(header: Option<&BlockHeader>, footer_height: i64, txn: usize) -> Self {
        let txn = txn as i64;
        match header {
            Some(header) => Self {
                height: header.height,
                hash: header.hash.clone(),
                txn,
                time: header.time,
                proposer: header.proposer.clone(),
            },
            None => Self {
                height: footer_height,
                hash: String::new(),
                txn,
                time: 0,
                proposer: String::new(),
            },
        }
    }
}

/// One delivered transaction with its execution outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxRecord {
    /// Lowercase hex of the raw transaction bytes.
    pub tx: String,
    pub tx_result: TxResult,
}

impl TxRecord {
    pub fn new(raw_tx: &[u8], result: TxResult) -> Self {
        Self {
            tx: hex::encode(raw_tx),
            tx_result: result,
        }
    }
}

/// All transactions of one block, written as the `_txs` artifact.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TxBatch {
    pub txs: Vec<TxRecord>,
}
