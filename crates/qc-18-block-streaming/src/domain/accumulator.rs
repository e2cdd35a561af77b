//! # Per-Block Accumulator
//!
//! Buffers transaction records between block start and block end.
//!
//! ## Invariants
//!
//! - Records are kept in delivery order.
//! - [`BlockAccumulator::take`] is the only way to read the buffer, and it
//!   leaves the accumulator empty. A flush therefore cannot observe records
//!   without also clearing them, whatever happens to the writes afterwards.

use shared_types::{BlockHeader, TxResult};

use super::records::TxRecord;

/// Mutable per-block state. One instance per listener.
#[derive(Debug, Default)]
pub struct BlockAccumulator {
    header: Option<BlockHeader>,
    in_block: bool,
    txs: Vec<TxRecord>,
}

/// Everything buffered for one block, handed to the flush.
#[derive(Debug, Default)]
pub struct FlushBatch {
    pub header: Option<BlockHeader>,
    pub txs: Vec<TxRecord>,
}

impl BlockAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a block. `header` is `None` when the host header failed to parse.
    ///
    /// Returns the number of stray records discarded. Anything still buffered
    /// here was delivered outside a block, or belongs to a block that never
    /// ended, and must not be attributed to this one.
    pub fn begin(&mut self, header: Option<BlockHeader>) -> usize {
        let stray = self.txs.len();
        self.txs.clear();
        self.header = header;
        self.in_block = true;
        stray
    }

    pub fn push(&mut self, raw_tx: &[u8], result: TxResult) {
        self.txs.push(TxRecord::new(raw_tx, result));
    }

    /// Move the buffered block out and reset to empty.
    pub fn take(&mut self) -> FlushBatch {
        let taken = std::mem::take(self);
        FlushBatch {
            header: taken.header,
            txs: taken.txs,
        }
    }

    pub fn header(&self) -> Option<&BlockHeader> {
        self.header.as_ref()
    }

    pub fn in_block(&self) -> bool {
        self.in_block
    }

    pub fn len(&self) -> usize {
        self.txs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }
}
