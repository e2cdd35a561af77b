//! # Inbound Ports (Driving Ports)
//!
//! The callback contract the host block pipeline drives.

use shared_types::{BlockFooter, RawHeader, TxResult};

/// Observer of the three-phase block lifecycle.
///
/// The host calls, for every block and in strict order:
///
/// ```text
/// on_block_start ──→ on_tx_delivered (0..n) ──→ on_block_end
/// ```
///
/// None of the methods return an error. A listener is a best-effort
/// observer: whatever goes wrong inside it is logged and swallowed so block
/// execution never fails or stalls because of an export.
///
/// Callbacks take `&mut self`; one instance serves exactly one pipeline.
pub trait BlockLifecycleListener: Send {
    /// Begin a block. A header that fails validation is logged and the
    /// in-flight header is cleared.
    fn on_block_start(&mut self, header: &RawHeader);

    /// Record one delivered transaction, whether or not it executed
    /// successfully. Never fails.
    fn on_tx_delivered(&mut self, raw_tx: &[u8], result: &TxResult);

    /// Flush the block to the sink and reset all per-block state.
    fn on_block_end(&mut self, footer: &BlockFooter);
}

impl<L: BlockLifecycleListener + ?Sized> BlockLifecycleListener for Box<L> {
    fn on_block_start(&mut self, header: &RawHeader) {
        (**self).on_block_start(header)
    }

    fn on_tx_delivered(&mut self, raw_tx: &[u8], result: &TxResult) {
        (**self).on_tx_delivered(raw_tx, result)
    }

    fn on_block_end(&mut self, footer: &BlockFooter) {
        (**self).on_block_end(footer)
    }
}
