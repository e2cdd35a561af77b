//! Listener fan-out.
//!
//! The host registers one hook; `ListenerSet` forwards every callback to each
//! registered listener in registration order. Listeners share nothing, so a
//! failing export target cannot affect the others.

use shared_types::{BlockFooter, RawHeader, TxResult};

use crate::ports::inbound::BlockLifecycleListener;

#[derive(Default)]
pub struct ListenerSet {
    listeners: Vec<Box<dyn BlockLifecycleListener>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<L: BlockLifecycleListener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener));
    }

    /// Builder-style [`ListenerSet::register`].
    pub fn with<L: BlockLifecycleListener + 'static>(mut self, listener: L) -> Self {
        self.register(listener);
        self
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl BlockLifecycleListener for ListenerSet {
    fn on_block_start(&mut self, header: &RawHeader) {
        for listener in &mut self.listeners {
            listener.on_block_start(header);
        }
    }

    fn on_tx_delivered(&mut self, raw_tx: &[u8], result: &TxResult) {
        for listener in &mut self.listeners {
            listener.on_tx_delivered(raw_tx, result);
        }
    }

    fn on_block_end(&mut self, footer: &BlockFooter) {
        for listener in &mut self.listeners {
            listener.on_block_end(footer);
        }
    }
}
