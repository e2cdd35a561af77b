//! Structured log macros.
//!
//! Every entry carries a `subsystem` field so JSON output can be filtered per
//! subsystem without parsing message prefixes.

/// Log a block-related event with standard fields.
#[macro_export]
macro_rules! log_block_event {
    ($level:ident, $subsystem:expr, $msg:expr, $block_height:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            block_height = $block_height,
            $($($field)*,)?
            $msg
        )
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_expand() {
        crate::init_test_tracing();
        crate::log_block_event!(debug, "qc-18", "block flushed", 42i64, txs = 3usize);
    }
}
