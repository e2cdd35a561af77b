//! # Streaming Flow
//!
//! Drives the block lifecycle the way the consensus pipeline does:
//! `on_block_start`, one `on_tx_delivered` per transaction in delivery order,
//! then `on_block_end`. Artifacts are checked on disk.

use qc_18_block_streaming::BlockLifecycleListener;
use shared_types::{BlockFooter, RawHeader, Timestamp, TxResult};

/// A block as the host would deliver it.
pub struct HostBlock {
    pub header: RawHeader,
    pub txs: Vec<(Vec<u8>, TxResult)>,
}

impl HostBlock {
    pub fn new(height: i64, tx_count: usize) -> Self {
        let header = RawHeader {
            chain_id: "qc-devnet".to_string(),
            height,
            time: Some(Timestamp::from_unix(1_700_000_000 + height)),
            last_block_hash: vec![height as u8; 32],
            app_hash: vec![0xAB; 32],
            proposer_address: vec![(height % 4) as u8; 20],
        };

        let txs = (0..tx_count)
            .map(|i| {
                let raw = format!("tx-{height}-{i}").into_bytes();
                let result = TxResult {
                    code: if i % 3 == 2 { 5 } else { 0 },
                    gas_wanted: 200_000,
                    gas_used: 50_000 + i as i64,
                    ..Default::default()
                };
                (raw, result)
            })
            .collect();

        Self { header, txs }
    }
}

/// Replay one block through a listener.
pub fn drive_block<L: BlockLifecycleListener + ?Sized>(listener: &mut L, block: &HostBlock) {
    listener.on_block_start(&block.header);
    for (raw, result) in &block.txs {
        listener.on_tx_delivered(raw, result);
    }
    listener.on_block_end(&BlockFooter::new(block.header.height));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;

    use qc_18_block_streaming::{
        BlockRecord, BlockStreamingService, InMemorySink, ListenerSet, StreamPrefix,
        StreamingConfig, StreamingDependencies, StreamingMetrics, TxBatch,
    };
    use quantum_telemetry::{init_test_tracing, log_block_event};
    use tempfile::TempDir;

    fn read_block(dir: &Path, name: &str) -> BlockRecord {
        serde_json::from_slice(&std::fs::read(dir.join(name)).unwrap()).unwrap()
    }

    fn read_txs(dir: &Path, name: &str) -> TxBatch {
        serde_json::from_slice(&std::fs::read(dir.join(name)).unwrap()).unwrap()
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_chain_of_blocks_streams_to_disk() {
        init_test_tracing();
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("streaming");
        let mut service = BlockStreamingService::new_file_streaming(&dir, "node0").unwrap();

        let blocks: Vec<HostBlock> = [(1, 3), (2, 0), (3, 5)]
            .into_iter()
            .map(|(h, n)| HostBlock::new(h, n))
            .collect();
        for block in &blocks {
            drive_block(&mut service, block);
            log_block_event!(debug, "qc-tests", "block replayed", block.header.height);
        }

        assert_eq!(
            file_names(&dir),
            [
                "node0_1_block",
                "node0_1_txs",
                "node0_2_block",
                "node0_3_block",
                "node0_3_txs",
            ]
        );

        for block in &blocks {
            let height = block.header.height;
            let record = read_block(&dir, &format!("node0_{height}_block"));
            let parsed = block.header.parse().unwrap();
            assert_eq!(record.height, height);
            assert_eq!(record.hash, parsed.hash);
            assert_eq!(record.proposer, parsed.proposer);
            assert_eq!(record.time, 1_700_000_000 + height);
            assert_eq!(record.txn, block.txs.len() as i64);
        }

        let batch = read_txs(&dir, "node0_3_txs");
        let expected: Vec<TxResult> = blocks[2].txs.iter().map(|(_, r)| r.clone()).collect();
        let actual: Vec<TxResult> = batch.txs.iter().map(|r| r.tx_result.clone()).collect();
        assert_eq!(actual, expected);
        assert_eq!(batch.txs[0].tx, hex::encode(b"tx-3-0"));
    }

    #[test]
    fn test_missing_directory_loses_block_then_recovers() {
        init_test_tracing();
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("late");
        let config = StreamingConfig::new(&dir, "n").with_create_dir(false);
        let mut service = BlockStreamingService::from_config(&config).unwrap();

        drive_block(&mut service, &HostBlock::new(1, 2));
        assert_eq!(service.metrics().snapshot().write_failures, 2);
        assert_eq!(service.pending_txs(), 0);

        std::fs::create_dir_all(&dir).unwrap();
        drive_block(&mut service, &HostBlock::new(2, 1));

        assert_eq!(file_names(&dir), ["n_2_block", "n_2_txs"]);
        assert_eq!(read_block(&dir, "n_2_block").txn, 1);
        assert_eq!(read_txs(&dir, "n_2_txs").txs.len(), 1);
    }

    #[test]
    fn test_fan_out_to_file_and_memory_streams() {
        init_test_tracing();
        let temp_dir = TempDir::new().unwrap();
        let metrics = Arc::new(StreamingMetrics::new());

        let on_disk = BlockStreamingService::new_file_streaming(temp_dir.path(), "disk")
            .unwrap()
            .with_metrics(metrics.clone());
        let memory = Arc::new(InMemorySink::new());
        let in_memory = BlockStreamingService::new(
            StreamingDependencies::with_sink(memory.clone()),
            StreamPrefix::new("mem").unwrap(),
        )
        .with_metrics(metrics.clone());

        let mut hooks = ListenerSet::new().with(on_disk).with(in_memory);
        for height in 10..13 {
            drive_block(&mut hooks, &HostBlock::new(height, 2));
        }

        assert_eq!(file_names(temp_dir.path()).len(), 6);
        assert_eq!(memory.len(), 6);
        assert_eq!(
            std::fs::read(temp_dir.path().join("disk_11_txs")).unwrap(),
            memory.get("mem_11_txs").unwrap()
        );

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.blocks_flushed, 6);
        assert_eq!(snapshot.artifacts_written, 12);
        assert_eq!(metrics.artifacts_lost(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_background_writer_streams_in_order() {
        init_test_tracing();
        let temp_dir = TempDir::new().unwrap();
        let config = StreamingConfig::new(temp_dir.path(), "async")
            .with_sync_writes(false)
            .with_async_queue_capacity(64);
        let (mut service, worker) = BlockStreamingService::spawn_background(&config).unwrap();

        for height in 1..=5 {
            drive_block(&mut service, &HostBlock::new(height, height as usize));
        }
        assert_eq!(service.metrics().snapshot().write_failures, 0);
        drop(service);

        let summary = worker.await.unwrap();
        assert_eq!(summary.written, 10);
        assert_eq!(summary.failed, 0);

        for height in 1..=5i64 {
            let batch = read_txs(temp_dir.path(), &format!("async_{height}_txs"));
            assert_eq!(batch.txs.len(), height as usize);
            assert_eq!(
                read_block(temp_dir.path(), &format!("async_{height}_block")).height,
                height
            );
        }
    }
}
