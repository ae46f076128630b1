//! Fixed-size pool of workers draining the shared path queue.

use std::sync::Arc;
use tokio::task::JoinSet;

use super::channel::SharedPathReceiver;
use super::processor::{FileOutcome, FileProcessor};
use crate::types::ProcessingStats;

/// Per-worker tallies, summed when the pool is joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub transcoded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl WorkerStats {
    fn merge(&mut self, other: WorkerStats) {
        self.transcoded += other.transcoded;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

/// Handle to the running workers.
pub struct WorkerPool {
    workers: JoinSet<WorkerStats>,
    size: usize,
}

impl WorkerPool {
    /// Spawn `count` workers that share `receiver` and `processor`.
    ///
    /// Workers never talk to each other; each one exits once the queue is
    /// closed and empty.
    pub fn spawn(count: usize, receiver: SharedPathReceiver, processor: Arc<FileProcessor>) -> Self {
        let mut workers = JoinSet::new();
        for id in 0..count {
            let receiver = Arc::clone(&receiver);
            let processor = Arc::clone(&processor);
            workers.spawn(run_worker(id, receiver, processor));
        }
        tracing::debug!("Started {} worker(s)", count);
        Self {
            workers,
            size: count,
        }
    }

    /// Number of workers in the pool.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Wait for every worker to exit and total their stats.
    pub async fn join(mut self) -> ProcessingStats {
        let mut totals = WorkerStats::default();
        while let Some(result) = self.workers.join_next().await {
            match result {
                Ok(stats) => totals.merge(stats),
                Err(e) => tracing::error!("Worker task failed: {}", e),
            }
        }
        ProcessingStats {
            transcoded: totals.transcoded,
            skipped: totals.skipped,
            failed: totals.failed,
            total_seconds: 0.0,
        }
    }
}

async fn run_worker(
    id: usize,
    receiver: SharedPathReceiver,
    processor: Arc<FileProcessor>,
) -> WorkerStats {
    let mut stats = WorkerStats::default();
    loop {
        // Hold the lock only while waiting for the next path.
        let next = receiver.lock().await.recv().await;
        let Some(path) = next else {
            break;
        };

        match processor.process(&path).await {
            Ok(FileOutcome::Transcoded { .. }) => stats.transcoded += 1,
            Ok(FileOutcome::Skipped) => stats.skipped += 1,
            Err(e) => {
                stats.failed += 1;
                tracing::error!("Failed [{}]: {:?} - {}", e.kind(), path, e);
            }
        }
    }
    tracing::debug!("Worker {} exiting: {:?}", id, stats);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LimitsConfig, PipelineConfig};
    use crate::pipeline::channel::path_queue;
    use crate::pipeline::ledger::Ledger;
    use crate::pipeline::processor::tests::png_bytes;
    use crate::pipeline::transcode::Quality;

    #[tokio::test]
    async fn test_pool_drains_queue_and_tallies() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input");
        std::fs::create_dir_all(&input).unwrap();
        std::fs::write(input.join("one.png"), png_bytes(10)).unwrap();
        std::fs::write(input.join("two.png"), png_bytes(11)).unwrap();
        std::fs::write(input.join("dup.png"), png_bytes(10)).unwrap();
        std::fs::write(input.join("notes.txt"), b"not an image").unwrap();

        let processor = Arc::new(FileProcessor::new(
            &input,
            dir.path().join("output"),
            Quality::default(),
            LimitsConfig::default(),
            Arc::new(Ledger::open(dir.path().join("ledger.txt"))),
        ));
        let (tx, rx) = path_queue(&PipelineConfig { buffer_size: 8 });
        let pool = WorkerPool::spawn(1, rx, processor);
        assert_eq!(pool.size(), 1);

        for name in ["one.png", "two.png", "dup.png", "notes.txt"] {
            tx.send(input.join(name)).await.unwrap();
        }
        drop(tx);

        let stats = pool.join().await;
        assert_eq!(stats.transcoded, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.failed, 1);
    }

    #[tokio::test]
    async fn test_idle_pool_exits_when_queue_closes() {
        let dir = tempfile::tempdir().unwrap();
        let processor = Arc::new(FileProcessor::new(
            dir.path(),
            dir.path().join("out"),
            Quality::default(),
            LimitsConfig::default(),
            Arc::new(Ledger::open(dir.path().join("ledger.txt"))),
        ));
        let (tx, rx) = path_queue(&PipelineConfig::default());
        let pool = WorkerPool::spawn(4, rx, processor);
        drop(tx);

        let stats = pool.join().await;
        assert_eq!(stats.transcoded + stats.skipped + stats.failed, 0);
    }
}
