//! Pipeline orchestration - wires the path source, workers and ledger together.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::channel::path_queue;
use super::ledger::Ledger;
use super::processor::FileProcessor;
use super::source::PathSource;
use super::transcode::Quality;
use super::worker::WorkerPool;
use crate::config::Config;
use crate::error::{ConfigError, PipelineError, Result};
use crate::types::ProcessingStats;

/// A configured conversion run over one input root.
pub struct Pipeline {
    config: Config,
    input_root: PathBuf,
    output_root: PathBuf,
}

impl Pipeline {
    /// Create a pipeline; the configuration is validated here.
    pub fn new(
        config: Config,
        input_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            input_root: input_root.into(),
            output_root: output_root.into(),
        })
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the pipeline.
    ///
    /// With watching enabled this never returns on success: the watcher keeps
    /// the queue open and the process runs until it is terminated. With
    /// watching disabled it returns once every walked file has been handled.
    pub async fn run(self) -> Result<ProcessingStats> {
        let start = std::time::Instant::now();
        let (input_root, output_root) = self.prepare_roots().await?;

        let quality = Quality::new(self.config.processing.quality).ok_or_else(|| {
            ConfigError::ValidationError("processing.quality must be between 1 and 100".into())
        })?;
        let ledger = Arc::new(Ledger::open(self.config.ledger_path()));
        match ledger.entry_count().await {
            Ok(entries) => tracing::info!(
                "Ledger {:?} holds {} processed file(s)",
                ledger.path(),
                entries
            ),
            Err(e) => tracing::warn!("Cannot read ledger, continuing without it: {}", e),
        }

        let processor = Arc::new(FileProcessor::new(
            &input_root,
            &output_root,
            quality,
            self.config.limits.clone(),
            ledger,
        ));

        let (tx, rx) = path_queue(&self.config.pipeline);
        let pool = WorkerPool::spawn(self.config.processing.workers, rx, processor);
        tracing::info!(
            "Converting {:?} -> {:?} (quality {}, {} worker(s))",
            input_root,
            output_root,
            quality,
            pool.size()
        );

        let source = PathSource::new(&input_root, tx);
        let watcher = if self.config.watch.enabled {
            Some(source.start_watch(self.config.watch.recursive)?)
        } else {
            None
        };

        let walked = source.walk().await;
        tracing::info!("Initial scan queued {} file(s)", walked);

        if let Some(watcher) = &watcher {
            // The watcher holds a sender, so the workers only stop if the
            // process is terminated.
            tracing::info!("Waiting for new files under {:?}", watcher.root());
        }
        let stats = pool.join().await;
        drop(watcher);
        Ok(self.finish(stats, start))
    }

    /// Check the input root and create the output root, returning both in
    /// canonical form so watch events and walk entries share a prefix.
    async fn prepare_roots(&self) -> std::result::Result<(PathBuf, PathBuf), PipelineError> {
        let input_root = canonical_dir(&self.input_root)
            .await
            .ok_or_else(|| PipelineError::InvalidRoot(self.input_root.clone()))?;

        tokio::fs::create_dir_all(&self.output_root)
            .await
            .map_err(|e| PipelineError::io(&self.output_root, e))?;
        let output_root = tokio::fs::canonicalize(&self.output_root)
            .await
            .map_err(|e| PipelineError::io(&self.output_root, e))?;

        Ok((input_root, output_root))
    }

    fn finish(&self, mut stats: ProcessingStats, start: std::time::Instant) -> ProcessingStats {
        stats.total_seconds = start.elapsed().as_secs_f64();
        tracing::info!(
            "Done: {} converted, {} skipped, {} failed in {:.1}s",
            stats.transcoded,
            stats.skipped,
            stats.failed,
            stats.total_seconds
        );
        stats
    }
}

async fn canonical_dir(path: &Path) -> Option<PathBuf> {
    let canonical = tokio::fs::canonicalize(path).await.ok()?;
    let metadata = tokio::fs::metadata(&canonical).await.ok()?;
    metadata.is_dir().then_some(canonical)
}
