//! The per-file step: fingerprint, ledger check, transcode, write, record.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::hash::Fingerprint;
use super::ledger::Ledger;
use super::output::{output_path_for, write_output};
use super::transcode::{format_to_string, Quality, Transcoder};
use crate::config::LimitsConfig;
use crate::error::PipelineError;

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Converted and written to `output`.
    Transcoded { output: PathBuf, bytes: usize },
    /// Content already in the ledger; nothing written.
    Skipped,
}

/// Runs the conversion pipeline for single files.
///
/// Input root, output root and quality are fixed for the whole run.
pub struct FileProcessor {
    input_root: PathBuf,
    output_root: PathBuf,
    quality: Quality,
    limits: LimitsConfig,
    transcoder: Transcoder,
    ledger: Arc<Ledger>,
}

impl FileProcessor {
    /// Create a processor writing under `output_root` and recording to `ledger`.
    pub fn new(
        input_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        quality: Quality,
        limits: LimitsConfig,
        ledger: Arc<Ledger>,
    ) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
            quality,
            transcoder: Transcoder::new(limits.clone()),
            limits,
            ledger,
        }
    }

    /// Ledger shared with every worker.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Process one path. Any error abandons just this file.
    pub async fn process(&self, path: &Path) -> Result<FileOutcome, PipelineError> {
        let start = std::time::Instant::now();
        tracing::debug!("Processing: {:?}", path);

        // Output nested inside the input root must not be converted again.
        if path.starts_with(&self.output_root) {
            tracing::debug!("Inside output root, skipping: {:?}", path);
            return Ok(FileOutcome::Skipped);
        }

        let bytes = self.read_input(path).await?;
        let fingerprint = Fingerprint::from_bytes(&bytes);
        if self.ledger.contains(&fingerprint).await {
            tracing::debug!("Already processed, skipping: {:?}", path);
            return Ok(FileOutcome::Skipped);
        }

        let target = output_path_for(&self.input_root, &self.output_root, path)?;

        let decoded = self.transcoder.decode(bytes, path).await?;
        tracing::trace!(
            "  Decoded {} {}x{}",
            format_to_string(decoded.format),
            decoded.width,
            decoded.height
        );

        let encoded = self
            .transcoder
            .encode(decoded.image, self.quality, path)
            .await?;
        write_output(&target, &encoded).await?;

        // The output exists at this point; a lost ledger entry only means
        // the file is converted again on a later run.
        if let Err(e) = self.ledger.record(&fingerprint).await {
            tracing::error!("Failed to record {:?} in ledger: {}", path, e);
        }

        tracing::info!(
            "Converted {:?} -> {:?} ({} bytes, {:?})",
            path,
            target,
            encoded.len(),
            start.elapsed()
        );
        Ok(FileOutcome::Transcoded {
            output: target,
            bytes: encoded.len(),
        })
    }

    /// Read the whole file after checking it is a regular file within limits.
    async fn read_input(&self, path: &Path) -> Result<Vec<u8>, PipelineError> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| PipelineError::io(path, e))?;
        if !metadata.is_file() {
            return Err(PipelineError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            ));
        }

        let max_bytes = self.limits.max_file_size_mb.saturating_mul(1024 * 1024);
        if metadata.len() > max_bytes {
            return Err(PipelineError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: metadata.len() / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        tokio::fs::read(path)
            .await
            .map_err(|e| PipelineError::io(path, e))
    }
}
