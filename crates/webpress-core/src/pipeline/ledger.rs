//! Append-only ledger of fingerprints that have been transcoded successfully.
//!
//! The backing store is a plain-text file with one hex fingerprint per line.
//! It is owned exclusively by [`Ledger`]; appends are serialized through a
//! mutex while reads take no lock at all. Lookups are fail-open: anything that
//! prevents reading the file is logged and answered with "not seen", so the
//! worst case is converting a file twice.

use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

use super::hash::Fingerprint;
use crate::error::PipelineError;

/// Durable set of processed content fingerprints.
pub struct Ledger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl Ledger {
    /// Create a ledger backed by `path`. The file is created on first record.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `fingerprint` has been recorded by any run.
    ///
    /// Scans the whole file on every call.
    pub async fn contains(&self, fingerprint: &Fingerprint) -> bool {
        let mut found = false;
        let result = self
            .scan(|entry| {
                if entry == *fingerprint {
                    found = true;
                }
                !found
            })
            .await;
        match result {
            Ok(()) => found,
            Err(e) => {
                tracing::warn!("Ledger lookup failed, treating as unseen: {}", e);
                false
            }
        }
    }

    /// Number of readable entries in the ledger.
    pub async fn entry_count(&self) -> Result<usize, PipelineError> {
        let mut count = 0;
        self.scan(|_| {
            count += 1;
            true
        })
        .await?;
        Ok(count)
    }

    /// Append `fingerprint` to the ledger.
    ///
    /// Safe to call from many workers at once: each line is written whole
    /// while holding the write lock.
    pub async fn record(&self, fingerprint: &Fingerprint) -> Result<(), PipelineError> {
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.error(e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.error(e))?;

        let line = format!("{}\n", fingerprint);
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| self.error(e))?;
        file.flush().await.map_err(|e| self.error(e))?;
        Ok(())
    }

    /// Feed every readable entry to `visit` until it returns `false`.
    ///
    /// A missing file is an empty ledger. A line that does not parse ends the
    /// scan: everything after it is unreadable for lookup purposes.
    async fn scan<F>(&self, mut visit: F) -> Result<(), PipelineError>
    where
        F: FnMut(Fingerprint) -> bool,
    {
        let file = match File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(self.error(e)),
        };

        let mut lines = BufReader::new(file).lines();
        let mut line_no = 0usize;
        while let Some(line) = lines.next_line().await.map_err(|e| self.error(e))? {
            line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Fingerprint>() {
                Ok(entry) => {
                    if !visit(entry) {
                        break;
                    }
                }
                Err(_) => {
                    tracing::warn!(
                        "Malformed ledger line {} in {:?}, ignoring the rest of the file",
                        line_no,
                        self.path
                    );
                    break;
                }
            }
        }
        Ok(())
    }

    fn error(&self, source: std::io::Error) -> PipelineError {
        PipelineError::Ledger {
            path: self.path.clone(),
            source,
        }
    }
}
