//! One-shot recursive walk of the input root.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::channel::PathSender;

/// Discovers every regular file under a directory.
///
/// No extension filter is applied: whether a file is an image is decided by
/// its content when it is decoded.
pub struct FileDiscovery {
    root: PathBuf,
}

impl FileDiscovery {
    /// Create a new file discovery instance rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Walk the root on the blocking pool, sending each file into `tx`.
    ///
    /// Blocks on a full queue. Returns the number of paths sent; stops early
    /// if the queue has been closed.
    pub async fn walk_into(self, tx: PathSender) -> usize {
        let root = self.root.clone();
        match tokio::task::spawn_blocking(move || self.walk_blocking(&tx)).await {
            Ok(sent) => sent,
            Err(e) => {
                tracing::error!("Walk of {:?} aborted: {}", root, e);
                0
            }
        }
    }

    fn walk_blocking(&self, tx: &PathSender) -> usize {
        let mut sent = 0;
        for entry in WalkDir::new(&self.root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    tracing::warn!("Cannot access {:?}, skipping: {}", path, e);
                    continue;
                }
            };
            // Links are not descended into, but a link to a file is queued.
            let is_file = if entry.path_is_symlink() {
                entry.path().is_file()
            } else {
                entry.file_type().is_file()
            };
            if !is_file {
                continue;
            }
            if tx.blocking_send(entry.into_path()).is_err() {
                tracing::debug!("Path queue closed, stopping walk of {:?}", self.root);
                break;
            }
            sent += 1;
        }
        tracing::debug!("Walk of {:?} queued {} file(s)", self.root, sent);
        sent
    }
}
