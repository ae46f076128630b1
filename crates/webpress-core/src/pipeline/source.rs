//! The merged path stream: live watch events plus a one-shot walk.
//!
//! Both origins push into the same bounded queue. Nothing here deduplicates;
//! a path seen by both the walk and a racing create event is queued twice and
//! the ledger sorts it out.

use std::path::PathBuf;

use super::channel::PathSender;
use super::discovery::FileDiscovery;
use super::watch::PathWatcher;
use crate::error::PipelineError;

/// Producer side of the pipeline for one input root.
pub struct PathSource {
    root: PathBuf,
    tx: PathSender,
}

impl PathSource {
    /// Create a source that feeds `tx` with files under `root`.
    pub fn new(root: impl Into<PathBuf>, tx: PathSender) -> Self {
        Self {
            root: root.into(),
            tx,
        }
    }

    /// Start the watch origin. Call before [`walk`](Self::walk) so files
    /// created during the walk are not missed.
    pub fn start_watch(&self, recursive: bool) -> Result<PathWatcher, PipelineError> {
        PathWatcher::start(&self.root, recursive, self.tx.clone())
    }

    /// Run the walk origin to completion, returning how many files it queued.
    ///
    /// Consumes the source; once the walk and any watcher are gone the queue
    /// closes and workers drain out.
    pub async fn walk(self) -> usize {
        FileDiscovery::new(self.root).walk_into(self.tx).await
    }
}
