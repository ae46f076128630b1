//! Live feed of files created under the input root.

use notify::event::CreateKind;
use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};

use super::channel::PathSender;
use crate::error::PipelineError;

/// Keeps a filesystem subscription alive; events stop when it is dropped.
pub struct PathWatcher {
    root: PathBuf,
    _watcher: RecommendedWatcher,
}

impl PathWatcher {
    /// Subscribe to creation events under `root` and forward new file paths to `tx`.
    ///
    /// Subdirectories are only covered when `recursive` is set. Failure to set
    /// up the subscription is returned; errors reported afterwards are logged
    /// and the subscription stays up.
    pub fn start(root: &Path, recursive: bool, tx: PathSender) -> Result<Self, PipelineError> {
        let root_owned = root.to_path_buf();
        let mut watcher = RecommendedWatcher::new(
            move |res: std::result::Result<Event, notify::Error>| match res {
                Ok(event) => {
                    for path in created_files(event) {
                        tracing::debug!("Watch picked up {:?}", path);
                        if let Err(err) = tx.blocking_send(path) {
                            tracing::warn!(
                                "Path queue closed, dropping watch event for {:?}",
                                err.0
                            );
                        }
                    }
                }
                Err(err) => {
                    tracing::error!("Watch error under {:?}: {}", root_owned, err);
                }
            },
            NotifyConfig::default(),
        )
        .map_err(|err| watch_error(root, err))?;

        let mode = if recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher.watch(root, mode).map_err(|err| watch_error(root, err))?;
        tracing::info!("Watching {:?} for new files ({:?})", root, mode);

        Ok(Self {
            root: root.to_path_buf(),
            _watcher: watcher,
        })
    }

    /// Directory being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Paths of regular files an event reports as newly created.
fn created_files(event: Event) -> Vec<PathBuf> {
    match event.kind {
        EventKind::Create(CreateKind::Folder) => Vec::new(),
        EventKind::Create(_) => event.paths.into_iter().filter(|p| !p.is_dir()).collect(),
        _ => Vec::new(),
    }
}

fn watch_error(root: &Path, err: notify::Error) -> PipelineError {
    PipelineError::Watch {
        path: root.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{ModifyKind, RemoveKind};
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn event(kind: EventKind, path: &Path) -> Event {
        Event::new(kind).add_path(path.to_path_buf())
    }

    #[test]
    fn test_only_file_creation_produces_paths() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("new.png");
        std::fs::write(&file, b"x").unwrap();

        assert_eq!(
            created_files(event(EventKind::Create(CreateKind::File), &file)),
            vec![file.clone()]
        );
        assert!(created_files(event(EventKind::Modify(ModifyKind::Any), &file)).is_empty());
        assert!(created_files(event(EventKind::Remove(RemoveKind::File), &file)).is_empty());
        assert!(created_files(event(EventKind::Create(CreateKind::Folder), &file)).is_empty());
    }

    #[test]
    fn test_ambiguous_create_of_directory_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();

        assert!(created_files(event(EventKind::Create(CreateKind::Any), &sub)).is_empty());
    }

    #[test]
    fn test_missing_root_fails_to_start() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, _rx) = mpsc::channel(4);
        let err = PathWatcher::start(&dir.path().join("missing"), false, tx)
            .err()
            .unwrap();
        assert_eq!(err.kind(), "watch");
    }

    /// Wait up to `within` for `wanted` to come through the queue.
    async fn reported(rx: &mut mpsc::Receiver<PathBuf>, wanted: &Path, within: Duration) -> bool {
        tokio::time::timeout(within, async {
            while let Some(path) = rx.recv().await {
                if path == wanted {
                    return true;
                }
            }
            false
        })
        .await
        .unwrap_or(false)
    }

    #[tokio::test]
    async fn test_new_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let (tx, mut rx) = mpsc::channel(16);
        let watcher = PathWatcher::start(&root, false, tx).unwrap();
        assert_eq!(watcher.root(), root.as_path());

        let created = root.join("fresh.png");
        std::fs::write(&created, b"pixels").unwrap();

        assert!(reported(&mut rx, &created, Duration::from_secs(5)).await);
    }

    #[tokio::test]
    async fn test_non_recursive_watch_ignores_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        std::fs::create_dir(root.join("sub")).unwrap();
        let (tx, mut rx) = mpsc::channel(16);
        let _watcher = PathWatcher::start(&root, false, tx).unwrap();

        let nested = root.join("sub/nested.png");
        std::fs::write(&nested, b"pixels").unwrap();
        // A top-level file afterwards shows events are flowing.
        let top = root.join("top.png");
        std::fs::write(&top, b"pixels").unwrap();

        let mut seen = Vec::new();
        let _ = tokio::time::timeout(Duration::from_secs(5), async {
            while let Some(path) = rx.recv().await {
                let done = path == top;
                seen.push(path);
                if done {
                    break;
                }
            }
        })
        .await;
        assert!(seen.contains(&top));
        assert!(!seen.contains(&nested));
    }

    #[tokio::test]
    async fn test_recursive_watch_reports_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        std::fs::create_dir(root.join("sub")).unwrap();
        let (tx, mut rx) = mpsc::channel(16);
        let _watcher = PathWatcher::start(&root, true, tx).unwrap();

        let nested = root.join("sub/nested.png");
        std::fs::write(&nested, b"pixels").unwrap();

        assert!(reported(&mut rx, &nested, Duration::from_secs(5)).await);
    }
}
