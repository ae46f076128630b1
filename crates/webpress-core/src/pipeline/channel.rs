//! Bounded path queue between the path source and the worker pool.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

use crate::config::PipelineConfig;

/// Producer half of the path queue. Cloned by each origin.
pub type PathSender = mpsc::Sender<PathBuf>;

/// Consumer half of the path queue, shared by every worker.
pub type SharedPathReceiver = Arc<Mutex<mpsc::Receiver<PathBuf>>>;

/// Create a bounded channel pair with the configured buffer size.
///
/// When the buffer is full, the sender will block, providing backpressure
/// so discovery never runs arbitrarily far ahead of the workers.
pub fn bounded_channel<T>(config: &PipelineConfig) -> (mpsc::Sender<T>, mpsc::Receiver<T>) {
    mpsc::channel(config.buffer_size)
}

/// Create the path queue with a receiver ready to be shared across workers.
pub fn path_queue(config: &PipelineConfig) -> (PathSender, SharedPathReceiver) {
    let (tx, rx) = bounded_channel(config);
    (tx, Arc::new(Mutex::new(rx)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_bounded_channel() {
        let config = PipelineConfig { buffer_size: 10 };

        let (tx, mut rx) = bounded_channel::<i32>(&config);

        tx.send(42).await.unwrap();
        let received = rx.recv().await;

        assert_eq!(received, Some(42));
    }

    #[tokio::test]
    async fn test_send_blocks_when_full_until_drained() {
        let config = PipelineConfig { buffer_size: 3 };
        let (tx, rx) = path_queue(&config);

        for i in 0..3 {
            tx.send(PathBuf::from(format!("{i}.png"))).await.unwrap();
        }

        // No consumer: the fourth send cannot complete.
        let blocked = tokio::time::timeout(
            Duration::from_millis(100),
            tx.send(PathBuf::from("3.png")),
        )
        .await;
        assert!(blocked.is_err());

        // Draining one slot lets it through.
        let sender = tx.clone();
        let pending = tokio::spawn(async move { sender.send(PathBuf::from("3.png")).await });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!pending.is_finished());

        let first = rx.lock().await.recv().await;
        assert_eq!(first, Some(PathBuf::from("0.png")));
        tokio::time::timeout(Duration::from_secs(1), pending)
            .await
            .expect("send should complete after a drain")
            .unwrap()
            .unwrap();
    }
}
