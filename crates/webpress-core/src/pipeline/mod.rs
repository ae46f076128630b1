//! Conversion pipeline components.
//!
//! - **hash**: Content fingerprints for deduplication
//! - **ledger**: Durable record of fingerprints already converted
//! - **transcode**: Decode any raster image, encode lossy WebP
//! - **output**: Input path to output path mapping
//! - **discovery**: One-shot recursive walk of the input root
//! - **watch**: Live feed of newly created files
//! - **source**: Merges walk and watch into one queue
//! - **channel**: Bounded queue for backpressure
//! - **processor**: The per-file step
//! - **worker**: Fixed-size worker pool
//! - **orchestrator**: Wires everything together

pub mod channel;
pub mod discovery;
pub mod hash;
pub mod ledger;
pub mod orchestrator;
pub mod output;
pub mod processor;
pub mod source;
pub mod transcode;
pub mod watch;
pub mod worker;

// Re-exports for convenient access
pub use discovery::FileDiscovery;
pub use hash::Fingerprint;
pub use ledger::Ledger;
pub use orchestrator::Pipeline;
pub use processor::{FileOutcome, FileProcessor};
pub use source::PathSource;
pub use transcode::{DecodedImage, Quality, Transcoder};
pub use watch::PathWatcher;
pub use worker::{WorkerPool, WorkerStats};
