//! webpress core - convert a directory tree of images to WebP, and keep
//! converting as new files arrive.
//!
//! # Architecture
//!
//! ```text
//!  watch (notify) ─┐
//!                  ├─> bounded queue ─> N workers: fingerprint → ledger? → decode → encode → write → record
//!  walk (walkdir) ─┘
//! ```
//!
//! A content fingerprint ledger makes repeated runs cheap: files whose bytes
//! were converted before, under any name, are skipped.
//!
//! # Usage
//!
//! ```rust,ignore
//! use webpress_core::{Config, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> webpress_core::Result<()> {
//!     let mut config = Config::load()?;
//!     config.watch.enabled = false;
//!     let stats = Pipeline::new(config, "./photos", "./webp")?.run().await?;
//!     println!("Converted {} image(s)", stats.transcoded);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, PipelineError, PipelineResult, Result, WebpressError};
pub use pipeline::{Fingerprint, Ledger, Pipeline, Quality};
pub use types::ProcessingStats;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
