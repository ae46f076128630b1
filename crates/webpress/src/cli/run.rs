//! The `webpress run` command: convert a directory tree and keep watching it.

use clap::builder::RangedU64ValueParser;
use clap::Args;
use std::path::PathBuf;
use webpress_core::{Config, Pipeline};

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory to convert images from
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory to write WebP files to (created if missing)
    #[arg(short, long)]
    pub output: PathBuf,

    /// WebP quality, 1-100 [config default: 90]
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// Number of parallel workers [config default: 4]
    #[arg(short, long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub workers: Option<usize>,

    /// Ledger of already-converted content [config default: processed_files.txt]
    #[arg(long, env = "WEBPRESS_LEDGER")]
    pub ledger: Option<PathBuf>,

    /// Convert what is there now and exit instead of watching for new files
    #[arg(long)]
    pub no_watch: bool,

    /// Also watch subdirectories for new files
    #[arg(long)]
    pub recursive_watch: bool,
}

/// Apply command-line overrides on top of the loaded configuration.
pub fn apply_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(quality) = args.quality {
        config.processing.quality = quality;
    }
    if let Some(workers) = args.workers {
        config.processing.workers = workers;
    }
    if let Some(ledger) = &args.ledger {
        config.ledger.path = ledger.clone();
    }
    if args.no_watch {
        config.watch.enabled = false;
    }
    if args.recursive_watch {
        config.watch.recursive = true;
    }
}

/// Execute the run command.
pub async fn execute(args: RunArgs, mut config: Config) -> anyhow::Result<()> {
    apply_overrides(&mut config, &args);

    if !args.input.is_dir() {
        anyhow::bail!(
            "Input directory does not exist: {:?}\n\n  Hint: Check the path and try again.",
            args.input
        );
    }

    let watching = config.watch.enabled;
    let pipeline = Pipeline::new(config, &args.input, &args.output)?;
    let stats = pipeline.run().await?;

    if !watching {
        tracing::info!(
            "Converted {} of {} file(s) ({:.1} img/sec)",
            stats.transcoded,
            stats.attempted(),
            stats.images_per_second()
        );
    }
    Ok(())
}
