//! webpress CLI - convert a directory tree of images to WebP and keep watching it.
//!
//! Every regular file under the input directory is fingerprinted; content that
//! was converted before (by any run, under any name) is skipped, everything
//! else is decoded and written as lossy WebP under the output directory.
//!
//! # Usage
//!
//! ```bash
//! # Convert and keep watching for new files (runs until interrupted)
//! webpress run --input ./photos --output ./webp --quality 80 --workers 8
//!
//! # Convert what is there now and exit
//! webpress run --input ./photos --output ./webp --no-watch
//!
//! # View configuration
//! webpress config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// webpress - convert images to WebP, once per unique content.
#[derive(Parser, Debug)]
#[command(name = "webpress")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(short, long, global = true, env = "WEBPRESS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a directory tree and watch it for new images
    Run(cli::run::RunArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli::config_path(cli.config.as_deref());
    let config = cli::load_config(&config_path, cli.config.is_some())?;
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("webpress v{}", webpress_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Run(args) => cli::run::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, config, &config_path).await,
    }
}
