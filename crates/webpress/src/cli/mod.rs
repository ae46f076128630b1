//! Command implementations.

pub mod config;
pub mod run;

use std::path::{Path, PathBuf};
use webpress_core::Config;

/// Resolve which config file to use: an explicit `--config` or the default.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned()),
        None => Config::default_path(),
    }
}

/// Load configuration for this invocation.
///
/// An explicitly requested file must load cleanly. The default file falls back
/// to built-in defaults on error, with a warning on stderr (logging is not
/// initialized yet).
pub fn load_config(path: &Path, explicit: bool) -> anyhow::Result<Config> {
    if explicit {
        return Ok(Config::load_from(path)?);
    }
    if !path.exists() {
        return Ok(Config::default());
    }
    match Config::load_from(path) {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `webpress config path`."
            );
            Ok(Config::default())
        }
    }
}
