//! Mapping input paths to their converted counterparts under the output root.

use std::path::{Path, PathBuf};

use super::transcode::TARGET_EXTENSION;
use crate::error::PipelineError;

/// Where the converted form of `path` is written.
///
/// Mirrors `path` relative to `input_root` under `output_root`, with the
/// extension replaced (or added, for extensionless files).
pub fn output_path_for(
    input_root: &Path,
    output_root: &Path,
    path: &Path,
) -> Result<PathBuf, PipelineError> {
    let relative = path.strip_prefix(input_root).map_err(|_| {
        PipelineError::io(
            path,
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("not under input root {}", input_root.display()),
            ),
        )
    })?;
    Ok(output_root.join(relative).with_extension(TARGET_EXTENSION))
}

/// Write `bytes` to `target`, creating parent directories as needed.
pub async fn write_output(target: &Path, bytes: &[u8]) -> Result<(), PipelineError> {
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| PipelineError::io(parent, e))?;
    }
    tokio::fs::write(target, bytes)
        .await
        .map_err(|e| PipelineError::io(target, e))
}
