//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{debug, warn};

/// Ensure the data file's parent directory and the uploads directory exist.
pub async fn ensure_env(data_file: &Path, uploads_dir: &Path) -> anyhow::Result<()> {
    if let Some(parent) = data_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    if tokio::fs::metadata(data_file).await.is_err() {
        warn!(data_file = %data_file.display(), "data file not found; starting with an empty project list");
    }
    tokio::fs::create_dir_all(uploads_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", uploads_dir.display()))?;
    debug!(uploads_dir = %uploads_dir.display(), "uploads directory ready");
    Ok(())
}
