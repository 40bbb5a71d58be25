use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;
use uuid::Uuid;

use crate::errors::ServiceError;

pub const DEFAULT_PUBLIC_PREFIX: &str = "/uploads";

/// Directory of uploaded blobs exposed under a public URL prefix.
///
/// Files are stored as `<uuid-v4><.ext>` where the extension comes from the
/// client-supplied name. Nothing is ever removed from the directory.
#[derive(Clone, Debug)]
pub struct UploadStore {
    dir: PathBuf,
    public_prefix: String,
}

impl UploadStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self::with_prefix(dir, DEFAULT_PUBLIC_PREFIX)
    }

    pub fn with_prefix<P: Into<PathBuf>>(dir: P, public_prefix: &str) -> Self {
        Self { dir: dir.into(), public_prefix: public_prefix.trim_end_matches('/').to_string() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Write `bytes` under a fresh name and return its public path.
    pub async fn save(&self, original_name: Option<&str>, bytes: &[u8]) -> Result<String, ServiceError> {
        fs::create_dir_all(&self.dir).await.map_err(ServiceError::storage)?;
        let stored = format!("{}{}", Uuid::new_v4(), extension_of(original_name.unwrap_or_default()));
        fs::write(self.dir.join(&stored), bytes).await.map_err(ServiceError::storage)?;
        info!(file = %stored, size = bytes.len(), "upload stored");
        Ok(format!("{}/{}", self.public_prefix, stored))
    }
}

/// `.ext` of the final path component, or empty. Extensions that are not
/// plain ASCII alphanumerics are dropped so the public path stays URL-safe.
fn extension_of(name: &str) -> String {
    let base = name.rsplit(&['/', '\\'][..]).next().unwrap_or_default();
    match Path::new(base).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => format!(".{ext}"),
        _ => String::new(),
    }
}
