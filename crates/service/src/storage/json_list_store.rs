use std::{marker::PhantomData, path::PathBuf, sync::Arc};
use tokio::{fs, sync::Mutex};
use tracing::debug;

use crate::errors::ServiceError;

/// JSON file-backed ordered list.
///
/// The file holds a single JSON array and is the only source of truth:
/// every read goes to disk and every change rewrites the whole file.
/// Reads and read-modify-write cycles are serialized inside the process;
/// writers in other processes are not coordinated.
pub struct JsonListStore<T> {
    file_path: PathBuf,
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonListStore<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned + Clone + PartialEq,
{
    /// Bind the store to a path. The file is not touched until the first write.
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { file_path: path.into(), write_lock: Mutex::new(()), _marker: PhantomData })
    }

    /// Read the current list. A missing or blank file is an empty list.
    pub async fn load(&self) -> Result<Vec<T>, ServiceError> {
        // a write truncates before filling the file, never read across one
        let _guard = self.write_lock.lock().await;
        self.read_file().await
    }

    async fn read_file(&self) -> Result<Vec<T>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ServiceError::storage(e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            ServiceError::Storage(format!("{} is not a JSON array of records: {e}", self.file_path.display()))
        })
    }

    async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
        }
        let data = serde_json::to_vec_pretty(items).map_err(ServiceError::storage)?;
        fs::write(&self.file_path, data).await.map_err(ServiceError::storage)?;
        debug!(path = %self.file_path.display(), count = items.len(), "json list saved");
        Ok(())
    }

    /// Load, apply `f`, and rewrite the file if the list changed.
    ///
    /// Nothing is written when `f` returns an error.
    pub async fn update<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut items = self.read_file().await?;
        let before = items.clone();
        let out = f(&mut items)?;
        if items != before {
            self.save(&items).await?;
        }
        Ok(out)
    }
}
