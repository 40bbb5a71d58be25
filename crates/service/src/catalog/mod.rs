//! Project catalog: public projects persisted to a JSON file, with images.

pub mod file;

use async_trait::async_trait;
use models::{CatalogProject, CatalogProjectInput};

use crate::errors::ServiceError;

pub use file::FileCatalog;

/// An uploaded image as received from the client.
#[derive(Clone, Debug, Default)]
pub struct Upload {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Trait abstraction for catalog storage.
#[async_trait]
pub trait ProjectCatalog: Send + Sync {
    async fn list(&self) -> Result<Vec<CatalogProject>, ServiceError>;
    async fn create(&self, input: CatalogProjectInput, image: Option<Upload>) -> Result<CatalogProject, ServiceError>;
    /// Replace title and description of the first project with `id`.
    async fn update(&self, id: i64, input: CatalogProjectInput) -> Result<CatalogProject, ServiceError>;
    /// Remove every project with `id`; returns how many were removed.
    async fn delete(&self, id: i64) -> Result<usize, ServiceError>;
}
