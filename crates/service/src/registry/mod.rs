//! Admin project registry: the authenticated, process-lifetime project list.

pub mod memory;

use async_trait::async_trait;
use models::AdminProject;

use crate::errors::ServiceError;

pub use memory::InMemoryRegistry;

/// Trait abstraction for the admin project list.
/// Insertion order is list order.
#[async_trait]
pub trait ProjectRegistry: Send + Sync {
    async fn list(&self) -> Vec<AdminProject>;
    /// Validate and append; `Conflict` when the id is already present.
    async fn add(&self, project: AdminProject) -> Result<(), ServiceError>;
    /// Remove the first project with `id`; `NotFound` when absent.
    async fn delete(&self, id: i64) -> Result<AdminProject, ServiceError>;
}
