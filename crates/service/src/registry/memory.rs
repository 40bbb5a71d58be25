use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use models::{project::seed_admin_projects, AdminProject};

use super::ProjectRegistry;
use crate::errors::ServiceError;

/// Ordered in-memory project list. Contents are lost on exit.
pub struct InMemoryRegistry {
    inner: RwLock<Vec<AdminProject>>,
}

impl InMemoryRegistry {
    pub fn new(initial: Vec<AdminProject>) -> Self {
        Self { inner: RwLock::new(initial) }
    }

    /// Registry holding the two startup projects.
    pub fn seeded() -> Self {
        Self::new(seed_admin_projects())
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl ProjectRegistry for InMemoryRegistry {
    async fn list(&self) -> Vec<AdminProject> {
        self.inner.read().await.clone()
    }

    async fn add(&self, project: AdminProject) -> Result<(), ServiceError> {
        project.validate()?;
        let mut list = self.inner.write().await;
        if list.iter().any(|p| p.id == project.id) {
            return Err(ServiceError::Conflict("Project with this ID already exists".into()));
        }
        info!(id = project.id, "registry project added");
        list.push(project);
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<AdminProject, ServiceError> {
        let mut list = self.inner.write().await;
        let pos = list
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| ServiceError::NotFound("Project not found".into()))?;
        info!(id, "registry project deleted");
        Ok(list.remove(pos))
    }
}
