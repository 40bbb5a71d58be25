use std::sync::Arc;

use service::{catalog::ProjectCatalog, registry::ProjectRegistry};

use crate::auth::AdminCredentials;

/// Shared state of the admin registry service.
#[derive(Clone)]
pub struct RegistryState {
    pub registry: Arc<dyn ProjectRegistry>,
    pub credentials: Arc<AdminCredentials>,
}

/// Shared state of the project catalog service.
#[derive(Clone)]
pub struct CatalogState {
    pub catalog: Arc<dyn ProjectCatalog>,
}
