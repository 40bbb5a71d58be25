use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tracing::info;

use service::{
    catalog::FileCatalog,
    registry::InMemoryRegistry,
    runtime,
    storage::upload_store::UploadStore,
};

use crate::auth::AdminCredentials;
use crate::errors::StartupError;
use crate::routes;
use crate::state::{CatalogState, RegistryState};

/// Bind `host:port`; hostnames such as `localhost` are resolved.
async fn bind(host: &str, port: u16) -> anyhow::Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .map_err(|e| anyhow::anyhow!("cannot bind {host}:{port}: {e}"))
}

/// Registry state from config: seeded in-memory list plus configured credentials.
pub fn registry_state(cfg: &AppConfig) -> Result<RegistryState, StartupError> {
    let (username, password) = cfg
        .registry
        .credentials()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(RegistryState {
        registry: Arc::new(InMemoryRegistry::seeded()),
        credentials: Arc::new(AdminCredentials::new(username, password)),
    })
}

/// Run the admin registry until Ctrl+C.
pub async fn run_registry(cfg: AppConfig) -> anyhow::Result<()> {
    let state = registry_state(&cfg)?;
    let app = routes::build_registry_router(state, routes::registry_cors());
    serve("registry", bind(&cfg.server.host, cfg.registry.port).await?, app).await
}

/// Run the project catalog until Ctrl+C.
pub async fn run_catalog(cfg: AppConfig) -> anyhow::Result<()> {
    let catalog_cfg = &cfg.catalog;
    runtime::ensure_env(&catalog_cfg.data_file, &catalog_cfg.uploads_dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let uploads = UploadStore::new(&catalog_cfg.uploads_dir);
    let catalog = FileCatalog::new(&catalog_cfg.data_file, uploads.clone());
    let state = CatalogState { catalog };
    info!(
        data_file = %catalog_cfg.data_file.display(),
        uploads_dir = %catalog_cfg.uploads_dir.display(),
        "catalog storage ready"
    );

    let app = routes::build_catalog_router(
        state,
        &uploads,
        catalog_cfg.max_upload_bytes,
        routes::catalog_cors(),
    );
    serve("catalog", bind(&cfg.server.host, catalog_cfg.port).await?, app).await
}

async fn serve(service: &'static str, listener: TcpListener, app: Router) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!(service, %addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(service))
        .await?;
    Ok(())
}

async fn shutdown_signal(service: &'static str) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(service, event = "shutdown_signal", "received Ctrl+C, shutting down");
    } else {
        // no signal handler available; run until the process is killed
        std::future::pending::<()>().await;
    }
}
