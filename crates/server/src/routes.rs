use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use axum::middleware;

use service::storage::upload_store::UploadStore;

use crate::auth;
use crate::openapi;
use crate::state::{CatalogState, RegistryState};

pub mod catalog;
pub mod registry;

/// CORS for the admin registry: any origin (mirrored), any method/header, credentials allowed.
pub fn registry_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// CORS for the catalog: `*` origin/methods/headers, no credentials.
pub fn catalog_cors() -> CorsLayer {
    CorsLayer::permissive()
}

/// Build the admin registry router: public root plus Basic-auth protected admin routes.
pub fn build_registry_router(state: RegistryState, cors: CorsLayer) -> Router {
    let admin_routes = Router::new()
        .route(
            "/admin/projects",
            get(registry::list_projects).post(registry::add_project),
        )
        .route("/admin/projects/:id", delete(registry::delete_project))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state.credentials),
            auth::require_basic_auth,
        ));

    let app = Router::new()
        .route("/", get(registry::root))
        .route("/openapi.json", get(openapi::registry_openapi))
        .merge(admin_routes)
        .with_state(state)
        .layer(cors);
    with_tracing(app)
}

/// Build the catalog router: project CRUD, uploaded files under the upload prefix.
pub fn build_catalog_router(
    state: CatalogState,
    uploads: &UploadStore,
    body_limit: usize,
    cors: CorsLayer,
) -> Router {
    let app = Router::new()
        .route("/", get(catalog::root))
        .route("/openapi.json", get(openapi::catalog_openapi))
        .route(
            "/projects",
            get(catalog::list_projects).post(catalog::create_project),
        )
        .route(
            "/projects/:id",
            put(catalog::update_project).delete(catalog::delete_project),
        )
        .nest_service(uploads.public_prefix(), ServeDir::new(uploads.dir()))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(cors);
    with_tracing(app)
}

fn with_tracing(app: Router) -> Router {
    app.layer(
        TraceLayer::new_for_http()
            // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(false),
            )
            .on_request(
                DefaultOnRequest::new()
                    .level(Level::INFO),
            )
            // 响应返回时打点，包含状态码与耗时
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .include_headers(false),
            )
            // 失败（5xx 等）时以 ERROR 记录
            .on_failure(
                DefaultOnFailure::new()
                    .level(Level::ERROR),
            ),
    )
}
