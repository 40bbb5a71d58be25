use axum::Json;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct StatusDoc { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub detail: String }

/// `id` must be > 0, `title` at least 3 characters.
#[derive(ToSchema)]
pub struct AdminProjectDoc { pub id: i64, pub title: String }

#[derive(ToSchema)]
pub struct CatalogProjectDoc {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

#[derive(ToSchema)]
pub struct CreateCatalogProjectDoc {
    pub title: String,
    pub description: String,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

#[derive(ToSchema)]
pub struct UpdateCatalogProjectDoc { pub title: String, pub description: String }

#[derive(OpenApi)]
#[openapi(
    info(title = "Grand Auto API", version = "1.0.0"),
    paths(
        crate::routes::registry::root,
        crate::routes::registry::list_projects,
        crate::routes::registry::add_project,
        crate::routes::registry::delete_project,
    ),
    components(schemas(StatusDoc, MessageDoc, ErrorDoc, AdminProjectDoc)),
    tags((name = "registry"))
)]
pub struct RegistryApiDoc;

#[derive(OpenApi)]
#[openapi(
    info(title = "FastAPI", version = "0.1.0"),
    paths(
        crate::routes::catalog::root,
        crate::routes::catalog::list_projects,
        crate::routes::catalog::create_project,
        crate::routes::catalog::update_project,
        crate::routes::catalog::delete_project,
    ),
    components(schemas(
        MessageDoc,
        ErrorDoc,
        CatalogProjectDoc,
        CreateCatalogProjectDoc,
        UpdateCatalogProjectDoc,
    )),
    tags((name = "catalog"))
)]
pub struct CatalogApiDoc;

pub async fn registry_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(RegistryApiDoc::openapi())
}

pub async fn catalog_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(CatalogApiDoc::openapi())
}
