use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    Extension, Json,
};
use tracing::info;

use common::types::{Message, Status};
use models::AdminProject;

use crate::{auth::AdminUser, errors::ApiError, state::RegistryState};

#[utoipa::path(get, path = "/", tag = "registry", responses((status = 200, description = "API running", body = crate::openapi::StatusDoc)))]
pub async fn root() -> Json<Status> {
    Json(Status { status: "API running" })
}

#[utoipa::path(
    get, path = "/admin/projects", tag = "registry",
    responses(
        (status = 200, description = "All projects in insertion order", body = [crate::openapi::AdminProjectDoc]),
        (status = 401, description = "Missing or wrong credentials", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list_projects(State(state): State<RegistryState>) -> Json<Vec<AdminProject>> {
    Json(state.registry.list().await)
}

#[utoipa::path(
    post, path = "/admin/projects", tag = "registry",
    request_body = crate::openapi::AdminProjectDoc,
    responses(
        (status = 200, description = "Project added", body = crate::openapi::MessageDoc),
        (status = 400, description = "Duplicate id", body = crate::openapi::ErrorDoc),
        (status = 401, description = "Missing or wrong credentials", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn add_project(
    State(state): State<RegistryState>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    payload: Result<Json<AdminProject>, JsonRejection>,
) -> Result<Json<Message>, ApiError> {
    let Json(project) = payload.map_err(|e| ApiError::unprocessable(e.body_text()))?;
    let id = project.id;
    state.registry.add(project).await?;
    info!(%admin, id, "admin added project");
    Ok(Json(Message::new("Project added successfully")))
}

#[utoipa::path(
    delete, path = "/admin/projects/{id}", tag = "registry",
    params(("id" = i64, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project deleted", body = crate::openapi::MessageDoc),
        (status = 401, description = "Missing or wrong credentials", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Project not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete_project(
    State(state): State<RegistryState>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Message>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::unprocessable(e.body_text()))?;
    state.registry.delete(id).await?;
    info!(%admin, id, "admin deleted project");
    Ok(Json(Message::new("Project deleted")))
}
