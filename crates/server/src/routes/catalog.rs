use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{rejection::PathRejection, FromRequest, Multipart, Path, Request, State},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use tracing::info;

use common::types::Message;
use models::{CatalogProject, CatalogProjectInput};
use service::catalog::Upload;

use crate::{errors::ApiError, state::CatalogState};

pub const ROOT_MESSAGE: &str = "FastAPI is running";

/// Form fields of a catalog write, from either a multipart or an urlencoded body.
#[derive(Debug, Default)]
pub struct ProjectForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<Upload>,
}

impl ProjectForm {
    /// Title and description, or 422 naming the first missing field.
    pub fn into_input(self) -> Result<(CatalogProjectInput, Option<Upload>), ApiError> {
        let title = self.title.ok_or_else(|| ApiError::unprocessable("Field required: title"))?;
        let description = self
            .description
            .ok_or_else(|| ApiError::unprocessable("Field required: description"))?;
        Ok((CatalogProjectInput { title, description }, self.image))
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "title" | "description" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
                    if name == "title" { form.title = Some(text) } else { form.description = Some(text) }
                }
                "image" => {
                    let file_name = field.file_name().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
                    // browsers send an empty, unnamed part when no file was picked
                    if file_name.as_deref().map_or(true, str::is_empty) && bytes.is_empty() {
                        continue;
                    }
                    form.image = Some(Upload { file_name, bytes: bytes.to_vec() });
                }
                _ => {} // ignore unknown fields
            }
        }
        Ok(form)
    }
}

#[async_trait]
impl<S> FromRequest<S> for ProjectForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map_or(false, |ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        let Form(mut fields) = Form::<HashMap<String, String>>::from_request(req, state)
            .await
            .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
        Ok(Self {
            title: fields.remove("title"),
            description: fields.remove("description"),
            image: None,
        })
    }
}

#[utoipa::path(get, path = "/", tag = "catalog", responses((status = 200, description = "Service running", body = crate::openapi::MessageDoc)))]
pub async fn root() -> Json<Message> {
    Json(Message::new(ROOT_MESSAGE))
}

#[utoipa::path(
    get, path = "/projects", tag = "catalog",
    responses((status = 200, description = "All projects as stored on disk", body = [crate::openapi::CatalogProjectDoc]))
)]
pub async fn list_projects(State(state): State<CatalogState>) -> Result<Json<Vec<CatalogProject>>, ApiError> {
    let list = state.catalog.list().await?;
    info!(count = list.len(), "list catalog projects");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/projects", tag = "catalog",
    request_body(content = crate::openapi::CreateCatalogProjectDoc, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Created project", body = crate::openapi::CatalogProjectDoc),
        (status = 422, description = "Missing form field", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create_project(
    State(state): State<CatalogState>,
    form: ProjectForm,
) -> Result<Json<CatalogProject>, ApiError> {
    let (input, image) = form.into_input()?;
    let created = state.catalog.create(input, image).await?;
    Ok(Json(created))
}

#[utoipa::path(
    put, path = "/projects/{id}", tag = "catalog",
    params(("id" = i64, Path, description = "Project id")),
    request_body(content = crate::openapi::UpdateCatalogProjectDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Updated project", body = crate::openapi::CatalogProjectDoc),
        (status = 404, description = "Project not found", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Missing form field", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_project(
    State(state): State<CatalogState>,
    id: Result<Path<i64>, PathRejection>,
    form: ProjectForm,
) -> Result<Json<CatalogProject>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::unprocessable(e.body_text()))?;
    let (input, _) = form.into_input()?;
    Ok(Json(state.catalog.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/projects/{id}", tag = "catalog",
    params(("id" = i64, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Project not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete_project(
    State(state): State<CatalogState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Message>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::unprocessable(e.body_text()))?;
    state.catalog.delete(id).await?;
    Ok(Json(Message::new("Project deleted")))
}
