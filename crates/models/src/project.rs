use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const MIN_TITLE_CHARS: usize = 3;

/// Registry entry: a positive id and a title of at least three characters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProject {
    pub id: i64,
    pub title: String,
}

impl AdminProject {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self { id, title: title.into() }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        validate_id(self.id)?;
        validate_title(&self.title)
    }
}

/// Records the registry starts with.
pub fn seed_admin_projects() -> Vec<AdminProject> {
    vec![
        AdminProject::new(1, "Project One"),
        AdminProject::new(2, "Project Two"),
    ]
}

pub fn validate_id(id: i64) -> Result<(), ModelError> {
    if id <= 0 {
        return Err(ModelError::Validation("id must be greater than 0".into()));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), ModelError> {
    if title.chars().count() < MIN_TITLE_CHARS {
        return Err(ModelError::Validation(format!(
            "title must be at least {MIN_TITLE_CHARS} characters"
        )));
    }
    Ok(())
}

/// Catalog entry persisted in the JSON data file.
///
/// `id` is assigned as `count + 1` on create, so it is not unique once
/// records have been deleted. `image` is the public URL path of the stored
/// upload, e.g. `/uploads/<uuid>.png`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProject {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Writable fields of a catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProjectInput {
    pub title: String,
    pub description: String,
}

impl CatalogProject {
    /// Replace the writable fields, keeping `id` and `image`.
    pub fn apply(&mut self, input: CatalogProjectInput) {
        self.title = input.title;
        self.description = input.description;
    }
}
