use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use models::{CatalogProject, CatalogProjectInput};

use super::{ProjectCatalog, Upload};
use crate::errors::ServiceError;
use crate::storage::{json_list_store::JsonListStore, upload_store::UploadStore};

/// Catalog persisted as a JSON array, images stored in an upload directory.
#[derive(Clone)]
pub struct FileCatalog {
    store: Arc<JsonListStore<CatalogProject>>,
    uploads: UploadStore,
}

impl FileCatalog {
    pub fn new<P: Into<std::path::PathBuf>>(data_file: P, uploads: UploadStore) -> Arc<Self> {
        Arc::new(Self { store: JsonListStore::new(data_file), uploads })
    }
}

#[async_trait]
impl ProjectCatalog for FileCatalog {
    async fn list(&self) -> Result<Vec<CatalogProject>, ServiceError> {
        self.store.load().await
    }

    async fn create(&self, input: CatalogProjectInput, image: Option<Upload>) -> Result<CatalogProject, ServiceError> {
        let image = match image {
            Some(upload) => Some(self.uploads.save(upload.file_name.as_deref(), &upload.bytes).await?),
            None => None,
        };
        let created = self
            .store
            .update(move |items| {
                // count + 1: ids repeat once something has been deleted
                let project = CatalogProject {
                    id: items.len() as i64 + 1,
                    title: input.title,
                    description: input.description,
                    image,
                };
                items.push(project.clone());
                Ok(project)
            })
            .await?;
        info!(id = created.id, image = ?created.image, "catalog project created");
        Ok(created)
    }

    async fn update(&self, id: i64, input: CatalogProjectInput) -> Result<CatalogProject, ServiceError> {
        let updated = self
            .store
            .update(move |items| {
                let project = items
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| ServiceError::NotFound("Project not found".into()))?;
                project.apply(input);
                Ok(project.clone())
            })
            .await?;
        info!(id, "catalog project updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<usize, ServiceError> {
        let removed = self
            .store
            .update(move |items| {
                let before = items.len();
                items.retain(|p| p.id != id);
                match before - items.len() {
                    0 => Err(ServiceError::NotFound("Project not found".into())),
                    n => Ok(n),
                }
            })
            .await?;
        info!(id, removed, "catalog project deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use uuid::Uuid;

    struct Fixture {
        root: PathBuf,
        catalog: Arc<FileCatalog>,
    }

    impl Fixture {
        fn new() -> Self {
            let root = std::env::temp_dir().join(format!("file_catalog_{}", Uuid::new_v4()));
            let catalog = FileCatalog::new(root.join("projects.json"), UploadStore::new(root.join("uploads")));
            Self { root, catalog }
        }

        fn reopen(&self) -> Arc<FileCatalog> {
            FileCatalog::new(self.root.join("projects.json"), UploadStore::new(self.root.join("uploads")))
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.root);
        }
    }

    fn input(title: &str, description: &str) -> CatalogProjectInput {
        CatalogProjectInput { title: title.into(), description: description.into() }
    }

    #[tokio::test]
    async fn empty_catalog_lists_nothing() -> Result<(), anyhow::Error> {
        let fx = Fixture::new();
        assert!(fx.catalog.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn create_stores_image_and_persists_record() -> Result<(), anyhow::Error> {
        let fx = Fixture::new();
        let upload = Upload { file_name: Some("shot.png".into()), bytes: vec![0x89, b'P', b'N', b'G'] };
        let created = fx.catalog.create(input("T", "D"), Some(upload)).await?;
        assert_eq!(created.id, 1);
        assert_eq!(created.title, "T");

        let public = created.image.clone().expect("image path");
        let on_disk = fx.root.join("uploads").join(public.trim_start_matches("/uploads/"));
        assert_eq!(tokio::fs::read(on_disk).await?, vec![0x89, b'P', b'N', b'G']);

        let second = fx.catalog.create(input("No image", "none"), None).await?;
        assert_eq!(second.id, 2);
        assert_eq!(second.image, None);

        // the data file is the only source of truth
        let reopened = fx.reopen();
        assert_eq!(reopened.list().await?, vec![created, second]);
        Ok(())
    }

    #[tokio::test]
    async fn update_changes_only_title_and_description() -> Result<(), anyhow::Error> {
        let fx = Fixture::new();
        let upload = Upload { file_name: Some("a.jpg".into()), bytes: b"jpg".to_vec() };
        let created = fx.catalog.create(input("old", "old"), Some(upload)).await?;

        let updated = fx.catalog.update(created.id, input("new", "fresh")).await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.image, created.image);
        assert_eq!((updated.title.as_str(), updated.description.as_str()), ("new", "fresh"));
        assert_eq!(fx.reopen().list().await?, vec![updated]);

        let err = fx.catalog.update(42, input("x", "y")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_record_and_missing_id_leaves_file_unchanged() -> Result<(), anyhow::Error> {
        let fx = Fixture::new();
        fx.catalog.create(input("one", "1"), None).await?;
        fx.catalog.create(input("two", "2"), None).await?;

        assert_eq!(fx.catalog.delete(1).await?, 1);
        let ids: Vec<i64> = fx.catalog.list().await?.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);

        let data_file = fx.root.join("projects.json");
        let before = tokio::fs::read(&data_file).await?;
        assert!(matches!(fx.catalog.delete(1).await, Err(ServiceError::NotFound(_))));
        assert_eq!(tokio::fs::read(&data_file).await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn ids_repeat_after_delete_then_create() -> Result<(), anyhow::Error> {
        let fx = Fixture::new();
        fx.catalog.create(input("one", "1"), None).await?;
        fx.catalog.create(input("two", "2"), None).await?;
        fx.catalog.delete(1).await?;

        let third = fx.catalog.create(input("three", "3"), None).await?;
        assert_eq!(third.id, 2);

        // update hits the first match, delete removes all matches
        let updated = fx.catalog.update(2, input("renamed", "r")).await?;
        assert_eq!(updated.title, "renamed");
        let titles: Vec<String> = fx.catalog.list().await?.into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["renamed", "three"]);

        assert_eq!(fx.catalog.delete(2).await?, 2);
        assert!(fx.catalog.list().await?.is_empty());
        Ok(())
    }
}
