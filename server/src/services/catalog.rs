use std::sync::Arc;

use crate::models::Experience;
use crate::store::ExperienceStore;
use crate::utils::error::AppError;

/// Read-only access to the experience catalog.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ExperienceStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ExperienceStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Experience>, AppError> {
        Ok(self.store.list_experiences().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Experience, AppError> {
        self.store
            .find_experience(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Experience not found".to_string()))
    }
}
