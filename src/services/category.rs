//! Category service

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::db::{CategoryRepository, Database};
use crate::models::Category;
use crate::{Error, Result};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryInput {
    #[validate(length(min = 1, message = "category name is required"))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryInput {
    #[validate(length(min = 1, message = "category name is required"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CategoryService {
    db: Database,
}

impl CategoryService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn repository(&self) -> CategoryRepository {
        self.db.repository()
    }

    pub async fn create(&self, input: CreateCategoryInput) -> Result<Category> {
        input.validate()?;

        let repository = self.repository();

        if repository.find_by_name(&input.name).await?.is_some() {
            return Err(Error::Conflict(
                "a category with this name already exists".to_string(),
            ));
        }

        repository
            .insert(&input.name, input.description.as_deref())
            .await
    }

    pub async fn find_all(&self) -> Result<Vec<Category>> {
        self.repository().find_all().await
    }

    pub async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Category> {
        self.repository()
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| Error::NotFound("category not found".to_string()))
    }

    pub async fn update(&self, uuid: &Uuid, input: UpdateCategoryInput) -> Result<Category> {
        input.validate()?;

        let repository = self.repository();

        let mut category = repository
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| Error::NotFound("category not found".to_string()))?;

        if let Some(name) = input.name {
            if name != category.name && repository.find_by_name(&name).await?.is_some() {
                return Err(Error::Conflict(
                    "a category with this name already exists".to_string(),
                ));
            }
            category.name = name;
        }

        if let Some(description) = input.description {
            category.description = Some(description);
        }

        repository.update(&category).await
    }

    pub async fn delete(&self, uuid: &Uuid) -> Result<()> {
        let repository = self.repository();

        let category = repository
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| Error::NotFound("category not found".to_string()))?;

        repository.delete(category.id).await?;
        Ok(())
    }
}
