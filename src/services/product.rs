//! Product service

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::db::{CategoryRepository, Database, ProductRepository};
use crate::models::Product;
use crate::{Error, Result};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    #[validate(length(min = 1, message = "product name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: Option<i64>,
    pub category_uuid: Uuid,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductInput {
    #[validate(length(min = 1, message = "product name is required"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: Option<i64>,
    pub category_uuid: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct ProductService {
    db: Database,
}

impl ProductService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn repository(&self) -> ProductRepository {
        self.db.repository()
    }

    fn categories(&self) -> CategoryRepository {
        self.db.repository()
    }

    pub async fn create(&self, input: CreateProductInput) -> Result<Product> {
        input.validate()?;

        let repository = self.repository();

        if repository.find_by_name(&input.name).await?.is_some() {
            return Err(Error::Conflict(
                "a product with this name already exists".to_string(),
            ));
        }

        let category = self
            .categories()
            .find_by_uuid(&input.category_uuid)
            .await?
            .ok_or_else(|| Error::NotFound("category not found".to_string()))?;

        repository
            .insert(
                &input.name,
                input.description.as_deref(),
                input.price,
                input.stock.unwrap_or(0),
                category.id,
            )
            .await
    }

    pub async fn find_all(&self) -> Result<Vec<Product>> {
        self.repository().find_all().await
    }

    pub async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Product> {
        self.repository()
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| Error::NotFound("product not found".to_string()))
    }

    pub async fn update(&self, uuid: &Uuid, input: UpdateProductInput) -> Result<Product> {
        input.validate()?;

        let repository = self.repository();

        let mut product = repository
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| Error::NotFound("product not found".to_string()))?;

        if let Some(name) = input.name {
            if name != product.name && repository.find_by_name(&name).await?.is_some() {
                return Err(Error::Conflict(
                    "a product with this name already exists".to_string(),
                ));
            }
            product.name = name;
        }

        if let Some(description) = input.description {
            product.description = Some(description);
        }

        if let Some(price) = input.price {
            product.price = price;
        }

        if let Some(stock) = input.stock {
            product.stock = stock;
        }

        if let Some(category_uuid) = input.category_uuid {
            let category = self
                .categories()
                .find_by_uuid(&category_uuid)
                .await?
                .ok_or_else(|| Error::NotFound("category not found".to_string()))?;
            product.category_id = category.id;
        }

        repository.update(&product).await
    }

    pub async fn delete(&self, uuid: &Uuid) -> Result<()> {
        let repository = self.repository();

        let product = repository
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| Error::NotFound("product not found".to_string()))?;

        repository.delete(product.id).await?;
        Ok(())
    }
}
